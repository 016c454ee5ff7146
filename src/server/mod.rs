// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Signaling logic (participant matchmaking, negotiation/chat relay)

pub mod router;
pub mod signaling;
pub mod state;
pub mod ws_error;
