//! Anonymous-pairing signaling subsystem.
//!
//! Matches strangers 1:1 and relays their WebRTC negotiation and chat
//! messages. Split into:
//! - `registry`: live-connection bookkeeping
//! - `engine`: waiting queue, pairing table, and all state transitions
//! - `server`: the actor that serializes engine operations
//! - `session`: per-connection WebSocket actor
//! - `messages` / `types`: wire protocol and core types

pub mod engine;
pub mod messages;
pub mod registry;
pub mod server;
pub mod session;
pub mod types;
