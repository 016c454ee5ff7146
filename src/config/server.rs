/// Server configuration constants.
///
/// This module defines network parameters for the signaling backend.

/// Interface the HTTP server binds to.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port used when the `PORT` environment variable is absent or malformed.
pub const DEFAULT_PORT: u16 = 5000;

/// Resolve the bind address, honoring the `PORT` environment variable.
pub fn bind_addr() -> (String, u16) {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    (DEFAULT_HOST.to_string(), port)
}
