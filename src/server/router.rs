//! HTTP and WebSocket routing configuration.
//!
//! Defines the signaling WebSocket endpoint and a health probe. The
//! WebSocket endpoint is handled by a dedicated actor per connection.

use actix_web::{web, HttpResponse};

use crate::server::signaling::session::ws_signaling;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/signaling").to(ws_signaling))
        .service(web::resource("/health").to(health));
}

/// Liveness probe for deployment platforms.
async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(r#"{"status":"ok"}"#)
}
