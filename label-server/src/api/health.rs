//! Health check routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /health | GET | Liveness plus printer reachability |
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "printer": { "addr": "192.168.1.100:9100", "online": true },
//!   "preview_enabled": true
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use label_printer::Printer;
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    printer: PrinterStatus,
    preview_enabled: bool,
}

#[derive(Serialize)]
pub struct PrinterStatus {
    addr: String,
    online: bool,
}

/// The server itself is always up when this answers; an unreachable
/// printer only degrades the status.
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let online = state.printer.is_online().await;

    Json(HealthResponse {
        status: if online { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        printer: PrinterStatus {
            addr: state.printer.addr(),
            online,
        },
        preview_enabled: state.preview.is_enabled(),
    })
}
