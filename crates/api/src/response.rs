//! Shared response envelopes.

use serde::Serialize;

/// `{ "status": ... }` envelope for action results (e.g. approval).
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// `{ "message": ... }` envelope for human-readable confirmations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
