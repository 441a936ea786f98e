//! Print Job API 模块

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/print-jobs/{id}", get(handler::get_by_id))
}
