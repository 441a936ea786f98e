//! 扫码公共页面模块
//!
//! 标签上的二维码指向这里，无需认证。

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/i/{short_id}", get(handler::lookup))
}
