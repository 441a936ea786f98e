//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`items`] - 资产记录管理接口 (CRUD、图片、二维码、打印)
//! - [`print_jobs`] - 打印任务状态查询
//! - [`public`] - 扫码公共页面

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod health;
pub mod items;
pub mod print_jobs;
pub mod public;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(items::router())
        .merge(print_jobs::router())
        .merge(public::router())
        .merge(health::router())
}

/// Build a fully configured application with middleware and state
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // Static hosting of uploaded media and rendered labels
        .nest_service("/media", ServeDir::new(state.config.media_dir()))
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}
