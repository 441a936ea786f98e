//! Item API 模块

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete_item),
        )
        .route("/{id}/images", post(handler::upload_image))
        .route("/{id}/qr.png", get(handler::qr_png))
        .route("/{id}/print", post(handler::print_label))
}
