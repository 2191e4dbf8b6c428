use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use std::path::PathBuf;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{health, menu_items};
use crate::state::AppState;

/// Multipart framing allowance on top of the file size limit.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub max_upload_bytes: usize,
    /// URL prefix (e.g. `/Images`) and directory for serving stored images.
    pub static_images: Option<(String, PathBuf)>,
}

pub fn build_router(state: AppState, options: RouterOptions) -> Router {
    let item_path = format!("{}/{{id}}", menu_items::MENU_ITEMS_PATH);

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            menu_items::MENU_ITEMS_PATH,
            get(menu_items::list_menu_items).post(menu_items::create_menu_item),
        )
        .route(
            &item_path,
            get(menu_items::get_menu_item)
                .put(menu_items::update_menu_item)
                .delete(menu_items::delete_menu_item),
        )
        .with_state(state);

    if let Some((prefix, dir)) = options.static_images {
        let prefix = format!("/{}", prefix.trim_matches('/'));
        router = router.nest_service(&prefix, ServeDir::new(dir));
    }

    router
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        // Body limit (upload size plus form fields)
        .layer(DefaultBodyLimit::max(
            options.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
}
