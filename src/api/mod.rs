mod handlers;

use axum::{routing::get, Router};
use catalog_core::Catalog;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(catalog: Catalog) -> Router {
    let api = Router::new()
        // Templates
        .route("/templates", get(handlers::list_templates))
        .route("/templates/{id}", get(handlers::get_template))
        .route("/templates/{id}/raw", get(handlers::get_template_raw))
        // Owners
        .route("/owners", get(handlers::list_owners))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::index))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(catalog)
}
