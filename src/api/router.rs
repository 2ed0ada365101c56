//! HTTP route table.
//!
//! Route paths are the front-end contract and do not change:
//! `/` and `/frontend/:asset` for statics, `/ask`, `/save`, `/code`
//! and `/pdf` for the API. CORS is wide open — the front-end may be
//! hosted on a different origin (static page hosting).

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the application router.
pub fn app_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(endpoints::assets::index))
        .route("/frontend/:asset", get(endpoints::assets::asset))
        .route("/ask", get(endpoints::ask::ask).post(endpoints::ask::ask))
        .route("/save", post(endpoints::save::save))
        .route("/code", post(endpoints::code::code))
        .route("/pdf", get(endpoints::pdf::download))
        .with_state(ctx)
        .layer(CorsLayer::permissive())
}
