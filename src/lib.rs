pub mod api;
pub mod background;
pub mod certificate;
pub mod openapi;
pub mod preview;
pub mod qr;
pub mod text;
pub mod vehicle;
pub mod vehicle_api;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
}

pub fn app(state: AppState) -> Router {
    let openapi = openapi::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", openapi))
        .route("/certificate", post(api::render))
        .route("/vehicles/:id/certificate", get(api::vehicle_certificate))
        .route("/health", get(api::health))
        .with_state(Arc::new(state))
}
