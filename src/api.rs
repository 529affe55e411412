use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{certificate, vehicle::VehicleRecord, vehicle_api, AppState};

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Attachment download named `VCC_<vccNo>.pdf`; failures surface as 500.
    #[default]
    File,
    /// Inline bytes for embedding; failures collapse to 404.
    Preview,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RenderQuery {
    #[serde(default)]
    pub mode: RenderMode,
    /// Public-view origin encoded into the QR code. Falls back to the
    /// PUBLIC_ORIGIN environment variable.
    pub origin: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(get, path = "/health", tag = "vcc", responses((status = 200, body = HealthResponse)))]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok".into() })
}

fn resolve_origin(query_origin: Option<String>) -> Result<String, (StatusCode, String)> {
    query_origin
        .or_else(|| std::env::var("PUBLIC_ORIGIN").ok())
        .filter(|s| !s.is_empty())
        .ok_or((
            StatusCode::BAD_REQUEST,
            "origin query parameter or PUBLIC_ORIGIN must be set".to_string(),
        ))
}

async fn respond(
    st: &AppState,
    vehicle: &VehicleRecord,
    mode: RenderMode,
    origin: &str,
) -> Result<Response, (StatusCode, String)> {
    match mode {
        RenderMode::File => {
            let pdf = certificate::render_certificate(&st.http, vehicle, origin)
                .await
                .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
            let disposition = format!(
                "attachment; filename=\"{}\"",
                certificate::certificate_filename(&vehicle.vcc_no)
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                pdf,
            )
                .into_response())
        }
        RenderMode::Preview => {
            match certificate::render_certificate_preview(&st.http, vehicle, origin).await {
                Some(pdf) => {
                    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf).into_response())
                }
                None => Err((StatusCode::NOT_FOUND, "no preview available".to_string())),
            }
        }
    }
}

#[utoipa::path(
    post,
    path = "/certificate",
    tag = "vcc",
    request_body = VehicleRecord,
    params(RenderQuery),
    responses(
        (status = 200, description = "Certificate PDF", content_type = "application/pdf"),
        (status = 400, description = "Missing origin"),
        (status = 404, description = "No preview available"),
        (status = 500, description = "Render failure")
    )
)]
pub async fn render(
    State(st): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
    Json(vehicle): Json<VehicleRecord>,
) -> Result<Response, (StatusCode, String)> {
    let origin = resolve_origin(query.origin)?;
    respond(&st, &vehicle, query.mode, &origin).await
}

#[utoipa::path(
    get,
    path = "/vehicles/{id}/certificate",
    tag = "vcc",
    params(("id" = String, Path, description = "Vehicle record id"), RenderQuery),
    responses(
        (status = 200, description = "Certificate PDF", content_type = "application/pdf"),
        (status = 400, description = "Missing origin"),
        (status = 404, description = "No preview available"),
        (status = 500, description = "Render failure"),
        (status = 502, description = "Vehicle backend failure")
    )
)]
pub async fn vehicle_certificate(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, (StatusCode, String)> {
    let origin = resolve_origin(query.origin)?;
    let vehicle = vehicle_api::get_vehicle(&st.http, &id)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;
    respond(&st, &vehicle, query.mode, &origin).await
}
