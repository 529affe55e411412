//! Client for the external vehicle record backend.
//!
//! The record store is a plain REST collaborator; this service only ever
//! reads single records by id.

use reqwest::StatusCode;
use thiserror::Error;

use crate::vehicle::VehicleRecord;

#[derive(Debug, Error)]
pub enum VehicleApiError {
    #[error("VEHICLE_API_URL is not set")]
    MissingBaseUrl,
    #[error("http: {0}")]
    Http(String),
    #[error("vehicle api error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

fn base_url() -> Result<String, VehicleApiError> {
    std::env::var("VEHICLE_API_URL").map_err(|_| VehicleApiError::MissingBaseUrl)
}

pub async fn get_vehicle(
    http: &reqwest::Client,
    id: &str,
) -> Result<VehicleRecord, VehicleApiError> {
    let url = format!("{}/vehicles/{}", base_url()?.trim_end_matches('/'), id);
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| VehicleApiError::Http(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(VehicleApiError::Api {
            status,
            message: error_message(&body),
        });
    }

    resp.json::<VehicleRecord>()
        .await
        .map_err(|e| VehicleApiError::Http(e.to_string()))
}

/// Error payloads from the backend carry `{"error": "..."}`; fall back to
/// the raw body when they don't.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_field() {
        assert_eq!(error_message(r#"{"error":"record not found"}"#), "record not found");
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(error_message("service unavailable"), "service unavailable");
        assert_eq!(error_message(r#"{"detail":"other"}"#), r#"{"detail":"other"}"#);
    }
}
