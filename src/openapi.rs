use utoipa::OpenApi;

use crate::{api, vehicle};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health,
        api::render,
        api::vehicle_certificate,
    ),
    components(
        schemas(vehicle::VehicleRecord, api::HealthResponse, api::RenderMode)
    ),
    tags(
        (name = "vcc", description = "VCC certificate rendering API")
    )
)]
pub struct ApiDoc;
