//! Vehicle record wire model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A vehicle registration record as served by the vehicle backend.
///
/// Field names are camelCase on the wire. The capacity fields, the engine
/// number and the print remarks are optional; everything else is required
/// by the upstream registration form. The renderer does not re-validate
/// required fields and renders missing optionals as blank.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Opaque identifier; only used to build the public-view URL in the QR.
    pub id: String,
    pub vcc_no: String,
    /// ISO-8601 or `DD/MM/YYYY`; normalized before display.
    pub vcc_generation_date: String,
    pub chassis_no: String,
    #[serde(default)]
    pub engine_number: Option<String>,
    pub year_of_built: String,
    pub vehicle_drive: String,
    pub country_of_origin: String,
    #[serde(default)]
    pub engine_capacity: Option<String>,
    #[serde(default)]
    pub carriage_capacity: Option<String>,
    #[serde(default)]
    pub passenger_capacity: Option<String>,
    pub vehicle_model: String,
    pub vehicle_brand_name: String,
    pub vehicle_type: String,
    pub vehicle_color: String,
    pub specification_standard_name: String,
    pub declaration_number: String,
    /// ISO-8601 or `DD/MM/YYYY`; normalized before display.
    pub declaration_date: String,
    pub owner_code: String,
    pub owner_name: String,
    /// Mixed-script free text; alignment is chosen per render.
    #[serde(default)]
    pub print_remarks: Option<String>,
}
