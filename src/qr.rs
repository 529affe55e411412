//! QR code construction and placement.
//!
//! The certificate QR encodes the public read-only view of the record. Dark
//! modules are drawn as filled vector rectangles so the light modules stay
//! genuinely transparent and the card background shows through.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{PdfLayerReference, Point, Polygon};
use qrcode::QrCode;
use thiserror::Error;

use crate::certificate::mm;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("failed to build qr: {0}")]
    Build(#[from] qrcode::types::QrError),
}

/// URL encoded into the certificate QR. Must exactly match the route the
/// public-view page serves; a trailing slash on the origin is tolerated.
pub fn payload_url(origin: &str, vehicle_id: &str) -> String {
    format!(
        "{}/public/vehicle/{}",
        origin.trim_end_matches('/'),
        vehicle_id
    )
}

pub fn build(payload: &str) -> Result<QrCode, QrError> {
    Ok(QrCode::new(payload.as_bytes())?)
}

/// Draw the dark modules of `code` into a `size`×`size` point box whose
/// top-left corner sits at (`x`, `y_top`) in page coordinates measured from
/// the top of the page. `margin` is the quiet zone in modules on each side.
/// Uses the layer's current fill color.
pub fn draw(
    layer: &PdfLayerReference,
    code: &QrCode,
    x: f32,
    y_top: f32,
    size: f32,
    page_height: f32,
    margin: u32,
) {
    let modules = code.width() as u32;
    let total = modules + 2 * margin;
    let module_pt = size / total as f32;

    for my in 0..modules {
        for mx in 0..modules {
            if !matches!(code[(mx as usize, my as usize)], qrcode::Color::Dark) {
                continue;
            }
            let left = x + (mx + margin) as f32 * module_pt;
            let top = y_top + (my + margin) as f32 * module_pt;
            let bottom = page_height - top - module_pt;

            let ring = vec![
                (Point::new(mm(left), mm(bottom)), false),
                (Point::new(mm(left + module_pt), mm(bottom)), false),
                (Point::new(mm(left + module_pt), mm(bottom + module_pt)), false),
                (Point::new(mm(left), mm(bottom + module_pt)), false),
            ];
            layer.add_polygon(Polygon {
                rings: vec![ring],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_url_joins_origin_and_id() {
        assert_eq!(
            payload_url("https://cards.example", "42"),
            "https://cards.example/public/vehicle/42"
        );
    }

    #[test]
    fn payload_url_tolerates_trailing_slash() {
        assert_eq!(
            payload_url("https://cards.example/", "42"),
            "https://cards.example/public/vehicle/42"
        );
    }

    #[test]
    fn build_accepts_typical_payload() {
        let code = build("https://cards.example/public/vehicle/42").unwrap();
        assert!(code.width() > 0);
    }

    #[test]
    fn build_rejects_oversized_payload() {
        let payload = "x".repeat(3000);
        assert!(build(&payload).is_err());
    }
}
