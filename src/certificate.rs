//! Certificate renderer.
//!
//! Draws a VCC card onto a fixed 750×550pt landscape page: a full-bleed
//! background image when one is configured, a QR code pointing at the
//! record's public view, and a fixed table of absolutely positioned
//! Helvetica text fields. Layout is deterministic for a given record.

use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Px, Rgb,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::background;
use crate::qr;
use crate::text::{self, Align};
use crate::vehicle::VehicleRecord;

pub const PAGE_WIDTH: f32 = 750.0;
pub const PAGE_HEIGHT: f32 = 550.0;

const BODY_FONT_SIZE: f32 = 12.0;
// Line advance as a multiple of the font size, matching the upstream
// renderer's default.
const LINE_ADVANCE: f32 = 1.15;

const QR_X: f32 = 53.0;
const QR_Y: f32 = 457.0;
const QR_SIZE: f32 = 70.0;
const QR_MARGIN_MODULES: u32 = 1;

const DATE_RIGHT_OFFSET: f32 = 80.0;
const REMARKS_RIGHT_OFFSET: f32 = 62.0;
const REMARKS_WIDTH: f32 = 295.0;
const REMARKS_RTL_MARGIN: f32 = 5.0;

const PT_TO_MM: f32 = 0.352_777_78;

pub(crate) fn mm(pt: f32) -> Mm {
    Mm(pt * PT_TO_MM)
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("qr: {0}")]
    Qr(#[from] qr::QrError),
    #[error("pdf: {0}")]
    Pdf(String),
}

/// One positioned text field. `x` is the left edge for `Align::Left` and
/// the right edge for `Align::Right`, in points from the page's top-left
/// corner; `y` is the baseline of the first line.
struct Field {
    text: String,
    x: f32,
    y: f32,
    max_width: Option<f32>,
    align: Align,
}

/// The static layout table, instantiated with a record's content. Optional
/// capacity fields are skipped entirely when empty; the engine number just
/// renders blank.
fn fields(vehicle: &VehicleRecord) -> Vec<Field> {
    let mut out = vec![
        Field {
            text: vehicle.vcc_no.clone(),
            x: 23.0 + 105.0,
            y: 106.0,
            max_width: Some(105.0),
            align: Align::Right,
        },
        Field {
            text: text::format_date_dmy(&vehicle.vcc_generation_date),
            x: PAGE_WIDTH - DATE_RIGHT_OFFSET,
            y: 106.0,
            max_width: None,
            align: Align::Right,
        },
        Field {
            text: format!(
                "{} - {} ({})",
                vehicle.vehicle_brand_name, vehicle.vehicle_model, vehicle.vehicle_type
            ),
            x: PAGE_WIDTH - 147.0 - 194.0,
            y: 147.0,
            max_width: Some(194.0),
            align: Align::Left,
        },
        Field {
            text: format!(
                "{} - {}",
                vehicle.year_of_built,
                text::spell_digits(&vehicle.year_of_built)
            ),
            x: PAGE_WIDTH - 100.0 - 240.0,
            y: 222.0,
            max_width: Some(240.0),
            align: Align::Left,
        },
        Field {
            text: vehicle.country_of_origin.clone(),
            x: PAGE_WIDTH - 100.0 - 240.0,
            y: 261.0,
            max_width: Some(240.0),
            align: Align::Left,
        },
        Field {
            text: vehicle.chassis_no.clone(),
            x: PAGE_WIDTH - 100.0 - 240.0,
            y: 309.0,
            max_width: Some(240.0),
            align: Align::Left,
        },
        Field {
            text: vehicle.vehicle_color.clone(),
            x: PAGE_WIDTH - 100.0 - 240.0,
            y: 348.0,
            max_width: Some(240.0),
            align: Align::Left,
        },
        Field {
            text: vehicle.engine_number.clone().unwrap_or_default(),
            x: PAGE_WIDTH - 100.0 - 240.0,
            y: 389.0,
            max_width: Some(240.0),
            align: Align::Left,
        },
    ];

    if let Some(capacity) = non_empty(&vehicle.engine_capacity) {
        out.push(Field {
            text: capacity.to_string(),
            x: PAGE_WIDTH - 433.0 - 245.0,
            y: 220.0,
            max_width: Some(245.0),
            align: Align::Right,
        });
    }
    if let Some(capacity) = non_empty(&vehicle.carriage_capacity) {
        out.push(Field {
            text: capacity.to_string(),
            x: PAGE_WIDTH - 502.0 - 215.0,
            y: 265.0,
            max_width: Some(215.0),
            align: Align::Left,
        });
    }

    out.push(Field {
        text: format!("{}\n{}", vehicle.owner_code, vehicle.owner_name),
        x: PAGE_WIDTH - 502.0 - 215.0,
        y: 299.5,
        max_width: Some(215.0),
        align: Align::Left,
    });
    out.push(Field {
        text: format!(
            "{} - {}",
            vehicle.declaration_number,
            text::format_date_dmy(&vehicle.declaration_date)
        ),
        x: PAGE_WIDTH - 502.0 - 215.0,
        y: 352.5,
        max_width: Some(215.0),
        align: Align::Left,
    });

    if let Some(remarks) = non_empty(&vehicle.print_remarks) {
        let field = match text::remarks_alignment(remarks) {
            Align::Right => Field {
                text: remarks.to_string(),
                x: PAGE_WIDTH - REMARKS_RIGHT_OFFSET - REMARKS_RTL_MARGIN,
                y: 458.0,
                max_width: Some(REMARKS_WIDTH),
                align: Align::Right,
            },
            Align::Left => Field {
                text: remarks.to_string(),
                x: PAGE_WIDTH - REMARKS_RIGHT_OFFSET - REMARKS_WIDTH,
                y: 458.0,
                max_width: Some(REMARKS_WIDTH),
                align: Align::Left,
            },
        };
        out.push(field);
    }

    out
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Render the certificate document. Synchronous and deterministic given its
/// inputs; the async entry points below take care of background acquisition
/// and failure policy.
pub fn render_document(
    vehicle: &VehicleRecord,
    origin: &str,
    background_jpeg: Option<&[u8]>,
) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        "VCC Certificate",
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "certificate",
    );
    let layer = doc.get_page(page).get_layer(layer);

    if let Some(jpeg) = background_jpeg {
        draw_background(&layer, jpeg);
    }

    let code = qr::build(&qr::payload_url(origin, &vehicle.id))?;
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    qr::draw(
        &layer,
        &code,
        QR_X,
        QR_Y,
        QR_SIZE,
        PAGE_HEIGHT,
        QR_MARGIN_MODULES,
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for field in fields(vehicle) {
        draw_field(&layer, &font, &field);
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

/// A background that fails to decode is skipped, not fatal.
fn draw_background(layer: &PdfLayerReference, jpeg: &[u8]) {
    let img = match image::load_from_memory(jpeg) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            warn!("could not decode background image: {e}");
            return;
        }
    };
    let (w, h) = img.dimensions();

    let xobject = ImageXObject {
        width: Px(w as usize),
        height: Px(h as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: img.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    };

    // At 72dpi one pixel is one point; the scale stretches to the full page.
    Image::from(xobject).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(0.0)),
            translate_y: Some(mm(0.0)),
            dpi: Some(72.0),
            scale_x: Some(PAGE_WIDTH / w as f32),
            scale_y: Some(PAGE_HEIGHT / h as f32),
            ..Default::default()
        },
    );
}

fn draw_field(layer: &PdfLayerReference, font: &IndirectFontRef, field: &Field) {
    let lines = match field.max_width {
        Some(width) => text::wrap_text(&field.text, BODY_FONT_SIZE, width),
        None => field.text.lines().map(str::to_string).collect(),
    };

    for (i, line) in lines.iter().enumerate() {
        let y = field.y + i as f32 * BODY_FONT_SIZE * LINE_ADVANCE;
        let x = match field.align {
            Align::Left => field.x,
            Align::Right => field.x - text::text_width(line, BODY_FONT_SIZE),
        };
        layer.use_text(line, BODY_FONT_SIZE, mm(x), mm(PAGE_HEIGHT - y), font);
    }
}

/// File-mode entry: background failures are silently recovered, anything
/// else propagates to the caller.
pub async fn render_certificate(
    http: &reqwest::Client,
    vehicle: &VehicleRecord,
    origin: &str,
) -> Result<Vec<u8>, RenderError> {
    let background = background::fetch(http).await;
    render_document(vehicle, origin, background.as_deref())
}

/// Blob-mode entry: every failure is collapsed to `None` so callers can
/// treat it as "no preview available" rather than an error.
pub async fn render_certificate_preview(
    http: &reqwest::Client,
    vehicle: &VehicleRecord,
    origin: &str,
) -> Option<Vec<u8>> {
    match render_certificate(http, vehicle, origin).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!("certificate preview failed for {}: {e}", vehicle.vcc_no);
            None
        }
    }
}

/// Download filename convention for file mode.
pub fn certificate_filename(vcc_no: &str) -> String {
    format!("VCC_{vcc_no}.pdf")
}
