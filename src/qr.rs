//! PNG rendering of QR symbols on top of the `qrcode` and `image` crates.

use image::{imageops, DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Symbol parameters shared by every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrSettings {
    pub ec_level: EcLevel,
    /// Pixels per module, horizontally and vertically.
    pub module_size: u32,
    /// Light modules around the symbol on each side.
    pub border: u32,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::L,
            module_size: 10,
            border: 4,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("{0}")]
    Encode(qrcode::types::QrError),
    #[error("failed to encode PNG: {0}")]
    Png(#[from] image::ImageError),
    #[error("render task failed: {0}")]
    Task(String),
}

impl From<qrcode::types::QrError> for QrError {
    fn from(e: qrcode::types::QrError) -> Self {
        QrError::Encode(e)
    }
}

/// Encodes `text` with the smallest version that fits and returns the PNG bytes.
pub fn render_png(text: &str, settings: &QrSettings) -> Result<Vec<u8>, QrError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), settings.ec_level)?;
    let image = rasterize(&code, settings);

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Runs [`render_png`] on the blocking pool.
pub async fn render_png_blocking(text: String, settings: QrSettings) -> Result<Vec<u8>, QrError> {
    tokio::task::spawn_blocking(move || render_png(&text, &settings))
        .await
        .map_err(|e| QrError::Task(e.to_string()))?
}

fn rasterize(code: &QrCode, settings: &QrSettings) -> GrayImage {
    let size = settings.module_size.max(1);
    let symbol = code
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .module_dimensions(size, size)
        .dark_color(DARK)
        .light_color(LIGHT)
        .build();

    let pad = settings.border * size;
    let mut canvas = GrayImage::from_pixel(symbol.width() + 2 * pad, symbol.height() + 2 * pad, LIGHT);
    imageops::replace(&mut canvas, &symbol, i64::from(pad), i64::from(pad));
    canvas
}
