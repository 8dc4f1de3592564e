use crate::error::RenderError;
use crate::layout::{self, PAGE_WIDTH_MM};
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use printpdf::{ImageTransform, Mm, PdfDocument};

// Base raster geometry at scale 1: A4 width at 96 dpi with comfortable
// margins. The scale factor multiplies everything, matching how the page
// was previously captured at 2x.
const BASE_WIDTH_PX: u32 = 794;
const BASE_MARGIN_PX: u32 = 48;
const BASE_FONT_PX: f32 = 16.0;
const LINE_HEIGHT_FACTOR: f32 = 1.5;

const MM_PER_INCH: f64 = 25.4;

/// Text-to-PDF rendering capability.
///
/// A trait seam so the API layer can inject the renderer like its other
/// collaborators.
pub trait DocumentRenderer: Send + Sync {
    fn render_pdf(&self, text: &str, title: &str) -> Result<Vec<u8>, RenderError>;
}

impl DocumentRenderer for ContractRenderer {
    fn render_pdf(&self, text: &str, title: &str) -> Result<Vec<u8>, RenderError> {
        ContractRenderer::render_pdf(self, text, title)
    }
}

/// Renders contract text to a rasterized single-page PDF.
#[derive(Debug)]
pub struct ContractRenderer {
    font: FontVec,
    scale: u32,
}

impl ContractRenderer {
    /// Load the renderer's font from disk.
    ///
    /// `scale` multiplies the raster resolution without changing layout
    /// proportions (2 reproduces the historical capture quality).
    pub fn new(font_path: &str, scale: u32) -> Result<Self, RenderError> {
        let data = std::fs::read(font_path).map_err(|e| RenderError::FontUnavailable {
            path: font_path.to_string(),
            detail: e.to_string(),
        })?;
        let font = FontVec::try_from_vec(data).map_err(|e| RenderError::FontUnavailable {
            path: font_path.to_string(),
            detail: e.to_string(),
        })?;

        Ok(Self {
            font,
            scale: scale.max(1),
        })
    }

    /// Rasterize the text: black on white, fixed width, height proportional
    /// to the wrapped line count.
    pub fn rasterize(&self, text: &str) -> Result<RgbImage, RenderError> {
        if text.trim().is_empty() {
            return Err(RenderError::EmptyDocument);
        }

        let width = BASE_WIDTH_PX * self.scale;
        let margin = BASE_MARGIN_PX * self.scale;
        let font_px = BASE_FONT_PX * self.scale as f32;
        let line_height = (font_px * LINE_HEIGHT_FACTOR).ceil() as u32;
        let px_scale = PxScale::from(font_px);

        let max_text_width = (width - 2 * margin) as f32;
        let lines = layout::wrap_text(&self.font, px_scale, text, max_text_width);

        let height = 2 * margin + lines.len() as u32 * line_height;
        let mut image = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

        let start = std::time::Instant::now();
        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = margin + index as u32 * line_height;
            draw_text_mut(
                &mut image,
                Rgb([0, 0, 0]),
                margin as i32,
                y as i32,
                px_scale,
                &self.font,
                line,
            );
        }

        tracing::debug!(
            width,
            height,
            lines = lines.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rasterized document text"
        );

        Ok(image)
    }

    /// Render the text and package the raster as a single-page PDF.
    ///
    /// Page width is fixed at 210 mm; height is proportional to the raster
    /// so the image spans the page exactly.
    pub fn render_pdf(&self, text: &str, title: &str) -> Result<Vec<u8>, RenderError> {
        let raster = self.rasterize(text)?;
        let (px_width, px_height) = raster.dimensions();
        let height_mm = layout::page_height_mm(px_width, px_height);

        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(PAGE_WIDTH_MM as f32),
            Mm(height_mm as f32),
            "Layer 1",
        );
        let current_layer = doc.get_page(page).get_layer(layer);

        // Re-encode through printpdf's bundled image types; dpi is chosen so
        // the raster spans the full 210 mm page width.
        let buffer = printpdf::image_crate::RgbImage::from_raw(px_width, px_height, raster.into_raw())
            .ok_or_else(|| RenderError::Pdf("raster buffer size mismatch".to_string()))?;
        let dynamic = printpdf::image_crate::DynamicImage::ImageRgb8(buffer);
        let pdf_image = printpdf::Image::from_dynamic_image(&dynamic);

        let dpi = px_width as f64 / (PAGE_WIDTH_MM / MM_PER_INCH);
        pdf_image.add_to_layer(
            current_layer,
            ImageTransform {
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        tracing::info!(
            px_width,
            px_height,
            height_mm,
            size_bytes = bytes.len(),
            "Packaged document as single-page PDF"
        );

        Ok(bytes)
    }
}
