//! Deterministic layout math: page proportions and word wrapping.

use ab_glyph::{Font, GlyphId, PxScale, ScaleFont};

/// Fixed page width of the exported document, in millimeters (A4).
pub const PAGE_WIDTH_MM: f64 = 210.0;

/// Page height in millimeters for a raster of the given pixel dimensions.
///
/// The raster spans the full page width; height scales proportionally and
/// is rounded to the nearest millimeter.
pub fn page_height_mm(source_width_px: u32, source_height_px: u32) -> f64 {
    (source_height_px as f64 * PAGE_WIDTH_MM / source_width_px as f64).round()
}

/// Advance width of `text` at the given scale, including kerning.
pub fn line_width(font: &impl Font, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let glyph = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, glyph);
        }
        width += scaled.h_advance(glyph);
        previous = Some(glyph);
    }
    width
}

/// Greedy word wrap of `text` into lines no wider than `max_width` pixels.
///
/// Input newlines are hard breaks and empty lines are preserved. A single
/// word wider than the line is broken at character granularity rather than
/// overflowing.
pub fn wrap_text(font: &impl Font, scale: PxScale, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let source_line = source_line.trim_end_matches('\r');
        if source_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in source_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if line_width(font, scale, &candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if line_width(font, scale, word) <= max_width {
                current = word.to_string();
            } else {
                // Word alone exceeds the line: break it at characters.
                for ch in word.chars() {
                    let mut candidate = current.clone();
                    candidate.push(ch);
                    if !current.is_empty() && line_width(font, scale, &candidate) > max_width {
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    } else {
                        current = candidate;
                    }
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
