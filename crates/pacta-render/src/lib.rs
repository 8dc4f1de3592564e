//! Contract rendering
//!
//! Turns contract text into a single-page PDF the way the save flow needs
//! it: the text is laid out at a fixed raster width, drawn to an RGB image,
//! and the raster is embedded as the sole content of a PDF page that is
//! 210 mm wide with height proportional to the raster
//! (`round(px_height * 210 / px_width)` mm).
//!
//! Rasterization is platform-dependent (font hinting), so byte-identical
//! output across runs is out of scope; the layout math in [`layout`] is
//! deterministic and tested.

pub mod error;
pub mod layout;
mod renderer;

pub use error::RenderError;
pub use renderer::{ContractRenderer, DocumentRenderer};
