//! # Pennant
//!
//! A layout and export engine for multi-page celebratory banners: the kind
//! you print on letter paper, tape together, and hang across a doorway.
//!
//! A banner is authored in one logical coordinate space spanning every page.
//! The crate estimates how many landscape sheets a message needs, maps
//! global positions onto individual pages, and renders the result three
//! ways — SVG previews, a printable HTML document, and a PDF — all driven by
//! the same layout so every output agrees about what lands where.
//!
//! ## Pipeline
//!
//! ```text
//! Banner (model) -> layout (per page, per geometry) -> svg | html | pdf
//!                   ^ estimate (page count, font size)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use pennant::metrics::BuiltinMetrics;
//! use pennant::model::Banner;
//!
//! let metrics = BuiltinMetrics::new();
//! let banner = Banner::with_text("Welcome", "WELCOME HOME!", None, &metrics);
//! let pdf_bytes = pennant::render_pdf(&banner, &metrics).unwrap();
//! ```

pub mod error;
pub mod estimate;
pub mod fonts;
pub mod html;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod pdf;
pub mod svg;
pub mod template;

pub use error::PennantError;

use metrics::TextMeasurer;
use model::Banner;

/// Parse a banner from its JSON document form.
pub fn banner_from_json(json: &str) -> Result<Banner, PennantError> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a banner to pretty-printed JSON.
pub fn banner_to_json(banner: &Banner) -> Result<String, PennantError> {
    Ok(serde_json::to_string_pretty(banner)?)
}

/// Render every page as a standalone SVG document at preview resolution.
pub fn render_svg_pages(banner: &Banner, measurer: &dyn TextMeasurer) -> Vec<String> {
    svg::render_svg_pages(banner, measurer)
}

/// Render the whole banner as one printable HTML document.
pub fn render_print_html(banner: &Banner, measurer: &dyn TextMeasurer) -> String {
    html::render_print_html(banner, measurer)
}

/// Render the whole banner as a PDF, one sheet per page.
pub fn render_pdf(banner: &Banner, measurer: &dyn TextMeasurer) -> Result<Vec<u8>, PennantError> {
    pdf::PdfWriter::new().write(banner, measurer)
}
