//! # Banner Layout
//!
//! The single authority for "what appears where" on each physical page.
//!
//! A banner is authored in one coordinate space spanning every page: text
//! and emoji x positions are fractions of the *total* banner width. Each
//! renderer (SVG preview, HTML print view, PDF export) works in its own unit
//! system, so the mapping from global to page-local coordinates is
//! parameterized by a [`PageGeometry`] and executed here, once, for all of
//! them. Renderers translate the resulting primitives to their drawing API
//! and never make their own visibility or position decisions — that is how
//! three independent outputs stay numerically consistent.
//!
//! Text elements may straddle a page boundary and render (clipped) on both
//! neighbors; culling uses a generous slack margin so a run is never dropped
//! from a page it bleeds onto. Decorative emojis are the opposite: small and
//! atomic, each is hard-partitioned to exactly one page.

pub mod border;
pub mod decorative;

use serde::Serialize;

use crate::metrics::TextMeasurer;
use crate::model::{Banner, TextElement, PAGE_HEIGHT_IN, PAGE_WIDTH_IN};

pub use border::{border_paths_for_page, BorderPath};
pub use decorative::emojis_for_page;

/// Resolution the model's font sizes and emoji sizes are authored at.
pub const AUTHORING_DPI: f64 = 96.0;

/// Slack margin multiplier for ordinary text: the visible span of a page is
/// widened by this many page-widths on both sides before culling.
pub const SLACK_FACTOR: f64 = 1.5;
/// Wider slack for large text, whose measured center is least reliable.
pub const LARGE_TEXT_SLACK_FACTOR: f64 = 2.0;
/// A text run wider than this fraction of one page counts as large.
pub const LARGE_TEXT_FRACTION: f64 = 0.4;

/// The physical page expressed in one renderer's units. The page is always
/// the fixed 11×8.5in landscape sheet; only the dpi varies.
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub dpi: f64,
}

impl PageGeometry {
    pub fn at_dpi(dpi: f64) -> Self {
        Self {
            page_width: PAGE_WIDTH_IN * dpi,
            page_height: PAGE_HEIGHT_IN * dpi,
            dpi,
        }
    }

    /// Screen preview and print view: CSS pixels (1056 × 816).
    pub fn preview() -> Self {
        Self::at_dpi(96.0)
    }

    /// Document export: points (792 × 612).
    pub fn export() -> Self {
        Self::at_dpi(72.0)
    }

    /// Scale a value authored at 96dpi into this geometry's units.
    pub fn scale(&self, authored: f64) -> f64 {
        authored * self.dpi / AUTHORING_DPI
    }
}

/// A text element resolved to one page, in geometry units. `x`/`y` are the
/// center of the run; `width` is the measured width (0.0 when metrics were
/// unavailable).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedText {
    pub id: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub font_family: String,
    pub color: String,
    pub rotation: f64,
    pub outline: bool,
    pub width: f64,
}

/// An emoji resolved to one page, in geometry units. `x`/`y` are the center.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedEmoji {
    pub id: String,
    pub glyph: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation: f64,
}

/// Everything a renderer needs to draw one page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub page_index: u32,
    pub total_pages: u32,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    pub texts: Vec<PlacedText>,
    pub borders: Vec<BorderPath>,
    pub emojis: Vec<PlacedEmoji>,
}

/// Map one text element onto one page, or `None` if it is not visible there.
///
/// The element's global x is projected into the page's local space:
///
/// ```text
/// absolute_x = x · (page_width · total_pages)
/// local_x    = absolute_x − page_index · page_width
/// ```
///
/// The run is visible when its span `[local_x − w/2, local_x + w/2]`
/// intersects the page widened by the slack margin on both sides. A zero
/// measured width (metrics unavailable) is treated as always visible rather
/// than never.
pub fn place_text(
    element: &TextElement,
    page_index: u32,
    total_pages: u32,
    geometry: &PageGeometry,
    measurer: &dyn TextMeasurer,
) -> Option<PlacedText> {
    let w = geometry.page_width;
    let total_width = w * total_pages as f64;
    let absolute_x = element.x * total_width;
    let local_x = absolute_x - page_index as f64 * w;

    let font_size = geometry.scale(element.font_size);
    let measured = measurer.measure(&element.text, font_size, &element.font_family);

    if measured > 0.0 {
        let slack = if measured > LARGE_TEXT_FRACTION * w {
            LARGE_TEXT_SLACK_FACTOR * w
        } else {
            SLACK_FACTOR * w
        };
        let half = measured / 2.0;
        if local_x + half < -slack || local_x - half > w + slack {
            return None;
        }
    }

    Some(PlacedText {
        id: element.id.clone(),
        text: element.text.clone(),
        x: local_x,
        y: element.y * geometry.page_height,
        font_size,
        font_family: element.font_family.clone(),
        color: element.color.clone(),
        rotation: element.rotation,
        outline: element.outline,
        width: measured,
    })
}

/// Assemble the full renderer contract for one page: visible text runs,
/// border primitives, and this page's share of the decorative emojis.
pub fn layout_page(
    banner: &Banner,
    page_index: u32,
    geometry: &PageGeometry,
    measurer: &dyn TextMeasurer,
) -> PageLayout {
    let total_pages = banner.total_pages();

    let texts = banner
        .all_elements()
        .filter_map(|e| place_text(e, page_index, total_pages, geometry, measurer))
        .collect();

    let borders = banner
        .decorative
        .borders
        .iter()
        .flat_map(|b| {
            border_paths_for_page(b, &banner.dimensions, page_index, total_pages, geometry.dpi)
        })
        .collect();

    let emojis = emojis_for_page(&banner.decorative.emojis, page_index, total_pages)
        .into_iter()
        .map(|e| PlacedEmoji {
            x: e.x * geometry.page_width,
            y: e.y * geometry.page_height,
            size: geometry.scale(e.size),
            id: e.id,
            glyph: e.glyph,
            rotation: e.rotation,
        })
        .collect();

    PageLayout {
        page_index,
        total_pages,
        width: geometry.page_width,
        height: geometry.page_height,
        background_color: banner.background_color.clone(),
        texts,
        borders,
        emojis,
    }
}

/// Layout for every page of the banner, in page order.
pub fn layout_banner(
    banner: &Banner,
    geometry: &PageGeometry,
    measurer: &dyn TextMeasurer,
) -> Vec<PageLayout> {
    (0..banner.total_pages())
        .map(|i| layout_page(banner, i, geometry, measurer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BuiltinMetrics, NullMeasurer};
    use crate::model::Banner;

    fn element(x: f64, font_size: f64) -> TextElement {
        TextElement {
            id: "t1".into(),
            text: "WELCOME".into(),
            font_size,
            font_family: "Georgia".into(),
            color: "#000000".into(),
            x,
            y: 0.5,
            rotation: 0.0,
            outline: false,
        }
    }

    #[test]
    fn single_page_is_the_degenerate_case() {
        let geometry = PageGeometry::preview();
        let placed = place_text(&element(0.5, 300.0), 0, 1, &geometry, &BuiltinMetrics::new())
            .expect("visible on the only page");
        assert!((placed.x - geometry.page_width / 2.0).abs() < 1e-9);
        assert!((placed.y - geometry.page_height / 2.0).abs() < 1e-9);
    }

    #[test]
    fn global_center_lands_on_middle_page_center() {
        // Three pages, x = 0.5: absolute center of the banner is the center
        // of page index 1.
        let geometry = PageGeometry::preview();
        let placed = place_text(&element(0.5, 300.0), 1, 3, &geometry, &BuiltinMetrics::new())
            .expect("visible on middle page");
        assert!((placed.x - geometry.page_width / 2.0).abs() < 1e-9);

        // On page 0 the same element sits 1.5 page-widths in, off the right
        // edge.
        let on_first = place_text(&element(0.5, 300.0), 0, 3, &geometry, &BuiltinMetrics::new());
        if let Some(p) = on_first {
            assert!((p.x - 1.5 * geometry.page_width).abs() < 1e-9);
        }
    }

    #[test]
    fn local_positions_reconstruct_the_global_offset() {
        let geometry = PageGeometry::preview();
        let w = geometry.page_width;
        for &total in &[1u32, 2, 3, 6] {
            for &x in &[0.0, 0.17, 0.5, 0.83, 1.0] {
                let e = element(x, 300.0);
                for page in 0..total {
                    // Force placement by using the sentinel measurer so
                    // nothing is culled.
                    let placed = place_text(&e, page, total, &geometry, &NullMeasurer).unwrap();
                    let reconstructed = placed.x + page as f64 * w;
                    let expected = x * w * total as f64;
                    assert!(
                        (reconstructed - expected).abs() < 1e-9,
                        "drift at x={x} page={page}/{total}"
                    );
                }
            }
        }
    }

    #[test]
    fn distant_pages_cull_small_text() {
        let geometry = PageGeometry::preview();
        // Six pages, small text pinned to the far left: the last page is
        // five page-widths away, beyond slack.
        let e = TextElement {
            text: "HI".into(),
            ..element(0.0, 100.0)
        };
        let placed = place_text(&e, 5, 6, &geometry, &BuiltinMetrics::new());
        assert!(placed.is_none());
    }

    #[test]
    fn zero_width_means_always_visible() {
        let geometry = PageGeometry::preview();
        for page in 0..6 {
            assert!(place_text(&element(0.0, 450.0), page, 6, &geometry, &NullMeasurer).is_some());
        }
    }

    #[test]
    fn font_size_scales_with_geometry() {
        let e = element(0.5, 300.0);
        let preview = place_text(&e, 0, 1, &PageGeometry::preview(), &NullMeasurer).unwrap();
        let export = place_text(&e, 0, 1, &PageGeometry::export(), &NullMeasurer).unwrap();
        assert_eq!(preview.font_size, 300.0);
        assert_eq!(export.font_size, 225.0); // 300 × 72/96
    }

    #[test]
    fn layout_page_collects_all_element_kinds() {
        let banner = Banner::empty("Test", None)
            .add_text_element("PARTY", 1, &NullMeasurer)
            .unwrap()
            .add_border("solid-thin", crate::model::BorderPosition::All, 0.25)
            .unwrap()
            .add_emoji("🎉", 0.25, 0.2, 48.0, 0.0);

        let layout = layout_page(
            &banner,
            0,
            &PageGeometry::preview(),
            &BuiltinMetrics::new(),
        );
        assert_eq!(layout.texts.len(), 1);
        assert_eq!(layout.borders.len(), 4);
        assert_eq!(layout.emojis.len(), 1);
        assert_eq!(layout.width, 1056.0);
        assert_eq!(layout.height, 816.0);
    }
}
