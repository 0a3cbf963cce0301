//! # Banner Model
//!
//! The data entities of a banner and the invariant-preserving operations on
//! them. A banner is a single logical artifact — one coordinate space running
//! across every physical page — and the model never splits content between
//! pages itself: text elements carry a *global* x position (a fraction of the
//! entire banner width) and multi-page visibility is computed at render time
//! by the layout module.
//!
//! Every mutator takes the banner by reference and returns a new value.
//! Nothing here mutates in place, which keeps upstream state management a
//! simple last-write-wins affair with no partial states observable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PennantError;
use crate::estimate;
use crate::metrics::TextMeasurer;

/// Physical page width of the fixed landscape sheet, in inches.
pub const PAGE_WIDTH_IN: f64 = 11.0;
/// Physical page height of the fixed landscape sheet, in inches.
pub const PAGE_HEIGHT_IN: f64 = 8.5;

/// Font sizes in the model are print-resolution sizes. Editing UIs divide by
/// this factor to get an on-screen control size.
pub const DISPLAY_SCALE: f64 = 3.0;

/// Measurement unit for banner dimensions and border margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "in")]
    In,
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "px")]
    Px,
}

impl Unit {
    /// Convert a value in this unit to device pixels at the given dpi.
    /// Pixel values pass through unchanged.
    pub fn to_device_px(&self, value: f64, dpi: f64) -> f64 {
        match self {
            Unit::In => value * dpi,
            Unit::Cm => value / 2.54 * dpi,
            Unit::Px => value,
        }
    }
}

/// The banner's nominal size attribute.
///
/// Pagination and rendering always tile onto the fixed 11×8.5in landscape
/// sheet ([`PAGE_WIDTH_IN`]/[`PAGE_HEIGHT_IN`]); these dimensions describe the
/// banner itself and feed border-margin conversion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerDimensions {
    pub width: f64,
    pub height: f64,
    pub unit: Unit,
}

impl Default for BannerDimensions {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH_IN,
            height: PAGE_HEIGHT_IN,
            unit: Unit::In,
        }
    }
}

/// A run of banner text.
///
/// `x` is a fraction of the ENTIRE banner width (0 = left edge of the first
/// page, 1 = right edge of the last page). `y` is page-local and identical on
/// every page. `font_size` is a print-resolution size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: String,
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    /// Hex color string, e.g. "#dc2626". Malformed values render as black.
    pub color: String,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Stroke-only rendering (ink saver).
    pub outline: bool,
}

/// A partial update for a text element. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TextElementPatch {
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub color: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub outline: Option<bool>,
}

/// One physical sheet's worth of content. Page numbers are 1-based and
/// contiguous; element order is insertion order (z-order tie-break only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_number: u32,
    pub elements: Vec<TextElement>,
}

/// Which page edge(s) a border decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderPosition {
    Top,
    Bottom,
    Left,
    Right,
    All,
}

/// The shape class of a border, dispatched by a single match in the border
/// layout engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BorderKind {
    Solid {
        thickness: f64,
    },
    Dashed {
        thickness: f64,
    },
    Dotted {
        thickness: f64,
    },
    /// A single glyph tiled along the edge at fixed spacing.
    Glyph {
        glyph: String,
        spacing: f64,
    },
    /// A vector motif tiled along the edge. `markup_vertical`, when present,
    /// is used for left/right runs where the horizontal motif would tile
    /// sideways.
    Pattern {
        markup: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        markup_vertical: Option<String>,
        spacing: f64,
    },
}

/// A named border style from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderStyle {
    pub id: String,
    pub name: String,
    pub color: String,
    pub kind: BorderKind,
}

/// A border attached to a banner. Disabled borders stay in the model but
/// produce no drawables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    pub id: String,
    pub style: BorderStyle,
    pub position: BorderPosition,
    /// Distance from the physical page edge, in the banner's declared unit.
    pub margin: f64,
    pub enabled: bool,
}

/// A free-floating decorative emoji. `x` is global across the whole banner,
/// like text; `y` is page-local. Unlike text, an emoji belongs to exactly one
/// page — assignment happens in the layout module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    pub id: String,
    pub glyph: String,
    pub x: f64,
    pub y: f64,
    /// Print-resolution glyph size.
    pub size: f64,
    pub rotation: f64,
}

/// Decorations owned by the banner, independent of any page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Decorative {
    pub borders: Vec<Border>,
    pub emojis: Vec<Emoji>,
}

/// The complete user-authored artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub dimensions: BannerDimensions,
    pub pages: Vec<Page>,
    pub background_color: String,
    pub ink_saver_mode: bool,
    pub decorative: Decorative,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_FONT_FAMILY: &str = "Georgia";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl Banner {
    /// Create an empty banner with a single blank page.
    pub fn empty(title: &str, dimensions: Option<BannerDimensions>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: title.to_string(),
            dimensions: dimensions.unwrap_or_default(),
            pages: vec![Page {
                page_number: 1,
                elements: vec![],
            }],
            background_color: DEFAULT_BACKGROUND.to_string(),
            ink_saver_mode: false,
            decorative: Decorative::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a banner pre-populated with a single centered text element.
    ///
    /// The font size is chosen automatically from the text length and enough
    /// pages are created up front to fit the estimated width. The element is
    /// owned by page 1; rendering spreads it across pages.
    pub fn with_text(
        title: &str,
        text: &str,
        dimensions: Option<BannerDimensions>,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let mut banner = Self::empty(title, dimensions);

        let font_size = estimate::optimal_font_size(text);
        let required = estimate::estimate_pages(text, font_size, DEFAULT_FONT_FAMILY, measurer);
        for n in 2..=required {
            banner.pages.push(Page {
                page_number: n,
                elements: vec![],
            });
        }

        banner.pages[0].elements.push(TextElement {
            id: generate_id(),
            text: text.to_string(),
            font_size,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            x: 0.5,
            y: 0.5,
            rotation: 0.0,
            outline: false,
        });

        banner
    }

    /// Number of physical pages. Always ≥ 1.
    pub fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    /// All text elements across all pages, in page order.
    pub fn all_elements(&self) -> impl Iterator<Item = &TextElement> {
        self.pages.iter().flat_map(|p| p.elements.iter())
    }

    /// Add a text element to the given page, growing the banner first so it
    /// has at least as many pages as the text's estimated requirement.
    pub fn add_text_element(
        &self,
        text: &str,
        page_number: u32,
        measurer: &dyn TextMeasurer,
    ) -> Result<Banner, PennantError> {
        let mut banner = self.clone();

        let font_size = estimate::optimal_font_size(text);
        let required = estimate::estimate_pages(text, font_size, DEFAULT_FONT_FAMILY, measurer);
        while (banner.pages.len() as u32) < required {
            let next = banner.pages.len() as u32 + 1;
            banner.pages.push(Page {
                page_number: next,
                elements: vec![],
            });
        }

        let element = TextElement {
            id: generate_id(),
            text: text.to_string(),
            font_size,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            x: 0.5,
            y: 0.5,
            rotation: 0.0,
            outline: self.ink_saver_mode,
        };

        let page = banner
            .pages
            .iter_mut()
            .find(|p| p.page_number == page_number)
            .ok_or(PennantError::PageNotFound(page_number))?;
        page.elements.push(element);

        banner.updated_at = Utc::now();
        Ok(banner)
    }

    /// Apply a partial update to the element with the given id, wherever it
    /// lives. Unknown ids leave the banner unchanged apart from identity.
    pub fn update_text_element(&self, element_id: &str, patch: TextElementPatch) -> Banner {
        let mut banner = self.clone();

        'pages: for page in &mut banner.pages {
            for element in &mut page.elements {
                if element.id == element_id {
                    if let Some(text) = patch.text {
                        element.text = text;
                    }
                    if let Some(font_size) = patch.font_size {
                        element.font_size = font_size;
                    }
                    if let Some(font_family) = patch.font_family {
                        element.font_family = font_family;
                    }
                    if let Some(color) = patch.color {
                        element.color = color;
                    }
                    if let Some(x) = patch.x {
                        element.x = x;
                    }
                    if let Some(y) = patch.y {
                        element.y = y;
                    }
                    if let Some(rotation) = patch.rotation {
                        element.rotation = rotation;
                    }
                    if let Some(outline) = patch.outline {
                        element.outline = outline;
                    }
                    banner.updated_at = Utc::now();
                    break 'pages;
                }
            }
        }

        banner
    }

    /// Flip ink-saver mode, updating the banner flag and every element's
    /// outline flag in the same operation.
    pub fn toggle_ink_saver(&self) -> Banner {
        let mut banner = self.clone();
        banner.ink_saver_mode = !banner.ink_saver_mode;
        for page in &mut banner.pages {
            for element in &mut page.elements {
                element.outline = banner.ink_saver_mode;
            }
        }
        banner.updated_at = Utc::now();
        banner
    }

    /// Attach a border from the style catalog. `margin` is in the banner's
    /// declared unit.
    pub fn add_border(
        &self,
        style_id: &str,
        position: BorderPosition,
        margin: f64,
    ) -> Result<Banner, PennantError> {
        let style = BorderStyle::by_id(style_id)
            .ok_or_else(|| PennantError::UnknownBorderStyle(style_id.to_string()))?;

        let mut banner = self.clone();
        banner.decorative.borders.push(Border {
            id: generate_id(),
            style,
            position,
            margin,
            enabled: true,
        });
        banner.updated_at = Utc::now();
        Ok(banner)
    }

    /// Attach a free-floating decorative emoji.
    pub fn add_emoji(&self, glyph: &str, x: f64, y: f64, size: f64, rotation: f64) -> Banner {
        let mut banner = self.clone();
        banner.decorative.emojis.push(Emoji {
            id: generate_id(),
            glyph: glyph.to_string(),
            x,
            y,
            size,
            rotation,
        });
        banner.updated_at = Utc::now();
        banner
    }

    /// Append one empty page after the current last page.
    pub fn add_page(&self) -> Banner {
        let mut banner = self.clone();
        let next = banner
            .pages
            .iter()
            .map(|p| p.page_number)
            .max()
            .unwrap_or(0)
            + 1;
        banner.pages.push(Page {
            page_number: next,
            elements: vec![],
        });
        banner.updated_at = Utc::now();
        banner
    }

    /// Replace the border and/or emoji lists wholesale.
    pub fn update_decorative(
        &self,
        borders: Option<Vec<Border>>,
        emojis: Option<Vec<Emoji>>,
    ) -> Banner {
        let mut banner = self.clone();
        if let Some(borders) = borders {
            banner.decorative.borders = borders;
        }
        if let Some(emojis) = emojis {
            banner.decorative.emojis = emojis;
        }
        banner.updated_at = Utc::now();
        banner
    }
}

impl BorderStyle {
    /// The built-in border style catalog.
    pub fn catalog() -> Vec<BorderStyle> {
        vec![
            BorderStyle {
                id: "solid-thin".into(),
                name: "Thin Line".into(),
                color: "#000000".into(),
                kind: BorderKind::Solid { thickness: 1.0 },
            },
            BorderStyle {
                id: "solid-thick".into(),
                name: "Thick Line".into(),
                color: "#000000".into(),
                kind: BorderKind::Solid { thickness: 3.0 },
            },
            BorderStyle {
                id: "dashed".into(),
                name: "Dashed Line".into(),
                color: "#000000".into(),
                kind: BorderKind::Dashed { thickness: 2.0 },
            },
            BorderStyle {
                id: "dotted".into(),
                name: "Dotted Line".into(),
                color: "#000000".into(),
                kind: BorderKind::Dotted { thickness: 2.0 },
            },
            BorderStyle {
                id: "star-pattern".into(),
                name: "Star Border".into(),
                color: "#000000".into(),
                kind: BorderKind::Glyph {
                    glyph: "⭐".into(),
                    spacing: 30.0,
                },
            },
            BorderStyle {
                id: "heart-pattern".into(),
                name: "Heart Border".into(),
                color: "#000000".into(),
                kind: BorderKind::Glyph {
                    glyph: "❤️".into(),
                    spacing: 25.0,
                },
            },
            BorderStyle {
                id: "flower-pattern".into(),
                name: "Flower Border".into(),
                color: "#000000".into(),
                kind: BorderKind::Glyph {
                    glyph: "🌸".into(),
                    spacing: 35.0,
                },
            },
            BorderStyle {
                id: "celebration-pattern".into(),
                name: "Celebration Border".into(),
                color: "#000000".into(),
                kind: BorderKind::Glyph {
                    glyph: "🎉".into(),
                    spacing: 30.0,
                },
            },
            BorderStyle {
                id: "flower-vine-svg".into(),
                name: "Flower Vine".into(),
                color: "#4CAF50".into(),
                kind: BorderKind::Pattern {
                    markup: FLOWER_VINE_H.into(),
                    markup_vertical: Some(FLOWER_VINE_V.into()),
                    spacing: 40.0,
                },
            },
        ]
    }

    /// Look up a catalog style by id.
    pub fn by_id(id: &str) -> Option<BorderStyle> {
        Self::catalog().into_iter().find(|s| s.id == id)
    }
}

const FLOWER_VINE_H: &str = r##"<svg width="40" height="40" viewBox="0 0 40 40" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M2 20 Q10 2, 20 20 T38 20" stroke="#4CAF50" stroke-width="2" fill="none"/><circle cx="10" cy="14" r="2" fill="#FF69B4"/><circle cx="20" cy="20" r="2.5" fill="#FFD700"/><circle cx="30" cy="14" r="2" fill="#FF69B4"/></svg>"##;

const FLOWER_VINE_V: &str = r##"<svg width="40" height="40" viewBox="0 0 40 40" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M20 2 Q38 10, 20 20 T20 38" stroke="#4CAF50" stroke-width="2" fill="none"/><circle cx="14" cy="10" r="2" fill="#FF69B4"/><circle cx="20" cy="20" r="2.5" fill="#FFD700"/><circle cx="14" cy="30" r="2" fill="#FF69B4"/></svg>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::NullMeasurer;

    #[test]
    fn empty_banner_has_one_page() {
        let banner = Banner::empty("Test", None);
        assert_eq!(banner.total_pages(), 1);
        assert_eq!(banner.pages[0].page_number, 1);
        assert!(banner.pages[0].elements.is_empty());
    }

    #[test]
    fn page_numbers_stay_contiguous() {
        let banner = Banner::empty("Test", None).add_page().add_page();
        let numbers: Vec<u32> = banner.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn add_text_element_without_metrics_assumes_one_page() {
        let banner = Banner::empty("Test", None);
        let banner = banner
            .add_text_element("A VERY LONG BANNER MESSAGE INDEED", 1, &NullMeasurer)
            .unwrap();
        assert_eq!(banner.total_pages(), 1);
        assert_eq!(banner.pages[0].elements.len(), 1);
    }

    #[test]
    fn add_text_element_to_missing_page_fails() {
        let banner = Banner::empty("Test", None);
        let err = banner.add_text_element("HI", 7, &NullMeasurer).unwrap_err();
        assert!(matches!(err, PennantError::PageNotFound(7)));
    }

    #[test]
    fn ink_saver_toggle_is_atomic() {
        let banner = Banner::empty("Test", None)
            .add_text_element("ONE", 1, &NullMeasurer)
            .unwrap()
            .add_text_element("TWO", 1, &NullMeasurer)
            .unwrap();
        let toggled = banner.toggle_ink_saver();

        assert!(toggled.ink_saver_mode);
        assert!(toggled.all_elements().all(|e| e.outline));
        // Input untouched
        assert!(!banner.ink_saver_mode);
        assert!(banner.all_elements().all(|e| !e.outline));
    }

    #[test]
    fn ink_saver_toggle_is_an_involution() {
        let banner = Banner::empty("Test", None)
            .add_text_element("HELLO", 1, &NullMeasurer)
            .unwrap();
        let twice = banner.toggle_ink_saver().toggle_ink_saver();
        assert_eq!(twice.ink_saver_mode, banner.ink_saver_mode);
        for (a, b) in twice.all_elements().zip(banner.all_elements()) {
            assert_eq!(a.outline, b.outline);
        }
    }

    #[test]
    fn new_elements_inherit_ink_saver_mode() {
        let banner = Banner::empty("Test", None).toggle_ink_saver();
        let banner = banner.add_text_element("HI", 1, &NullMeasurer).unwrap();
        assert!(banner.pages[0].elements[0].outline);
    }

    #[test]
    fn unknown_border_style_fails_fast() {
        let banner = Banner::empty("Test", None);
        let err = banner
            .add_border("no-such-style", BorderPosition::All, 0.5)
            .unwrap_err();
        assert!(matches!(err, PennantError::UnknownBorderStyle(_)));
    }

    #[test]
    fn add_border_resolves_catalog_style() {
        let banner = Banner::empty("Test", None)
            .add_border("dashed", BorderPosition::Top, 0.25)
            .unwrap();
        let border = &banner.decorative.borders[0];
        assert!(border.enabled);
        assert_eq!(border.position, BorderPosition::Top);
        assert!(matches!(border.style.kind, BorderKind::Dashed { thickness } if thickness == 2.0));
    }

    #[test]
    fn update_text_element_patches_in_place() {
        let banner = Banner::empty("Test", None)
            .add_text_element("HELLO", 1, &NullMeasurer)
            .unwrap();
        let id = banner.pages[0].elements[0].id.clone();
        let updated = banner.update_text_element(
            &id,
            TextElementPatch {
                y: Some(0.4),
                color: Some("#dc2626".into()),
                ..Default::default()
            },
        );
        let element = &updated.pages[0].elements[0];
        assert_eq!(element.y, 0.4);
        assert_eq!(element.color, "#dc2626");
        assert_eq!(element.text, "HELLO");
    }

    #[test]
    fn unit_conversions() {
        assert_eq!(Unit::In.to_device_px(11.0, 96.0), 1056.0);
        assert_eq!(Unit::In.to_device_px(0.5, 72.0), 36.0);
        assert!((Unit::Cm.to_device_px(2.54, 96.0) - 96.0).abs() < 1e-9);
        assert_eq!(Unit::Px.to_device_px(40.0, 72.0), 40.0);
    }

    #[test]
    fn banner_json_round_trip() {
        let banner = Banner::empty("Round Trip", None)
            .add_border("star-pattern", BorderPosition::All, 0.25)
            .unwrap()
            .add_emoji("🎉", 0.75, 0.2, 48.0, 0.0);
        let json = serde_json::to_string(&banner).unwrap();
        let back: Banner = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, banner.id);
        assert_eq!(back.decorative.borders.len(), 1);
        assert_eq!(back.decorative.emojis[0].glyph, "🎉");
    }
}
