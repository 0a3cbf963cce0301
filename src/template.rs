//! # Banner Templates
//!
//! Pre-authored starting points: a catalog of template descriptors plus a
//! builder that instantiates a full [`Banner`] from one. Templates carry
//! their own font sizes and placements (they were tuned by hand, not through
//! the size heuristic), but the page count still comes from the estimator so
//! a template opens with enough sheets for its widest line.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PennantError;
use crate::estimate;
use crate::metrics::TextMeasurer;
use crate::model::{Banner, BannerDimensions, BorderPosition, Page, TextElement};

/// Broad grouping used by template pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Welcome,
    Celebration,
    Announcement,
    Custom,
}

/// Descriptor for one template, as shown in a template picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub default_text: String,
}

/// The built-in template catalog, in display order.
pub fn all_templates() -> Vec<Template> {
    vec![
        Template {
            id: "welcome-home".into(),
            name: "Welcome Home".into(),
            description: "Two-line welcome with hearts and a warm red accent".into(),
            category: TemplateCategory::Welcome,
            default_text: "WELCOME HOME!".into(),
        },
        Template {
            id: "congratulations".into(),
            name: "Congratulations".into(),
            description: "Single bold line with a star border".into(),
            category: TemplateCategory::Celebration,
            default_text: "CONGRATULATIONS!".into(),
        },
        Template {
            id: "happy-birthday".into(),
            name: "Happy Birthday".into(),
            description: "Two-line birthday greeting with cake and balloons".into(),
            category: TemplateCategory::Celebration,
            default_text: "HAPPY BIRTHDAY!".into(),
        },
        Template {
            id: "party-time".into(),
            name: "Party Time".into(),
            description: "Loud display type and confetti on every corner".into(),
            category: TemplateCategory::Celebration,
            default_text: "PARTY TIME!".into(),
        },
        Template {
            id: "blank".into(),
            name: "Blank Banner".into(),
            description: "Start from an empty page".into(),
            category: TemplateCategory::Custom,
            default_text: String::new(),
        },
    ]
}

/// Look up a template descriptor by id.
pub fn template_by_id(id: &str) -> Option<Template> {
    all_templates().into_iter().find(|t| t.id == id)
}

/// A text line as a template authors it, before it becomes an element.
struct TemplateLine {
    text: &'static str,
    font_size: f64,
    font_family: &'static str,
    color: &'static str,
    y: f64,
}

fn line_element(line: &TemplateLine) -> TextElement {
    TextElement {
        id: Uuid::new_v4().to_string(),
        text: line.text.to_string(),
        font_size: line.font_size,
        font_family: line.font_family.to_string(),
        color: line.color.to_string(),
        x: 0.5,
        y: line.y,
        rotation: 0.0,
        outline: false,
    }
}

/// Build a banner from template lines: the page count is the maximum the
/// estimator asks for across all lines, every line is owned by page 1.
fn banner_from_lines(
    title: &str,
    lines: &[TemplateLine],
    dimensions: Option<BannerDimensions>,
    measurer: &dyn TextMeasurer,
) -> Banner {
    let mut banner = Banner::empty(title, dimensions);

    let required = lines
        .iter()
        .map(|l| estimate::estimate_pages(l.text, l.font_size, l.font_family, measurer))
        .max()
        .unwrap_or(1);
    for n in 2..=required {
        banner.pages.push(Page {
            page_number: n,
            elements: vec![],
        });
    }

    banner.pages[0].elements = lines.iter().map(line_element).collect();
    banner
}

/// Instantiate a banner from a template id.
///
/// Unknown ids fail with [`PennantError::UnknownTemplate`]. The measurer
/// drives the initial page count; under the headless sentinel every template
/// opens as a single page.
pub fn create_from_template(
    template_id: &str,
    dimensions: Option<BannerDimensions>,
    measurer: &dyn TextMeasurer,
) -> Result<Banner, PennantError> {
    let banner = match template_id {
        "welcome-home" => welcome_home(dimensions, measurer)?,
        "congratulations" => congratulations(dimensions, measurer)?,
        "happy-birthday" => happy_birthday(dimensions, measurer)?,
        "party-time" => party_time(dimensions, measurer)?,
        "blank" => Banner::empty("Blank Banner", dimensions),
        other => return Err(PennantError::UnknownTemplate(other.to_string())),
    };
    Ok(banner)
}

fn welcome_home(
    dimensions: Option<BannerDimensions>,
    measurer: &dyn TextMeasurer,
) -> Result<Banner, PennantError> {
    let lines = [
        TemplateLine {
            text: "WELCOME",
            font_size: 252.0,
            font_family: "Georgia",
            color: "#000000",
            y: 0.4,
        },
        TemplateLine {
            text: "HOME!",
            font_size: 252.0,
            font_family: "Georgia",
            color: "#dc2626",
            y: 0.6,
        },
    ];
    let banner = banner_from_lines("Welcome Home", &lines, dimensions, measurer)
        .add_border("heart-pattern", BorderPosition::All, 0.3)?
        .add_emoji("🏠", 0.2, 0.2, 40.0, 0.0)
        .add_emoji("💖", 0.8, 0.2, 36.0, 0.0)
        .add_emoji("🎉", 0.2, 0.8, 32.0, 0.0)
        .add_emoji("✨", 0.8, 0.8, 28.0, 0.0);
    Ok(banner)
}

fn congratulations(
    dimensions: Option<BannerDimensions>,
    measurer: &dyn TextMeasurer,
) -> Result<Banner, PennantError> {
    let lines = [TemplateLine {
        text: "CONGRATULATIONS!",
        font_size: 288.0,
        font_family: "Georgia",
        color: "#059669",
        y: 0.5,
    }];
    let banner = banner_from_lines("Congratulations", &lines, dimensions, measurer)
        .add_border("star-pattern", BorderPosition::All, 0.25)?
        .add_emoji("🏆", 0.15, 0.15, 44.0, 0.0)
        .add_emoji("🎉", 0.85, 0.15, 40.0, 0.0)
        .add_emoji("✨", 0.15, 0.85, 36.0, 0.0)
        .add_emoji("🌟", 0.85, 0.85, 38.0, 0.0);
    Ok(banner)
}

fn happy_birthday(
    dimensions: Option<BannerDimensions>,
    measurer: &dyn TextMeasurer,
) -> Result<Banner, PennantError> {
    let lines = [
        TemplateLine {
            text: "HAPPY",
            font_size: 264.0,
            font_family: "Georgia",
            color: "#7c3aed",
            y: 0.35,
        },
        TemplateLine {
            text: "BIRTHDAY!",
            font_size: 264.0,
            font_family: "Georgia",
            color: "#ec4899",
            y: 0.65,
        },
    ];
    let banner = banner_from_lines("Happy Birthday", &lines, dimensions, measurer)
        .add_border("celebration-pattern", BorderPosition::All, 0.2)?
        .add_emoji("🎂", 0.15, 0.5, 48.0, 0.0)
        .add_emoji("🎈", 0.85, 0.25, 42.0, 0.0)
        .add_emoji("🎁", 0.85, 0.75, 40.0, 0.0)
        .add_emoji("🥳", 0.15, 0.15, 38.0, 0.0)
        .add_emoji("🍰", 0.15, 0.85, 36.0, 0.0);
    Ok(banner)
}

fn party_time(
    dimensions: Option<BannerDimensions>,
    measurer: &dyn TextMeasurer,
) -> Result<Banner, PennantError> {
    let lines = [
        TemplateLine {
            text: "PARTY",
            font_size: 300.0,
            font_family: "Impact",
            color: "#f59e0b",
            y: 0.3,
        },
        TemplateLine {
            text: "TIME!",
            font_size: 300.0,
            font_family: "Impact",
            color: "#8b5cf6",
            y: 0.7,
        },
    ];
    let banner = banner_from_lines("Party Time", &lines, dimensions, measurer)
        .add_border("celebration-pattern", BorderPosition::Top, 0.15)?
        .add_border("star-pattern", BorderPosition::Bottom, 0.15)?
        .add_emoji("🎉", 0.08, 0.12, 45.0, 0.0)
        .add_emoji("🎊", 0.92, 0.12, 42.0, 0.0)
        .add_emoji("🎈", 0.08, 0.5, 40.0, 0.0)
        .add_emoji("🎁", 0.92, 0.5, 38.0, 0.0)
        .add_emoji("🥳", 0.08, 0.88, 44.0, 0.0)
        .add_emoji("✨", 0.92, 0.88, 36.0, 0.0)
        .add_emoji("🌟", 0.25, 0.15, 34.0, 0.0)
        .add_emoji("💫", 0.75, 0.85, 32.0, 0.0);
    Ok(banner)
}
