//! # Font Catalog
//!
//! The families a banner may reference, with CSS fallback stacks and the
//! category-driven mapping onto the standard PDF base fonts. Font *metrics*
//! live behind the measurement trait in [`crate::metrics`]; this module is
//! only the naming layer.

use serde::{Deserialize, Serialize};

/// Broad typographic class of a family. Drives both the builtin width
/// tables and the PDF base-font substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontCategory {
    Serif,
    SansSerif,
    Display,
    Handwriting,
    Monospace,
}

/// A font family known to the catalog.
#[derive(Debug, Clone, Copy)]
pub struct SystemFont {
    pub family: &'static str,
    pub fallbacks: &'static [&'static str],
    pub category: FontCategory,
}

/// The built-in family catalog.
pub const SYSTEM_FONTS: &[SystemFont] = &[
    // Serif
    SystemFont {
        family: "Georgia",
        fallbacks: &["Times New Roman", "Times", "serif"],
        category: FontCategory::Serif,
    },
    SystemFont {
        family: "Times New Roman",
        fallbacks: &["Times", "Georgia", "serif"],
        category: FontCategory::Serif,
    },
    SystemFont {
        family: "Book Antiqua",
        fallbacks: &["Palatino", "Georgia", "serif"],
        category: FontCategory::Serif,
    },
    SystemFont {
        family: "Palatino",
        fallbacks: &["Book Antiqua", "Georgia", "serif"],
        category: FontCategory::Serif,
    },
    // Sans-serif
    SystemFont {
        family: "Arial",
        fallbacks: &["Helvetica", "sans-serif"],
        category: FontCategory::SansSerif,
    },
    SystemFont {
        family: "Helvetica",
        fallbacks: &["Arial", "sans-serif"],
        category: FontCategory::SansSerif,
    },
    SystemFont {
        family: "Verdana",
        fallbacks: &["Tahoma", "Arial", "sans-serif"],
        category: FontCategory::SansSerif,
    },
    SystemFont {
        family: "Tahoma",
        fallbacks: &["Verdana", "Arial", "sans-serif"],
        category: FontCategory::SansSerif,
    },
    SystemFont {
        family: "Trebuchet MS",
        fallbacks: &["Verdana", "Arial", "sans-serif"],
        category: FontCategory::SansSerif,
    },
    // Display
    SystemFont {
        family: "Impact",
        fallbacks: &["Arial Black", "Arial", "sans-serif"],
        category: FontCategory::Display,
    },
    SystemFont {
        family: "Arial Black",
        fallbacks: &["Impact", "Arial", "sans-serif"],
        category: FontCategory::Display,
    },
    SystemFont {
        family: "Franklin Gothic Medium",
        fallbacks: &["Arial", "sans-serif"],
        category: FontCategory::Display,
    },
    // Handwriting
    SystemFont {
        family: "Brush Script MT",
        fallbacks: &["Comic Sans MS", "cursive"],
        category: FontCategory::Handwriting,
    },
    SystemFont {
        family: "Comic Sans MS",
        fallbacks: &["Brush Script MT", "cursive"],
        category: FontCategory::Handwriting,
    },
    // Monospace
    SystemFont {
        family: "Courier New",
        fallbacks: &["Lucida Console", "monospace"],
        category: FontCategory::Monospace,
    },
    SystemFont {
        family: "Lucida Console",
        fallbacks: &["Courier New", "monospace"],
        category: FontCategory::Monospace,
    },
];

/// Look up a catalog entry by family name.
pub fn lookup(family: &str) -> Option<&'static SystemFont> {
    SYSTEM_FONTS.iter().find(|f| f.family == family)
}

/// Category of a family, defaulting to sans-serif for unknown names.
pub fn category_of(family: &str) -> FontCategory {
    lookup(family)
        .map(|f| f.category)
        .unwrap_or(FontCategory::SansSerif)
}

/// Full CSS font stack for a family: the family itself plus its fallbacks.
pub fn css_stack(family: &str) -> String {
    match lookup(family) {
        Some(font) => {
            let mut parts = vec![quote_css(font.family)];
            parts.extend(font.fallbacks.iter().map(|f| quote_css(f)));
            parts.join(", ")
        }
        None => format!("{}, sans-serif", quote_css(family)),
    }
}

fn quote_css(name: &str) -> String {
    if name.contains(' ') {
        format!("'{}'", name)
    } else {
        name.to_string()
    }
}

/// Map a family onto one of the standard PDF base fonts by category:
/// serif families to Times, monospace to Courier, everything else to
/// Helvetica.
pub fn pdf_base_font(family: &str) -> &'static str {
    match category_of(family) {
        FontCategory::Serif => "Times-Roman",
        FontCategory::Monospace => "Courier",
        _ => "Helvetica",
    }
}
