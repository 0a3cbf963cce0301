//! # SVG Preview Renderer
//!
//! Renders one SVG document per page at preview resolution (96dpi CSS
//! pixels, 1056×816). Every position comes straight out of the shared page
//! layout; this module only translates placed primitives into SVG markup.
//!
//! The per-primitive fragment functions are public within the crate so the
//! HTML print view can embed the same markup as an inline overlay and stay
//! pixel-identical with the preview.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::fonts;
use crate::layout::{self, BorderPath, PageGeometry, PageLayout, PlacedEmoji, PlacedText};
use crate::metrics::TextMeasurer;
use crate::model::Banner;

/// Render every page of the banner as a standalone SVG document.
pub fn render_svg_pages(banner: &Banner, measurer: &dyn TextMeasurer) -> Vec<String> {
    let geometry = PageGeometry::preview();
    layout::layout_banner(banner, &geometry, measurer)
        .iter()
        .map(render_page_svg)
        .collect()
}

/// Render a single page layout as a standalone SVG document.
pub fn render_page_svg(layout: &PageLayout) -> String {
    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    ));
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        layout.width,
        layout.height,
        xml_escape(&layout.background_color),
    ));

    for border in &layout.borders {
        svg.push_str(&border_fragment(border));
    }
    for text in &layout.texts {
        svg.push_str(&text_fragment(text));
    }
    for emoji in &layout.emojis {
        svg.push_str(&emoji_fragment(emoji));
    }

    svg.push_str("</svg>");
    svg
}

/// SVG markup for one placed text run, centered on its (x, y).
pub(crate) fn text_fragment(text: &PlacedText) -> String {
    let transform = if text.rotation != 0.0 {
        format!(
            r#" transform="rotate({} {} {})""#,
            text.rotation, text.x, text.y
        )
    } else {
        String::new()
    };

    let paint = if text.outline {
        format!(
            r#"fill="none" stroke="{}" stroke-width="{}""#,
            xml_escape(&text.color),
            outline_stroke_width(text.font_size),
        )
    } else {
        format!(r#"fill="{}""#, xml_escape(&text.color))
    };

    format!(
        r#"<text x="{x}" y="{y}" font-size="{size}" font-family="{family}" {paint} text-anchor="middle" dominant-baseline="central"{transform}>{content}</text>"#,
        x = text.x,
        y = text.y,
        size = text.font_size,
        family = xml_escape(&fonts::css_stack(&text.font_family)),
        content = xml_escape(&text.text),
    )
}

/// SVG markup for one border primitive.
pub(crate) fn border_fragment(path: &BorderPath) -> String {
    match path {
        BorderPath::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
            dash,
        } => {
            let dasharray = match dash {
                Some([on, off]) => format!(r#" stroke-dasharray="{on},{off}""#),
                None => String::new(),
            };
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{thickness}"{dasharray}/>"#,
                xml_escape(color),
            )
        }
        BorderPath::Glyph { glyph, x, y, size } => format!(
            r#"<text x="{x}" y="{y}" font-size="{size}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            xml_escape(glyph),
        ),
        BorderPath::Image {
            markup,
            x,
            y,
            width,
            height,
        } => format!(
            r#"<image x="{x}" y="{y}" width="{width}" height="{height}" href="data:image/svg+xml;base64,{}"/>"#,
            BASE64.encode(markup.as_bytes()),
        ),
    }
}

/// SVG markup for one placed emoji, centered on its (x, y).
pub(crate) fn emoji_fragment(emoji: &PlacedEmoji) -> String {
    let transform = if emoji.rotation != 0.0 {
        format!(
            r#" transform="rotate({} {} {})""#,
            emoji.rotation, emoji.x, emoji.y
        )
    } else {
        String::new()
    };
    format!(
        r#"<text x="{x}" y="{y}" font-size="{size}" text-anchor="middle" dominant-baseline="central"{transform}>{glyph}</text>"#,
        x = emoji.x,
        y = emoji.y,
        size = emoji.size,
        glyph = xml_escape(&emoji.glyph),
    )
}

/// Stroke width for outline (ink saver) text, proportional to the type size
/// so large banner letters keep a visible rim.
pub(crate) fn outline_stroke_width(font_size: f64) -> f64 {
    (font_size / 100.0).max(2.0)
}

/// Escape the five XML special characters for element content and
/// double-quoted attribute values.
pub(crate) fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::NullMeasurer;
    use crate::model::BorderPosition;

    #[test]
    fn one_document_per_page() {
        let banner = Banner::empty("Test", None).add_page().add_page();
        let pages = render_svg_pages(&banner, &NullMeasurer);
        assert_eq!(pages.len(), 3);
        for page in &pages {
            assert!(page.starts_with("<svg"));
            assert!(page.ends_with("</svg>"));
            assert!(page.contains(r#"width="1056""#));
            assert!(page.contains(r#"height="816""#));
        }
    }

    #[test]
    fn background_rect_comes_first() {
        let mut banner = Banner::empty("Test", None);
        banner.background_color = "#fef3c7".into();
        let page = &render_svg_pages(&banner, &NullMeasurer)[0];
        assert!(page.contains(r##"fill="#fef3c7""##));
    }

    #[test]
    fn text_is_centered_and_escaped() {
        let banner = Banner::empty("Test", None)
            .add_text_element("CHIPS & SALSA", 1, &NullMeasurer)
            .unwrap();
        let page = &render_svg_pages(&banner, &NullMeasurer)[0];
        assert!(page.contains("CHIPS &amp; SALSA"));
        assert!(page.contains(r#"text-anchor="middle""#));
        assert!(page.contains(r#"dominant-baseline="central""#));
    }

    #[test]
    fn outline_text_strokes_instead_of_filling() {
        let banner = Banner::empty("Test", None)
            .add_text_element("SAVE INK", 1, &NullMeasurer)
            .unwrap()
            .toggle_ink_saver();
        let page = &render_svg_pages(&banner, &NullMeasurer)[0];
        assert!(page.contains(r#"fill="none""#));
        assert!(page.contains(r##"stroke="#000000""##));
    }

    #[test]
    fn rotation_emits_a_transform() {
        let banner = Banner::empty("Test", None)
            .add_text_element("TILT", 1, &NullMeasurer)
            .unwrap();
        let id = banner.pages[0].elements[0].id.clone();
        let banner = banner.update_text_element(
            &id,
            crate::model::TextElementPatch {
                rotation: Some(15.0),
                ..Default::default()
            },
        );
        let page = &render_svg_pages(&banner, &NullMeasurer)[0];
        assert!(page.contains("rotate(15"));
    }

    #[test]
    fn dashed_border_carries_a_dasharray() {
        let banner = Banner::empty("Test", None)
            .add_border("dashed", BorderPosition::Top, 0.25)
            .unwrap();
        let page = &render_svg_pages(&banner, &NullMeasurer)[0];
        assert!(page.contains(r#"stroke-dasharray="5,5""#));
    }

    #[test]
    fn pattern_border_embeds_a_data_uri() {
        let banner = Banner::empty("Test", None)
            .add_border("flower-vine-svg", BorderPosition::Top, 0.25)
            .unwrap();
        let page = &render_svg_pages(&banner, &NullMeasurer)[0];
        assert!(page.contains("data:image/svg+xml;base64,"));
    }

    #[test]
    fn emoji_renders_as_text_node() {
        let banner = Banner::empty("Test", None).add_emoji("🎉", 0.25, 0.2, 48.0, 0.0);
        let page = &render_svg_pages(&banner, &NullMeasurer)[0];
        assert!(page.contains("🎉"));
        assert!(page.contains(r#"font-size="48""#));
    }
}
