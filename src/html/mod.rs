//! # HTML Print View
//!
//! A single printable HTML document with one fixed-size page block per
//! banner page, sized for the 11×8.5in landscape sheet at CSS resolution
//! (1056×816). The browser's print dialog does the actual paging; each page
//! block forces a break after itself so the blocks map 1:1 onto sheets.
//!
//! Layout decisions are shared with the other renderers: everything is
//! placed by [`crate::layout`] at preview geometry, and borders and emojis
//! reuse the SVG fragment markup as an inline overlay so print output
//! matches the preview exactly.

use crate::fonts;
use crate::layout::{self, PageGeometry, PageLayout, PlacedText};
use crate::metrics::TextMeasurer;
use crate::model::Banner;
use crate::svg;

/// Render the whole banner as one printable HTML document.
pub fn render_print_html(banner: &Banner, measurer: &dyn TextMeasurer) -> String {
    let geometry = PageGeometry::preview();
    let layouts = layout::layout_banner(banner, &geometry, measurer);

    let mut html = String::with_capacity(8192);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", svg::xml_escape(&banner.title)));
    html.push_str("<style>\n");
    html.push_str(PRINT_CSS);
    html.push_str("</style>\n</head>\n<body>\n");

    let last = layouts.len().saturating_sub(1);
    for (i, layout) in layouts.iter().enumerate() {
        html.push_str(&page_block(layout, i == last));
    }

    html.push_str("</body>\n</html>\n");
    html
}

const PRINT_CSS: &str = "\
@page { size: 11in 8.5in landscape; margin: 0; }
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: sans-serif; }
.page {
  position: relative;
  width: 1056px;
  height: 816px;
  overflow: hidden;
}
.page.break { page-break-after: always; }
.page-text {
  position: absolute;
  white-space: nowrap;
  line-height: 1;
}
.page-overlay {
  position: absolute;
  inset: 0;
  pointer-events: none;
}
";

fn page_block(layout: &PageLayout, is_last: bool) -> String {
    let class = if is_last { "page" } else { "page break" };
    let mut block = format!(
        r#"<div class="{class}" style="background-color: {};">"#,
        svg::xml_escape(&layout.background_color),
    );
    block.push('\n');

    for text in &layout.texts {
        block.push_str(&text_div(text));
        block.push('\n');
    }

    if !layout.borders.is_empty() || !layout.emojis.is_empty() {
        block.push_str(&overlay_svg(layout));
        block.push('\n');
    }

    block.push_str("</div>\n");
    block
}

/// An absolutely positioned text div centered on its layout point. Ink-saver
/// text swaps its fill for a text stroke of the same color.
fn text_div(text: &PlacedText) -> String {
    let mut style = format!(
        "left: {}px; top: {}px; transform: translate(-50%, -50%)",
        text.x, text.y,
    );
    if text.rotation != 0.0 {
        style.push_str(&format!(" rotate({}deg)", text.rotation));
    }
    style.push_str(&format!(
        "; font-size: {}px; font-family: {}",
        text.font_size,
        fonts::css_stack(&text.font_family),
    ));
    if text.outline {
        style.push_str(&format!(
            "; color: transparent; -webkit-text-stroke: {}px {}",
            svg::outline_stroke_width(text.font_size),
            text.color,
        ));
    } else {
        style.push_str(&format!("; color: {}", text.color));
    }

    format!(
        r#"<div class="page-text" style="{}">{}</div>"#,
        svg::xml_escape(&style),
        svg::xml_escape(&text.text),
    )
}

/// Borders and emojis as a full-page inline SVG overlay, built from the same
/// fragments the preview renderer emits.
fn overlay_svg(layout: &PageLayout) -> String {
    let mut overlay = format!(
        r#"<svg class="page-overlay" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    );
    for border in &layout.borders {
        overlay.push_str(&svg::border_fragment(border));
    }
    for emoji in &layout.emojis {
        overlay.push_str(&svg::emoji_fragment(emoji));
    }
    overlay.push_str("</svg>");
    overlay
}
