//! Integration tests for the Pennant banner pipeline.
//!
//! These tests exercise the full path from banner construction through
//! layout to rendered output. They verify:
//! - Page estimation drives banner creation
//! - Global coordinates map consistently onto pages
//! - Border and emoji distribution follow the multi-page rules
//! - All three renderers agree on what lands on which page
//! - PDF output is structurally valid

use pretty_assertions::assert_eq;

use pennant::layout::{self, PageGeometry};
use pennant::metrics::{NullMeasurer, TextMeasurer};
use pennant::model::{Banner, BorderPosition, TextElementPatch};
use pennant::template;

// ─── Helpers ────────────────────────────────────────────────────

/// Measurer reporting a fixed fraction of one preview page per character,
/// so tests control widths without depending on the builtin tables.
struct PerChar(f64);

impl TextMeasurer for PerChar {
    fn measure(&self, text: &str, _font_size: f64, _family: &str) -> f64 {
        text.chars().count() as f64 * self.0
    }
}

fn banner_with_text(text: &str, measurer: &dyn TextMeasurer) -> Banner {
    Banner::with_text("Test Banner", text, None, measurer)
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 50, "PDF too small to be valid");
    assert!(bytes.starts_with(b"%PDF-1.7"), "Missing PDF header");
    assert!(
        bytes.windows(5).any(|w| w == b"%%EOF"),
        "Missing %%EOF marker"
    );
}

// ─── Estimation ─────────────────────────────────────────────────

#[test]
fn short_text_opens_at_the_largest_tier_on_one_page() {
    // Five characters hit the top font tier; at 160px/char the measured
    // width (800px) sits well inside one 1056px sheet.
    let banner = banner_with_text("HOME!", &PerChar(160.0));
    assert_eq!(banner.total_pages(), 1);
    let element = banner.all_elements().next().unwrap();
    assert_eq!(element.font_size, 450.0);
}

#[test]
fn wide_text_opens_with_enough_pages() {
    // 12 chars × 200px = 2400px measured, ×1.05 fudge = 2520 -> 3 sheets.
    let banner = banner_with_text("WELCOME HOME", &PerChar(200.0));
    assert_eq!(banner.total_pages(), 3);
    assert_eq!(banner.all_elements().next().unwrap().font_size, 360.0);
}

#[test]
fn headless_creation_defaults_to_one_page() {
    let banner = banner_with_text("A VERY LONG MESSAGE WITH NO METRICS", &NullMeasurer);
    assert_eq!(banner.total_pages(), 1);
}

// ─── Cross-page layout ──────────────────────────────────────────

#[test]
fn centered_text_lands_on_the_middle_page_center() {
    let measurer = PerChar(200.0);
    let banner = banner_with_text("WELCOME HOME", &measurer); // 3 pages
    let geometry = PageGeometry::preview();
    let pages = layout::layout_banner(&banner, &geometry, &measurer);
    assert_eq!(pages.len(), 3);

    let middle = &pages[1];
    let run = middle
        .texts
        .iter()
        .find(|t| t.text == "WELCOME HOME")
        .expect("text visible on the middle page");
    assert!((run.x - geometry.page_width / 2.0).abs() < 1e-9);

    // Reconstructing global positions from each page's local x gives the
    // same absolute coordinate everywhere the run appears.
    let total_width = geometry.page_width * 3.0;
    for (i, page) in pages.iter().enumerate() {
        for t in &page.texts {
            let absolute = t.x + i as f64 * geometry.page_width;
            assert!((absolute - 0.5 * total_width).abs() < 1e-9);
        }
    }
}

#[test]
fn left_border_only_appears_on_the_first_page() {
    let banner = banner_with_text("WELCOME HOME", &PerChar(100.0)) // 2 pages
        .add_border("solid-thick", BorderPosition::Left, 0.25)
        .unwrap();
    assert_eq!(banner.total_pages(), 2);

    let geometry = PageGeometry::preview();
    let pages = layout::layout_banner(&banner, &geometry, &NullMeasurer);
    assert_eq!(pages[0].borders.len(), 1);
    assert!(pages[1].borders.is_empty());
}

#[test]
fn emoji_partitions_to_one_page_with_renormalized_x() {
    let banner = banner_with_text("WELCOME HOME", &PerChar(100.0)) // 2 pages
        .add_emoji("🎈", 0.75, 0.2, 42.0, 0.0);

    let geometry = PageGeometry::preview();
    let pages = layout::layout_banner(&banner, &geometry, &NullMeasurer);
    assert!(pages[0].emojis.is_empty());
    assert_eq!(pages[1].emojis.len(), 1);
    // local x = 0.75×2 − 1 = 0.5 of the page width.
    assert!((pages[1].emojis[0].x - geometry.page_width / 2.0).abs() < 1e-9);
}

#[test]
fn renderers_agree_on_page_membership() {
    let measurer = PerChar(150.0);
    let banner = banner_with_text("HAPPY BIRTHDAY TO YOU", &measurer)
        .add_border("star-pattern", BorderPosition::All, 0.25)
        .unwrap()
        .add_emoji("🎂", 0.2, 0.5, 48.0, 0.0)
        .add_emoji("🎈", 0.9, 0.3, 42.0, 0.0);

    let preview = layout::layout_banner(&banner, &PageGeometry::preview(), &measurer);
    let export = layout::layout_banner(&banner, &PageGeometry::export(), &measurer);
    assert_eq!(preview.len(), export.len());

    for (p, e) in preview.iter().zip(&export) {
        let p_texts: Vec<&str> = p.texts.iter().map(|t| t.text.as_str()).collect();
        let e_texts: Vec<&str> = e.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(p_texts, e_texts);

        let p_emojis: Vec<&str> = p.emojis.iter().map(|t| t.glyph.as_str()).collect();
        let e_emojis: Vec<&str> = e.emojis.iter().map(|t| t.glyph.as_str()).collect();
        assert_eq!(p_emojis, e_emojis);

        assert_eq!(p.borders.len(), e.borders.len());
    }
}

// ─── Model operations ───────────────────────────────────────────

#[test]
fn ink_saver_toggle_round_trips() {
    let banner = banner_with_text("SAVE THE INK", &NullMeasurer);
    let twice = banner.toggle_ink_saver().toggle_ink_saver();
    assert_eq!(twice.ink_saver_mode, banner.ink_saver_mode);
    for (a, b) in twice.all_elements().zip(banner.all_elements()) {
        assert_eq!(a.outline, b.outline);
    }
}

#[test]
fn banner_survives_a_json_round_trip() {
    let banner = banner_with_text("WELCOME HOME", &PerChar(100.0))
        .add_border("flower-vine-svg", BorderPosition::All, 0.3)
        .unwrap()
        .add_emoji("✨", 0.1, 0.1, 28.0, 15.0);

    let json = pennant::banner_to_json(&banner).unwrap();
    let back = pennant::banner_from_json(&json).unwrap();
    assert_eq!(back.total_pages(), banner.total_pages());
    assert_eq!(back.decorative.borders.len(), 1);
    assert_eq!(back.decorative.emojis[0].rotation, 15.0);
}

#[test]
fn patching_an_element_moves_it_between_pages_at_render_time() {
    let measurer = PerChar(100.0);
    let banner = banner_with_text("WELCOME HOME", &measurer); // 2 pages
    let id = banner.all_elements().next().unwrap().id.clone();

    // Push the run to the far right of the banner.
    let banner = banner.update_text_element(
        &id,
        TextElementPatch {
            x: Some(0.95),
            ..Default::default()
        },
    );

    let pages = layout::layout_banner(&banner, &PageGeometry::preview(), &measurer);
    let on_last = pages[1].texts.iter().any(|t| t.id == id);
    assert!(on_last, "run should render on the page its x points at");
}

// ─── Rendered output ────────────────────────────────────────────

#[test]
fn full_pipeline_produces_all_three_outputs() {
    let measurer = PerChar(150.0);
    let banner = template::create_from_template("happy-birthday", None, &measurer).unwrap();

    let svgs = pennant::render_svg_pages(&banner, &measurer);
    assert_eq!(svgs.len() as u32, banner.total_pages());
    assert!(svgs.iter().all(|s| s.starts_with("<svg")));

    let html = pennant::render_print_html(&banner, &measurer);
    assert_eq!(
        html.matches(r#"<div class="page"#).count() as u32,
        banner.total_pages()
    );

    let pdf = pennant::render_pdf(&banner, &measurer).unwrap();
    assert_valid_pdf(&pdf);
}

#[test]
fn every_template_renders_to_a_valid_pdf() {
    for t in template::all_templates() {
        let banner = template::create_from_template(&t.id, None, &NullMeasurer).unwrap();
        let pdf = pennant::render_pdf(&banner, &NullMeasurer).unwrap();
        assert_valid_pdf(&pdf);
    }
}

#[test]
fn pdf_page_count_matches_the_banner() {
    let measurer = PerChar(200.0);
    let banner = banner_with_text("WELCOME HOME", &measurer); // 3 pages
    let pdf = pennant::render_pdf(&banner, &measurer).unwrap();
    let body = String::from_utf8_lossy(&pdf).to_string();
    assert!(body.contains("/Count 3"));
}
