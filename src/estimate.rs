//! # Page Estimator
//!
//! Decides how large banner text should be and how many landscape sheets it
//! will take. Both are heuristics: the font size is a step function of
//! character count, and the page count divides the measured text width by
//! the fixed page width with a safety fudge.
//!
//! The estimate is advisory. Each text element is estimated independently
//! and a multi-element banner unions requirements by simple max, not by
//! packing — an accepted limitation, not something to fix here.

use crate::metrics::TextMeasurer;
use crate::model::PAGE_WIDTH_IN;

/// Device pixels per inch used for estimation. Matches the preview
/// resolution so estimates line up with what the editor shows.
pub const ESTIMATE_DPI: f64 = 96.0;

/// Width of one landscape page in estimation pixels (11in × 96dpi).
pub const PAGE_WIDTH_PX: f64 = PAGE_WIDTH_IN * ESTIMATE_DPI;

/// Safety margin applied to measured widths to absorb metric inaccuracy.
pub const WIDTH_FUDGE: f64 = 1.05;

/// Nobody tapes together more than six pages.
pub const MAX_PAGES: u32 = 6;

/// Pick a print-resolution font size for banner text: fewer characters,
/// larger type. The tiers and breakpoints are product-tuned values carried
/// over from existing saved banners — don't retune casually.
pub fn optimal_font_size(text: &str) -> f64 {
    match text.chars().count() {
        0..=6 => 450.0,  // "HOME!"
        7..=12 => 360.0, // "WELCOME HOME"
        13..=20 => 300.0,
        21..=35 => 240.0, // "CONGRATULATIONS ON YOUR NEW JOB!"
        _ => 180.0,
    }
}

/// Estimate the number of landscape pages `text` needs at `font_size`.
///
/// Always in `[1, MAX_PAGES]`; over-long text silently truncates to the
/// maximum rather than erroring. A zero measured width (the headless
/// sentinel) means "cannot estimate" and yields one page.
pub fn estimate_pages(
    text: &str,
    font_size: f64,
    font_family: &str,
    measurer: &dyn TextMeasurer,
) -> u32 {
    let width_px = measurer.measure(text, font_size, font_family);
    if width_px <= 0.0 {
        return 1;
    }

    let width_px = width_px * WIDTH_FUDGE;
    let pages = (width_px / PAGE_WIDTH_PX).ceil() as u32;
    pages.clamp(1, MAX_PAGES)
}
