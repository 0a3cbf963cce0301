//! # Decorative Emoji Distributor
//!
//! Free-floating emojis carry a global x like text does, but they are small
//! and atomic: each belongs to exactly one page, never split or duplicated
//! across a seam. The assignment is a hard partition of [0,1] into
//! `total_pages` equal intervals, with the local x renormalized into that
//! page's [0,1) space.

use crate::model::Emoji;

/// Select and renormalize the emojis belonging to one page.
///
/// Single-page banners pass every emoji through unchanged. Otherwise an
/// emoji lands on `floor(x · N)` clamped to the last page (so `x = 1.0`
/// stays on the final page rather than indexing past it).
pub fn emojis_for_page(emojis: &[Emoji], page_index: u32, total_pages: u32) -> Vec<Emoji> {
    if total_pages <= 1 {
        return emojis.to_vec();
    }

    let n = total_pages as f64;
    emojis
        .iter()
        .filter_map(|e| {
            let target = ((e.x * n).floor() as i64).clamp(0, total_pages as i64 - 1) as u32;
            if target != page_index {
                return None;
            }
            let local_x = e.x * n - target as f64;
            Some(Emoji {
                x: local_x,
                ..e.clone()
            })
        })
        .collect()
}
