//! # Border Layout Engine
//!
//! Turns one border specification plus one page's geometry into drawable
//! primitives any renderer can translate directly: straight strokes with an
//! optional dash pattern, repeated glyph stamps, or repeated motif images.
//!
//! Multi-page banners only have an outer boundary at their two ends, so
//! left edges draw on the first page only and right edges on the last page
//! only, while top and bottom run along every page. A single-page banner
//! draws all four edges with no special-casing.

use serde::Serialize;

use crate::model::{Border, BorderKind, BorderPosition, BannerDimensions};

/// Dash pattern for dashed strokes: 5 on, 5 off.
pub const DASH_PATTERN: [f64; 2] = [5.0, 5.0];
/// Dash pattern for dotted strokes: 2 on, 3 off.
pub const DOT_PATTERN: [f64; 2] = [2.0, 3.0];

/// Glyph stamp size along a border run, authored at 96dpi.
const EDGE_GLYPH_SIZE: f64 = 16.0;
/// Square footprint of a pattern motif, authored at 96dpi.
const MOTIF_SIZE: f64 = 40.0;

/// Resolution border spacing/thickness values are authored at.
const AUTHORING_DPI: f64 = 96.0;

/// One drawable border primitive, in the requesting renderer's units.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BorderPath {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
        thickness: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        dash: Option<[f64; 2]>,
    },
    /// A glyph stamp centered at (x, y).
    Glyph {
        glyph: String,
        x: f64,
        y: f64,
        size: f64,
    },
    /// A motif image whose top-left corner is at (x, y).
    Image {
        markup: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Produce the drawable primitives for one border on one page.
///
/// `dpi` is the unit-conversion factor for the target renderer (96 for
/// preview/print pixels, 72 for export points); margins, dimensions, and
/// authored sizes are all converted through it exactly once.
pub fn border_paths_for_page(
    border: &Border,
    dimensions: &BannerDimensions,
    page_index: u32,
    total_pages: u32,
    dpi: f64,
) -> Vec<BorderPath> {
    if !border.enabled {
        return vec![];
    }

    let width = dimensions.unit.to_device_px(dimensions.width, dpi);
    let height = dimensions.unit.to_device_px(dimensions.height, dpi);
    let margin = dimensions.unit.to_device_px(border.margin, dpi);

    let first = page_index == 0;
    let last = page_index + 1 == total_pages;

    let mut paths = Vec::new();
    for edge in active_edges(border.position, first, last) {
        emit_edge(
            &mut paths, border, edge, width, height, margin, first, last, dpi,
        );
    }
    paths
}

fn active_edges(position: BorderPosition, first: bool, last: bool) -> Vec<Edge> {
    let wants = |edge: Edge| match position {
        BorderPosition::Top => edge == Edge::Top,
        BorderPosition::Bottom => edge == Edge::Bottom,
        BorderPosition::Left => edge == Edge::Left,
        BorderPosition::Right => edge == Edge::Right,
        BorderPosition::All => true,
    };

    [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right]
        .into_iter()
        .filter(|&edge| wants(edge))
        .filter(|&edge| match edge {
            Edge::Left => first,
            Edge::Right => last,
            _ => true,
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn emit_edge(
    paths: &mut Vec<BorderPath>,
    border: &Border,
    edge: Edge,
    width: f64,
    height: f64,
    margin: f64,
    first: bool,
    last: bool,
    dpi: f64,
) {
    match &border.style.kind {
        BorderKind::Solid { thickness } => {
            paths.push(line(edge, width, height, margin, border, *thickness, None, dpi));
        }
        BorderKind::Dashed { thickness } => paths.push(line(
            edge,
            width,
            height,
            margin,
            border,
            *thickness,
            Some(DASH_PATTERN),
            dpi,
        )),
        BorderKind::Dotted { thickness } => paths.push(line(
            edge,
            width,
            height,
            margin,
            border,
            *thickness,
            Some(DOT_PATTERN),
            dpi,
        )),
        BorderKind::Glyph { glyph, spacing } => {
            let spacing = spacing * dpi / AUTHORING_DPI;
            let size = EDGE_GLYPH_SIZE * dpi / AUTHORING_DPI;
            for pos in tile_positions(edge, width, height, margin, spacing, first, last) {
                let (x, y) = anchor(edge, pos, width, height, margin);
                paths.push(BorderPath::Glyph {
                    glyph: glyph.clone(),
                    x,
                    y,
                    size,
                });
            }
        }
        BorderKind::Pattern {
            markup,
            markup_vertical,
            spacing,
        } => {
            let spacing = spacing * dpi / AUTHORING_DPI;
            let motif = MOTIF_SIZE * dpi / AUTHORING_DPI;
            let chosen = match edge {
                Edge::Left | Edge::Right => markup_vertical.as_deref().unwrap_or(markup),
                _ => markup.as_str(),
            };
            for pos in tile_positions(edge, width, height, margin, spacing, first, last) {
                let (cx, cy) = anchor(edge, pos, width, height, margin);
                paths.push(BorderPath::Image {
                    markup: chosen.to_string(),
                    x: cx - motif / 2.0,
                    y: cy - motif / 2.0,
                    width: motif,
                    height: motif,
                });
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn line(
    edge: Edge,
    width: f64,
    height: f64,
    margin: f64,
    border: &Border,
    thickness: f64,
    dash: Option<[f64; 2]>,
    dpi: f64,
) -> BorderPath {
    let (x1, y1, x2, y2) = match edge {
        Edge::Top => (margin, margin, width - margin, margin),
        Edge::Bottom => (margin, height - margin, width - margin, height - margin),
        Edge::Left => (margin, margin, margin, height - margin),
        Edge::Right => (width - margin, margin, width - margin, height - margin),
    };
    BorderPath::Line {
        x1,
        y1,
        x2,
        y2,
        color: border.style.color.clone(),
        thickness: thickness * dpi / AUTHORING_DPI,
        dash: dash.map(|[on, off]| [on * dpi / AUTHORING_DPI, off * dpi / AUTHORING_DPI]),
    }
}

/// Offsets along an edge at which to stamp a repeating unit.
///
/// Horizontal runs inset by the margin only at the banner's true outer
/// corners: the left inset applies on the first page and the right inset on
/// the last, so tiling flows across internal page joins without a gap.
/// Vertical runs always inset top and bottom.
fn tile_positions(
    edge: Edge,
    width: f64,
    height: f64,
    margin: f64,
    spacing: f64,
    first: bool,
    last: bool,
) -> Vec<f64> {
    if spacing <= 0.0 {
        return vec![];
    }
    let (start, end) = match edge {
        Edge::Top | Edge::Bottom => {
            let start = if first { margin } else { 0.0 };
            let end = if last { width - margin } else { width };
            (start, end)
        }
        Edge::Left | Edge::Right => (margin, height - margin),
    };
    let span = end - start;
    if span <= 0.0 {
        return vec![];
    }
    let count = (span / spacing).floor() as usize;
    (0..count).map(|i| start + i as f64 * spacing).collect()
}

/// Center point of a stamp at offset `pos` along an edge's margin line.
fn anchor(edge: Edge, pos: f64, width: f64, height: f64, margin: f64) -> (f64, f64) {
    match edge {
        Edge::Top => (pos, margin),
        Edge::Bottom => (pos, height - margin),
        Edge::Left => (margin, pos),
        Edge::Right => (width - margin, pos),
    }
}
