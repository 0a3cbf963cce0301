//! # PDF Serializer
//!
//! Takes laid-out banner pages and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. We write the raw bytes ourselves
//! because it gives us full control over the output and keeps the crate
//! self-contained. The PDF spec is verbose but the subset a banner needs —
//! standard Type1 fonts, strokes, filled rectangles, rotated text — is
//! manageable.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Pages are the fixed landscape sheet at 72dpi (792×612pt) and all
//! positions come from the shared layout at export geometry, so the PDF
//! agrees with the preview about what lands on which page.
//!
//! Emoji glyphs have no representation in the standard WinAnsi fonts; border
//! stamps and decorative emojis degrade to ASCII stand-ins rather than
//! disappearing, so the printed sheet still shows where the decoration goes.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::error::PennantError;
use crate::fonts;
use crate::layout::{self, BorderPath, PageGeometry, PageLayout, PlacedEmoji, PlacedText};
use crate::metrics::TextMeasurer;
use crate::model::Banner;

/// Fraction of the font size between the vertical center of a line of caps
/// and its baseline. Used to convert the layout's center anchor into a PDF
/// baseline position.
const BASELINE_FACTOR: f64 = 0.35;

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the banner to a PDF byte vector, one sheet per page.
    pub fn write(
        &self,
        banner: &Banner,
        measurer: &dyn TextMeasurer,
    ) -> Result<Vec<u8>, PennantError> {
        let geometry = PageGeometry::export();
        let pages = layout::layout_banner(banner, &geometry, measurer);
        if pages.is_empty() {
            return Err(PennantError::Render("banner has no pages".into()));
        }

        let mut builder = PdfBuilder {
            objects: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3..=5 = the standard fonts F0/F1/F2
        // 6+ = content streams and page objects
        for _ in 0..3 {
            builder.objects.push(PdfObject { data: vec![] });
        }
        for base_font in ["Helvetica", "Times-Roman", "Courier"] {
            builder.objects.push(PdfObject {
                data: format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    base_font
                )
                .into_bytes(),
            });
        }

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in &pages {
            let content = self.build_content_stream(page);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << /F0 3 0 R /F1 4 0 R /F2 5 0 R >> >> >>",
                page.width, page.height, content_obj_id
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        // Catalog (object 1)
        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        // Pages tree (object 2)
        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        // Info dictionary
        let info_obj_id = builder.objects.len();
        builder.objects.push(PdfObject {
            data: format!(
                "<< /Title ({}) /Producer (Pennant 0.3) /Creator (Pennant) >>",
                Self::escape_pdf_string(&banner.title)
            )
            .into_bytes(),
        });

        Ok(self.serialize(&builder, info_obj_id))
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &PageLayout) -> String {
        let mut stream = String::new();

        self.write_background(&mut stream, page);
        for border in &page.borders {
            self.write_border(&mut stream, border, page.height);
        }
        for text in &page.texts {
            self.write_text(&mut stream, text, page.height);
        }
        for emoji in &page.emojis {
            self.write_emoji(&mut stream, emoji, page.height);
        }

        stream
    }

    fn write_background(&self, stream: &mut String, page: &PageLayout) {
        let (r, g, b) = parse_hex_color(&page.background_color);
        // White is the paper itself; skip the fill.
        if r >= 0.999 && g >= 0.999 && b >= 0.999 {
            return;
        }
        let _ = write!(
            stream,
            "q\n{:.3} {:.3} {:.3} rg\n0 0 {:.2} {:.2} re\nf\nQ\n",
            r, g, b, page.width, page.height
        );
    }

    /// Write one text run. The layout anchor is the run's center; PDF wants
    /// the baseline start, so we back off half the measured width and drop
    /// from the vertical center to the baseline. Ink-saver text switches the
    /// rendering mode to stroke-only (`1 Tr`).
    fn write_text(&self, stream: &mut String, text: &PlacedText, page_height: f64) {
        let (r, g, b) = parse_hex_color(&text.color);
        let font_name = font_resource(&text.font_family);

        let tx = text.x - text.width / 2.0;
        let ty = page_height - text.y - text.font_size * BASELINE_FACTOR;

        let _ = write!(stream, "BT\n/{} {:.1} Tf\n", font_name, text.font_size);

        if text.outline {
            let _ = write!(
                stream,
                "1 Tr\n{:.3} {:.3} {:.3} RG\n{:.2} w\n",
                r,
                g,
                b,
                (text.font_size / 100.0).max(1.0)
            );
        } else {
            let _ = write!(stream, "{:.3} {:.3} {:.3} rg\n", r, g, b);
        }

        if text.rotation != 0.0 {
            // Positive screen rotation is clockwise; PDF's is
            // counter-clockwise, hence the sign flip.
            let theta = -text.rotation.to_radians();
            let (sin, cos) = theta.sin_cos();
            let _ = write!(
                stream,
                "{:.4} {:.4} {:.4} {:.4} {:.2} {:.2} Tm\n",
                cos, sin, -sin, cos, tx, ty
            );
        } else {
            let _ = write!(stream, "{:.2} {:.2} Td\n", tx, ty);
        }

        let _ = write!(stream, "({}) Tj\n", encode_winansi(&text.text));
        if text.outline {
            let _ = write!(stream, "0 Tr\n");
        }
        let _ = write!(stream, "ET\n");
    }

    fn write_border(&self, stream: &mut String, border: &BorderPath, page_height: f64) {
        match border {
            BorderPath::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                thickness,
                dash,
            } => {
                let (r, g, b) = parse_hex_color(color);
                let _ = write!(stream, "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n", r, g, b, thickness);
                if let Some([on, off]) = dash {
                    let _ = write!(stream, "[{:.2} {:.2}] 0 d\n", on, off);
                }
                let _ = write!(
                    stream,
                    "{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                    x1,
                    page_height - y1,
                    x2,
                    page_height - y2
                );
            }
            BorderPath::Glyph { glyph, x, y, size } => {
                self.write_stamp(stream, glyph, *x, *y, *size, page_height);
            }
            // Vector motifs have no PDF path here; stamp the fallback glyph
            // at the motif's center instead.
            BorderPath::Image {
                x,
                y,
                width,
                height,
                ..
            } => {
                self.write_stamp(
                    stream,
                    "*",
                    x + width / 2.0,
                    y + height / 2.0,
                    *height * 0.5,
                    page_height,
                );
            }
        }
    }

    fn write_emoji(&self, stream: &mut String, emoji: &PlacedEmoji, page_height: f64) {
        self.write_stamp(stream, &emoji.glyph, emoji.x, emoji.y, emoji.size, page_height);
    }

    /// Stamp a short decorative string centered at (x, y).
    fn write_stamp(
        &self,
        stream: &mut String,
        glyph: &str,
        x: f64,
        y: f64,
        size: f64,
        page_height: f64,
    ) {
        let substitute = glyph_fallback(glyph);
        // Rough centering: Helvetica glyphs average ~0.55em wide.
        let tx = x - substitute.chars().count() as f64 * size * 0.275;
        let ty = page_height - y - size * BASELINE_FACTOR;
        let _ = write!(
            stream,
            "BT\n/F0 {:.1} Tf\n0 0 0 rg\n{:.2} {:.2} Td\n({}) Tj\nET\n",
            size,
            tx,
            ty,
            encode_winansi(&substitute)
        );
    }

    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for i in 1..builder.objects.len() {
            let _ = write!(output, "{:010} 00000 n \n", offsets[i]);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Font resource name for a family, via the category mapping onto the three
/// registered standard fonts.
fn font_resource(family: &str) -> &'static str {
    match fonts::pdf_base_font(family) {
        "Times-Roman" => "F1",
        "Courier" => "F2",
        _ => "F0",
    }
}

/// Parse a `#rrggbb` hex color into unit-range components. Anything
/// malformed renders as black.
fn parse_hex_color(color: &str) -> (f64, f64, f64) {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return (0.0, 0.0, 0.0);
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).unwrap_or(0) as f64 / 255.0
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

/// ASCII stand-in for a glyph the standard fonts cannot draw. WinAnsi-safe
/// input passes through unchanged.
fn glyph_fallback(glyph: &str) -> String {
    if glyph.chars().all(|c| unicode_to_winansi(c).is_some()) {
        return glyph.to_string();
    }
    match glyph.chars().next() {
        Some('❤') | Some('💖') => "<3".to_string(),
        _ => "*".to_string(),
    }
}

/// Encode a string as a WinAnsi PDF string literal body, with parens and
/// backslashes escaped and non-ASCII bytes in octal. Unmappable characters
/// become '?'.
fn encode_winansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let b = unicode_to_winansi(ch).unwrap_or(b'?');
        match b {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte value.
///
/// WinAnsiEncoding is based on Windows-1252. Most codepoints in
/// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
/// contains special mappings for smart quotes, bullets, dashes, etc.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}
