//! # Pennant CLI
//!
//! Usage:
//!   pennant banner.json -o banner.pdf
//!   pennant --text "WELCOME HOME!" -o banner.html
//!   pennant --template happy-birthday -o banner.svg
//!   pennant --templates
//!
//! The output format follows the `-o` extension: `.pdf`, `.html`, or `.svg`
//! (one numbered file per page). With neither a file argument, `--text`, nor
//! `--template`, a banner JSON document is read from stdin.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use pennant::metrics::BuiltinMetrics;
use pennant::model::Banner;
use pennant::{template, PennantError};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--templates") {
        for t in template::all_templates() {
            println!("{:<16} {}", t.id, t.description);
        }
        return;
    }

    let metrics = BuiltinMetrics::new();

    let banner = match load_banner(&args, &metrics) {
        Ok(banner) => banner,
        Err(e) => {
            eprintln!("✗ {}", e);
            process::exit(1);
        }
    };

    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "banner.pdf".to_string());

    if let Err(e) = write_output(&banner, &output_path, &metrics) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn load_banner(args: &[String], metrics: &BuiltinMetrics) -> Result<Banner, String> {
    if let Some(w) = args.windows(2).find(|w| w[0] == "--template") {
        return template::create_from_template(&w[1], None, metrics).map_err(|e| e.to_string());
    }

    if let Some(w) = args.windows(2).find(|w| w[0] == "--text") {
        return Ok(Banner::with_text(&w[1], &w[1], None, metrics));
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).map_err(|e| format!("failed to read {}: {}", args[1], e))?
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        buf
    };

    pennant::banner_from_json(&input).map_err(|e| e.to_string())
}

fn write_output(
    banner: &Banner,
    output_path: &str,
    metrics: &BuiltinMetrics,
) -> Result<(), String> {
    if output_path.ends_with(".html") {
        let html = pennant::render_print_html(banner, metrics);
        fs::write(output_path, html.as_bytes()).map_err(|e| e.to_string())?;
        eprintln!("✓ Written {} bytes to {}", html.len(), output_path);
        return Ok(());
    }

    if output_path.ends_with(".svg") {
        // One numbered file per page: banner.svg -> banner-1.svg, ...
        let stem = output_path.trim_end_matches(".svg");
        let pages = pennant::render_svg_pages(banner, metrics);
        for (i, page) in pages.iter().enumerate() {
            let path = format!("{}-{}.svg", stem, i + 1);
            fs::write(&path, page.as_bytes()).map_err(|e| e.to_string())?;
            eprintln!("✓ Written {} bytes to {}", page.len(), path);
        }
        return Ok(());
    }

    let pdf_bytes = pennant::render_pdf(banner, metrics).map_err(|e: PennantError| e.to_string())?;
    fs::write(output_path, &pdf_bytes).map_err(|e| e.to_string())?;
    eprintln!("✓ Written {} bytes to {}", pdf_bytes.len(), output_path);
    Ok(())
}
