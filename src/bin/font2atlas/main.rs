// font2atlas - Generate the embedded glyph atlas from a font file
//
// Pipeline:
//   1. Load the font, rasterize codes 32..=90 at --px resolution
//   2. Box-filter each glyph onto an 8x8 cell, threshold to 1-bit rows
//   3. Emit src/text/atlas_data.rs (+ optional PNG contact sheet)
//
// Usage: cargo run --bin font2atlas -- <font.ttf> [--px N] [--out PATH] [--preview PATH]

mod export;

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::env;
use std::fs;
use std::path::Path;

const FIRST_CODE: u8 = 32;
const LAST_CODE: u8 = 90;
const CELL: usize = 8;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <font.ttf> [--px N] [--out PATH] [--preview PATH]",
            args[0]
        );
        std::process::exit(1);
    }

    // Parse arguments
    let font_path = &args[1];
    let mut px = 64usize;
    let mut out = "src/text/atlas_data.rs".to_string();
    let mut preview: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--px" => {
                px = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(64);
                i += 2;
            }
            "--out" => {
                out = args.get(i + 1).cloned().unwrap_or(out);
                i += 2;
            }
            "--preview" => {
                preview = args.get(i + 1).cloned();
                i += 2;
            }
            _ => i += 1,
        }
    }

    println!("Processing {font_path} ({px}px cells)...");

    let data = fs::read(font_path).with_context(|| format!("failed to read {font_path}"))?;
    let font = Font::from_bytes(data, FontSettings::default())
        .map_err(|e| anyhow::anyhow!("failed to parse font: {e}"))?;
    let ascent = font
        .horizontal_line_metrics(px as f32)
        .map(|m| m.ascent)
        .unwrap_or(px as f32 * 0.8);

    println!("  Rasterizing {} glyphs...", (LAST_CODE - FIRST_CODE + 1));
    let mut glyphs = Vec::with_capacity((LAST_CODE - FIRST_CODE + 1) as usize);
    for code in FIRST_CODE..=LAST_CODE {
        glyphs.push(rasterize_cell(&font, code as char, px, ascent));
    }

    println!("  Writing {out}...");
    export::write_rust(Path::new(&out), &glyphs)?;

    if let Some(p) = preview {
        println!("  Writing contact sheet {p}...");
        export::write_preview(Path::new(&p), &glyphs)?;
    }

    println!("Done!");
    Ok(())
}

/// Rasterize one glyph and box-filter it onto the 8x8 cell.
fn rasterize_cell(font: &Font, ch: char, px: usize, ascent: f32) -> [u8; CELL] {
    let (metrics, bitmap) = font.rasterize(ch, px as f32);

    // Bitmap origin inside the cell: x from the left bearing, y down from
    // the cell top so the baseline sits at the ascent line.
    let x0 = metrics.xmin;
    let y0 = (ascent - (metrics.ymin as f32 + metrics.height as f32)) as i32;

    let coverage = |cx: i32, cy: i32| -> f32 {
        let gx = cx - x0;
        let gy = cy - y0;
        if gx < 0 || gy < 0 || gx >= metrics.width as i32 || gy >= metrics.height as i32 {
            return 0.0;
        }
        bitmap[gy as usize * metrics.width + gx as usize] as f32 / 255.0
    };

    let step = px as f32 / CELL as f32;
    let mut rows = [0u8; CELL];
    for r in 0..CELL {
        for c in 0..CELL {
            let sx = (c as f32 * step) as i32;
            let ex = (((c + 1) as f32 * step).ceil() as i32).max(sx + 1);
            let sy = (r as f32 * step) as i32;
            let ey = (((r + 1) as f32 * step).ceil() as i32).max(sy + 1);

            let mut sum = 0.0;
            let mut n = 0u32;
            for cy in sy..ey {
                for cx in sx..ex {
                    sum += coverage(cx, cy);
                    n += 1;
                }
            }
            if sum / n as f32 > 0.5 {
                rows[r] |= 0x80 >> c;
            }
        }
    }
    rows
}
