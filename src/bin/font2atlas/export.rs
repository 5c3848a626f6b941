// export.rs - Emit the atlas as Rust source and a PNG contact sheet

use anyhow::{Context, Result};
use image::imageops::{resize, FilterType};
use image::GrayImage;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const CELL: usize = 8;
const SHEET_COLS: usize = 16;
const SHEET_SCALE: u32 = 8;

/// Write the atlas tables as Rust source (the file the engine embeds).
pub fn write_rust(path: &Path, glyphs: &[[u8; CELL]]) -> Result<()> {
    let mut s = String::new();
    s.push_str("// atlas_data.rs - Generated by font2atlas. Do not edit.\n");
    s.push_str("//\n");
    s.push_str("// 8x8 1-bit glyph rows, bit 7 = leftmost pixel, rows top to bottom.\n");
    s.push_str("// Codes 32..=90 (space through 'Z'), monospace advance of one cell.\n");
    s.push_str("\npub const GLYPH_W: usize = 8;\n");
    s.push_str("pub const GLYPH_H: usize = 8;\n");
    s.push_str("pub const FIRST_CODE: u8 = 32;\n");
    let _ = writeln!(s, "pub const GLYPH_COUNT: usize = {};", glyphs.len());
    s.push_str("\npub const GLYPHS: [[u8; GLYPH_H]; GLYPH_COUNT] = [\n");

    for (i, rows) in glyphs.iter().enumerate() {
        let ch = (32 + i as u8) as char;
        let _ = writeln!(s, "    // {ch:?}");
        let cells: Vec<String> = rows.iter().map(|r| format!("0b{r:08b}")).collect();
        let _ = writeln!(s, "    [{}],", cells.join(", "));
    }
    s.push_str("];\n");

    fs::write(path, s).with_context(|| format!("failed to write {}", path.display()))
}

/// Write a scaled-up contact sheet for eyeballing the thresholded glyphs.
pub fn write_preview(path: &Path, glyphs: &[[u8; CELL]]) -> Result<()> {
    let sheet_rows = glyphs.len().div_ceil(SHEET_COLS);
    let mut img = GrayImage::new(
        (SHEET_COLS * CELL) as u32,
        (sheet_rows * CELL) as u32,
    );

    for (i, rows) in glyphs.iter().enumerate() {
        let gx = (i % SHEET_COLS) * CELL;
        let gy = (i / SHEET_COLS) * CELL;
        for (y, row) in rows.iter().enumerate() {
            for x in 0..CELL {
                let v = if row & (0x80 >> x) != 0 { 0u8 } else { 255u8 };
                img.put_pixel((gx + x) as u32, (gy + y) as u32, image::Luma([v]));
            }
        }
    }

    let scaled = resize(
        &img,
        img.width() * SHEET_SCALE,
        img.height() * SHEET_SCALE,
        FilterType::Nearest,
    );
    scaled
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}
