// atlas.rs - Glyph atlas queries
//
// Pure lookups over the generated bitmap tables in atlas_data.rs.
// Codes outside the atlas (and lowercase, which is folded) render blank.

use super::atlas_data::{FIRST_CODE, GLYPHS, GLYPH_COUNT, GLYPH_H, GLYPH_W};

/// Bitmap rows for an ASCII code, if the atlas covers it.
/// Lowercase letters fold to their uppercase glyph.
#[inline]
pub fn glyph_rows(code: u8) -> Option<&'static [u8; GLYPH_H]> {
    let code = code.to_ascii_uppercase();
    let idx = code.checked_sub(FIRST_CODE)? as usize;
    if idx >= GLYPH_COUNT {
        return None;
    }
    Some(&GLYPHS[idx])
}

/// Whether the glyph pixel at (x, y) is set. Out-of-cell coords are unset.
#[inline]
pub fn glyph_bit(rows: &[u8; GLYPH_H], x: usize, y: usize) -> bool {
    if x >= GLYPH_W || y >= GLYPH_H {
        return false;
    }
    rows[y] & (0x80 >> x) != 0
}

/// Fixed advance width in atlas texels (the font is monospace).
#[inline]
pub fn advance() -> usize {
    GLYPH_W
}

/// Line height in atlas texels.
#[inline]
pub fn line_height() -> usize {
    GLYPH_H
}
