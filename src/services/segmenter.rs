use crate::models::color::Rgb;
use crate::models::rect::Rect;
use crate::services::palette::{DIVIDER, MIN_MAX_TEXT};
use image::RgbaImage;
use tracing::debug;

/// Vertical span of one rendered stat line, including its spacing
pub const STAT_LINE_HEIGHT: u32 = 28;

/// In-row stride; sentinel glyphs are wider than this
const COL_STRIDE: usize = 2;

/// Rows below a sentinel hit still counted into the closed line's box
const BOTTOM_PAD: u32 = 2;

/// Weapon tooltips put the divider after the weapon-specific stats, which
/// are never fewer than this many lines
const MIN_LINES_FOR_DIVIDER: usize = 3;

fn is_sentinel(px: &image::Rgba<u8>) -> bool {
    MIN_MAX_TEXT.contains(Rgb::new(px.0[0], px.0[1], px.0[2]))
}

fn is_divider(px: &image::Rgba<u8>) -> bool {
    DIVIDER.contains(Rgb::new(px.0[0], px.0[1], px.0[2]))
}

/// Left-to-right sentinel probe
fn row_has_sentinel(region: &RgbaImage, y: u32) -> bool {
    (0..region.width())
        .step_by(COL_STRIDE)
        .any(|x| is_sentinel(region.get_pixel(x, y)))
}

/// Right-to-left sentinel probe
fn row_has_sentinel_rev(region: &RgbaImage, y: u32) -> bool {
    (0..region.width())
        .rev()
        .step_by(COL_STRIDE)
        .any(|x| is_sentinel(region.get_pixel(x, y)))
}

/// A divider is a long uninterrupted horizontal band, never produced by
/// glyphs; require a contiguous run of at least a quarter of the width
fn row_has_divider(region: &RgbaImage, y: u32, min_run: u32) -> bool {
    let mut run = 0u32;
    for x in 0..region.width() {
        if is_divider(region.get_pixel(x, y)) {
            run += 1;
            if run >= min_run {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// A wrapped stat renders as two text rows but carries one roll; a split
/// candidate sandwiched between sentinel rows one line height away in
/// both directions is the middle of such a wrap, not a line boundary.
fn is_wrap_artifact(region: &RgbaImage, y: u32) -> bool {
    let above = match y.checked_sub(STAT_LINE_HEIGHT) {
        Some(v) => v,
        None => return false,
    };
    let below = y + STAT_LINE_HEIGHT;
    if below >= region.height() {
        return false;
    }
    row_has_sentinel(region, above) && row_has_sentinel_rev(region, below)
}

fn push_line(boxes: &mut Vec<Rect>, width: u32, top: i64, bottom_excl: u32) {
    let top = top.max(0) as u32;
    if bottom_excl > top {
        boxes.push(Rect::new(0, top as i32, width, bottom_excl - top));
    }
}

/// Split a cleaned stat region into one box per stat line.
///
/// Walks the region bottom-to-top. The gray `[min - max]` range text at
/// the end of every rollable line is the sentinel: the first hit marks
/// the lowest line's bottom edge, each later hit closes the line below
/// it. After any hit the walk jumps one line height to clear the rest of
/// that line's glyphs. Returned boxes are region-local, in top-to-bottom
/// order.
pub fn segment_stat_lines(region: &RgbaImage) -> Vec<Rect> {
    let width = region.width();
    let height = region.height();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let min_divider_run = (width / 4).max(1);

    let mut boxes: Vec<Rect> = Vec::new();
    let mut bottom_excl: Option<u32> = None;
    let mut y: i64 = height as i64 - 1;

    while y >= 0 {
        let row = y as u32;

        if row_has_divider(region, row, min_divider_run) {
            let lines_seen = boxes.len() + usize::from(bottom_excl.is_some());
            if lines_seen >= MIN_LINES_FOR_DIVIDER {
                if let Some(bottom) = bottom_excl.take() {
                    push_line(&mut boxes, width, y + 1, bottom);
                }
                debug!(lines = boxes.len(), "divider closed segmentation");
                boxes.reverse();
                return boxes;
            }
        }

        if row_has_sentinel(region, row) {
            match bottom_excl {
                None => {
                    bottom_excl = Some((row + 1 + BOTTOM_PAD).min(height));
                    y -= STAT_LINE_HEIGHT as i64;
                    continue;
                }
                Some(bottom) => {
                    if is_wrap_artifact(region, row) {
                        y -= STAT_LINE_HEIGHT as i64;
                        continue;
                    }
                    push_line(&mut boxes, width, y + 1, bottom);
                    bottom_excl = Some(row + 1);
                    y -= STAT_LINE_HEIGHT as i64;
                    continue;
                }
            }
        }

        y -= 1;
    }

    // the top line has no sentinel above it; close it at the buffer edge
    if let Some(bottom) = bottom_excl {
        push_line(&mut boxes, width, 0, bottom);
    }

    boxes.reverse();
    boxes
}
