use crate::models::color::Rgb;
use crate::models::frame::Frame;
use crate::models::rect::Rect;
use crate::services::palette::{ITEM_TEXT_HSL, LEGENDARY_TEXT, REQUIRED_TEXT};

/// Fixed crops skipping the name/icon header and the bottom chrome
const TOP_CROP: i32 = 165;
const BOTTOM_CROP: i32 = 100;

/// In-row stride of the trim scans; rough placement is enough here
const TRIM_STRIDE: usize = 5;

/// Breathing room left around the detected text span
const TRIM_MARGIN: i32 = 8;

/// Fraction of the region left out of each trim scan's reach
const TRIM_WINDOW: f64 = 0.4;

/// Text the trim scans key on: damage/armor and required-level white,
/// legendary-power orange, any strongly colored art pixel, a pure-black
/// separator, or the affix text band itself.
fn is_legible(color: Rgb) -> bool {
    LEGENDARY_TEXT.contains(color)
        || REQUIRED_TEXT.contains(color)
        || color.is_colored()
        || color.is_black()
        || ITEM_TEXT_HSL.contains(color)
}

fn row_has_legible(frame: &Frame, region: &Rect, y_local: i32) -> bool {
    let y = region.y + y_local;
    if y < 0 || y >= frame.height() as i32 {
        return false;
    }
    let x_end = region.x2().min(frame.width() as i32);
    let mut x = region.x.max(0);
    while x < x_end {
        if is_legible(frame.rgb_at(x as u32, y as u32)) {
            return true;
        }
        x += TRIM_STRIDE as i32;
    }
    false
}

/// Narrow a validated item box to the vertical span holding the rollable
/// stat text. Returns None when the box is too short to contain one.
pub fn crop_to_stat_region(frame: &Frame, item_box: &Rect) -> Option<Rect> {
    let height = item_box.height as i32 - TOP_CROP - BOTTOM_CROP;
    if height <= 0 {
        return None;
    }

    let mut region = Rect::new(
        item_box.x,
        item_box.y + TOP_CROP,
        item_box.width,
        height as u32,
    );

    // the header text sits above the stats; scan upward from the 60%
    // line and cut everything above the first legible row
    let top_window = (region.height as f64 * TRIM_WINDOW).round() as i32;
    let mut y_local = region.height as i32 - top_window - 1;
    while y_local >= 0 {
        if row_has_legible(frame, &region, y_local) {
            let cut = y_local + TRIM_MARGIN;
            if cut >= region.height as i32 {
                return None;
            }
            region.y += cut;
            region.height -= cut as u32;
            break;
        }
        y_local -= 1;
    }

    // the bottom chrome sits below the stats; scan downward from the 40%
    // line and cut everything from the first legible row on
    let bottom_start = (region.height as f64 * TRIM_WINDOW).round() as i32;
    let mut y_local = bottom_start;
    while y_local < region.height as i32 {
        if row_has_legible(frame, &region, y_local) {
            let trimmed = y_local - TRIM_MARGIN;
            if trimmed <= 0 {
                return None;
            }
            region.height = trimmed as u32;
            break;
        }
        y_local += 1;
    }

    region.is_valid().then_some(region)
}
