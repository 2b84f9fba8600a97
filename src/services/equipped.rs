use crate::models::frame::Frame;
use crate::models::rect::Rect;
use crate::services::palette::EQUIPPED_BADGE;

/// How far above the box top the badge can sit
const PROBE_DISTANCE: i32 = 100;

/// Coarse vertical step; the badge band is many pixels tall
const PROBE_STEP: i32 = 2;

/// Horizontal position of the probe column, as a fraction of box width
const PROBE_X_FRACTION: f64 = 0.25;

/// True when the box sits directly under an EQUIPPED badge.
///
/// The badge marks the currently-worn item; skipping its box halves the
/// OCR work and keeps the overlay focused on the hovered item.
pub fn is_equipped_item(frame: &Frame, item_box: &Rect) -> bool {
    let probe_x = item_box.x + (item_box.width as f64 * PROBE_X_FRACTION).round() as i32;
    if probe_x < 0 || probe_x >= frame.width() as i32 {
        return false;
    }

    let mut y = item_box.y;
    let floor = item_box.y - PROBE_DISTANCE;
    while y >= floor && y >= 0 {
        if EQUIPPED_BADGE.contains(frame.rgb_at(probe_x as u32, y as u32)) {
            return true;
        }
        y -= PROBE_STEP;
    }

    false
}
