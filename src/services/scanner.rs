use crate::models::frame::Frame;
use crate::models::rect::Rect;
use crate::services::palette::{self, END_BORDER};
use tracing::debug;

/// Inner shrink applied to a confirmed box so the bright border ring and
/// outer chrome stay out of downstream crops
pub const BOX_PADDING: i32 = 6;

/// Skip margin around a claimed box while scanning for the next one
const SKIP_PADDING: i32 = BOX_PADDING * 3 / 2;

/// The border ring is several pixels thick, so every other pixel is enough
const SCAN_STRIDE: usize = 2;

/// Offsets right of a candidate corner where the border color must repeat
const CONFIRM_OFFSETS: [u32; 2] = [100, 170];

/// The rightward measurement starts this far into the box
const MEASURE_START_X: u32 = 100;

/// And gives up after this much further
const MEASURE_SPAN_X: u32 = 500;

/// Non-border pixels tolerated along the top edge before the candidate is
/// declared a false positive (item art pokes over the border sometimes)
const MAX_FOREIGN_PIXELS: u32 = 100;

/// Plausible box widths, exclusive bounds
const MIN_BOX_WIDTH: i32 = 300;
const MAX_BOX_WIDTH: i32 = 500;

/// The downward measurement starts this far into the box
const MEASURE_START_Y: u32 = 400;

/// Strip left of the corner checked for the pre-border black backdrop
const PRE_BORDER_SPAN: u32 = 12;
const PRE_BORDER_MIN_HITS: u32 = 4;

/// Find up to two item-box candidates by their border color.
///
/// Strides over the frame in row-major order, skipping pixels inside an
/// already-claimed candidate's padded bounds. Stops at two boxes or past
/// the vertical midpoint - tooltips start in the upper half.
pub fn scan_for_boxes(frame: &Frame) -> Vec<Rect> {
    let mut first: Option<Rect> = None;
    let mut second: Option<Rect> = None;
    let half = frame.height() / 2;

    'scan: for y in 0..=half.min(frame.height().saturating_sub(1)) {
        for x in (0..frame.width()).step_by(SCAN_STRIDE) {
            let px = x as i32;
            let py = y as i32;
            if first.is_some_and(|b| b.contains_padded(px, py, SKIP_PADDING))
                || second.is_some_and(|b| b.contains_padded(px, py, SKIP_PADDING))
            {
                continue;
            }

            if !palette::is_item_border(frame.rgb_at(x, y)) {
                continue;
            }

            if first.is_none() {
                first = locate_box(frame, x, y);
            } else if second.is_none() {
                second = locate_box(frame, x, y);
            }

            // interior pixels can re-trigger detection; keep the wider of
            // two candidates whose padded bounds collide
            if let (Some(a), Some(b)) = (first, second) {
                if grown(&a).intersects(&grown(&b)) {
                    if b.width > a.width {
                        first = Some(b);
                    }
                    second = None;
                }
            }

            if first.is_some() && second.is_some() {
                break 'scan;
            }
        }
    }

    let boxes: Vec<Rect> = [first, second].into_iter().flatten().collect();
    if !boxes.is_empty() {
        debug!(count = boxes.len(), "item box candidates");
    }
    boxes
}

/// Candidate box expanded by the skip padding for the collision test
fn grown(rect: &Rect) -> Rect {
    Rect::new(
        rect.x - SKIP_PADDING,
        rect.y - SKIP_PADDING,
        rect.width + SKIP_PADDING as u32 * 2,
        rect.height + SKIP_PADDING as u32 * 2,
    )
}

/// Materialize a full box from a candidate top-left corner.
///
/// Confirm the border repeats to the right, measure width to the black
/// outer edge, measure height the same way downward, then shrink inward.
/// Any implausible reading returns None.
fn locate_box(frame: &Frame, corner_x: u32, corner_y: u32) -> Option<Rect> {
    let repeated = CONFIRM_OFFSETS.iter().any(|&dx| {
        let x = corner_x + dx;
        x < frame.width() && palette::is_item_border(frame.rgb_at(x, corner_y))
    });
    if !repeated {
        return None;
    }

    // measure width: walk right along the top edge until the black outer
    // border, bailing out if too many pixels are off-color
    let mut width: i32 = 0;
    let mut foreign = 0u32;
    let mut x = corner_x + MEASURE_START_X;
    let scan_end = corner_x + MEASURE_START_X + MEASURE_SPAN_X;
    while x <= scan_end && x < frame.width() {
        let color = frame.rgb_at(x, corner_y);
        if !palette::is_item_border(color) {
            foreign += 1;
        }
        if foreign > MAX_FOREIGN_PIXELS {
            return None;
        }
        if END_BORDER.contains(color) {
            width = x as i32 - corner_x as i32;
            break;
        }
        x += SCAN_STRIDE as u32;
    }

    if width <= MIN_BOX_WIDTH || width >= MAX_BOX_WIDTH {
        return None;
    }

    // measure height: walk down the left edge to the black outer border
    let mut height: i32 = 0;
    let mut y = corner_y + MEASURE_START_Y;
    while y < frame.height() {
        if END_BORDER.contains(frame.rgb_at(corner_x, y)) {
            height = y as i32 - corner_y as i32;
            break;
        }
        y += SCAN_STRIDE as u32;
    }

    if height <= 0 || height >= frame.height() as i32 {
        return None;
    }

    // the backdrop left of a real box is near-black; border-colored item
    // art in the middle of the screen is not
    let mut backdrop_hits = 0u32;
    for dx in 1..=PRE_BORDER_SPAN {
        if dx <= corner_x && END_BORDER.contains(frame.rgb_at(corner_x - dx, corner_y)) {
            backdrop_hits += 1;
        }
    }
    if backdrop_hits < PRE_BORDER_MIN_HITS {
        return None;
    }

    Some(Rect::new(
        corner_x as i32 + BOX_PADDING,
        corner_y as i32 + BOX_PADDING,
        (width - BOX_PADDING * 2) as u32,
        (height - BOX_PADDING * 2) as u32,
    ))
}
