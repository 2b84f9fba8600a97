use serde::{Deserialize, Serialize};

/// Axis-aligned box in frame coordinates
///
/// Represents a detected item box, a refined stat region, or a single
/// stat-line sub-box. Width and height are always non-negative; boxes
/// that fail plausibility checks are dropped, never stored degenerate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Exclusive end coordinates
    pub fn x2(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn y2(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x2() && y >= self.y && y < self.y2()
    }

    /// Membership test widened by `pad` on every side. The scanner uses
    /// this to skip pixels just outside an already-claimed box, where the
    /// bright border ring still sits.
    pub fn contains_padded(&self, x: i32, y: i32, pad: i32) -> bool {
        x >= self.x - pad
            && x <= self.x - pad + self.width as i32 + pad * 2
            && y >= self.y - pad
            && y <= self.y - pad + self.height as i32 + pad * 2
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x2() && self.x2() > other.x && self.y < other.y2() && self.y2() > other.y
    }

    /// Same-size rect translated by the other rect's origin; used to lift
    /// region-local boxes back into frame coordinates.
    pub fn offset_by(&self, origin: &Rect) -> Rect {
        Rect {
            x: self.x + origin.x,
            y: self.y + origin.y,
            width: self.width,
            height: self.height,
        }
    }
}
