use crate::models::ocr_result::TextBounds;
use crate::models::rect::Rect;
use serde::{Deserialize, Serialize};

/// Numeric stat roll extracted from one stat line's OCR text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedStat {
    pub value: f64,
    /// Configured rule name this line matched, if any
    pub name: Option<String>,
    pub min: f64,
    pub max: f64,
    /// Text bounds relative to the stat-line image handed to OCR
    pub bounds: TextBounds,
}

/// A parsed stat together with its threshold evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedStat {
    pub stat: ParsedStat,
    /// Position of the roll within its min-max range, 0-100
    pub percent_to_max: f64,
    pub qualifies: bool,
}

/// One rectangle for the display layer to draw; geometry only
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderCommand {
    pub rect: Rect,
    pub qualifying: bool,
}
