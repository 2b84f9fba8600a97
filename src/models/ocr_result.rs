use serde::{Deserialize, Serialize};

/// Bounding box in the coordinate space of the image handed to the
/// recognizer (x1/y1 exclusive corners)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl TextBounds {
    /// Inverted sentinel that any real bounds will shrink onto
    pub fn empty() -> Self {
        Self {
            x0: i32::MAX,
            y0: i32::MAX,
            x1: i32::MIN,
            y1: i32::MIN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    pub fn union(&self, other: &TextBounds) -> TextBounds {
        TextBounds {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// Per-character recognition confidence (0-100)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrSymbol {
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrWord {
    pub text: String,
    #[serde(default)]
    pub symbols: Vec<OcrSymbol>,
}

impl OcrWord {
    /// Effective confidence: mean of the symbol confidences, or 0 for a
    /// word the engine returned without symbol detail
    pub fn confidence(&self) -> f64 {
        if self.symbols.is_empty() {
            return 0.0;
        }
        self.symbols.iter().map(|s| s.confidence).sum::<f64>() / self.symbols.len() as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrLine {
    pub text: String,
    pub bbox: TextBounds,
    #[serde(default)]
    pub words: Vec<OcrWord>,
}

/// Full recognition output for one image, as returned by the OCR service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrResult {
    pub text: String,
    #[serde(default)]
    pub lines: Vec<OcrLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_union() {
        let a = TextBounds {
            x0: 10,
            y0: 20,
            x1: 50,
            y1: 40,
        };
        let b = TextBounds {
            x0: 5,
            y0: 30,
            x1: 80,
            y1: 35,
        };
        let u = a.union(&b);
        assert_eq!(
            u,
            TextBounds {
                x0: 5,
                y0: 20,
                x1: 80,
                y1: 40
            }
        );
    }

    #[test]
    fn test_empty_bounds_absorbed_by_union() {
        let real = TextBounds {
            x0: 10,
            y0: 10,
            x1: 20,
            y1: 20,
        };
        assert!(TextBounds::empty().is_empty());
        assert_eq!(TextBounds::empty().union(&real), real);
    }

    #[test]
    fn test_word_confidence_is_symbol_mean() {
        let word = OcrWord {
            text: "Chance".to_string(),
            symbols: vec![
                OcrSymbol { confidence: 90.0 },
                OcrSymbol { confidence: 70.0 },
                OcrSymbol { confidence: 80.0 },
            ],
        };
        assert!((word.confidence() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_word_without_symbols_has_zero_confidence() {
        let word = OcrWord {
            text: "??".to_string(),
            symbols: vec![],
        };
        assert_eq!(word.confidence(), 0.0);
    }

    #[test]
    fn test_wire_format_deserializes() {
        let json = r#"{
            "text": "+12.5% Critical Strike Chance [10.0 - 15.0]",
            "lines": [{
                "text": "+12.5% Critical Strike Chance [10.0 - 15.0]",
                "bbox": {"x0": 4, "y0": 2, "x1": 310, "y1": 26},
                "words": [{"text": "+12.5%", "symbols": [{"confidence": 91.0}]}]
            }]
        }"#;
        let result: OcrResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].bbox.x1, 310);
        assert_eq!(result.lines[0].words[0].confidence(), 91.0);
    }
}
