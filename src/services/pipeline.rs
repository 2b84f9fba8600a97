use crate::models::frame::Frame;
use crate::models::ocr_result::TextBounds;
use crate::models::parsed_stat::RenderCommand;
use crate::models::rect::Rect;
use crate::models::stat_rule::RuleSet;
use crate::services::cleaner::clean_region;
use crate::services::equipped::is_equipped_item;
use crate::services::ocr::{OcrEngine, OcrPool};
use crate::services::parser::evaluate_result;
use crate::services::region::crop_to_stat_region;
use crate::services::scanner::scan_for_boxes;
use crate::services::segmenter::segment_stat_lines;
use futures::future::join_all;
use image::{imageops, ImageFormat, RgbaImage};
use std::time::Instant;
use tracing::debug;

/// Margin the original renderer draws around a highlighted stat line
const HIGHLIGHT_GROW: i32 = 5;
const HIGHLIGHT_EXTRA: i32 = 2;

/// Everything one pass produced; boxes and regions ride along for debug
/// rendering, highlights are the real output
#[derive(Debug, Clone, Default)]
pub struct FrameAnalysis {
    pub highlights: Vec<RenderCommand>,
    pub item_boxes: Vec<Rect>,
    pub regions: Vec<Rect>,
}

/// Run the full analysis pass over one frame.
///
/// Detection misses simply produce fewer boxes; only an OCR transport
/// failure fails the pass, and the caller retries on the next frame.
pub async fn analyze_frame<E: OcrEngine>(
    frame: &Frame,
    rules: &RuleSet,
    ocr: &OcrPool<E>,
) -> Result<FrameAnalysis, String> {
    let started = Instant::now();

    let mut item_boxes = scan_for_boxes(frame);
    item_boxes.retain(|b| !is_equipped_item(frame, b));

    // collect every stat-line crop first so the OCR requests dispatch
    // together and get awaited jointly
    let mut regions = Vec::new();
    let mut stat_rects: Vec<Rect> = Vec::new();
    let mut payloads: Vec<Vec<u8>> = Vec::new();

    for item_box in &item_boxes {
        let Some(region_rect) = crop_to_stat_region(frame, item_box) else {
            continue;
        };
        let Some(mut region_img) = frame.crop(&region_rect) else {
            continue;
        };
        clean_region(&mut region_img);

        for local in segment_stat_lines(&region_img) {
            let stat_img = imageops::crop_imm(
                &region_img,
                local.x.max(0) as u32,
                local.y.max(0) as u32,
                local.width,
                local.height,
            )
            .to_image();
            payloads.push(encode_png(&stat_img)?);
            stat_rects.push(local.offset_by(&region_rect));
        }
        regions.push(region_rect);
    }

    debug!(
        boxes = item_boxes.len(),
        stat_lines = stat_rects.len(),
        "frame scan complete"
    );

    if payloads.is_empty() {
        return Ok(FrameAnalysis {
            highlights: Vec::new(),
            item_boxes,
            regions,
        });
    }

    let results = join_all(payloads.into_iter().map(|png| ocr.recognize(png))).await;

    let mut highlights = Vec::new();
    for (stat_rect, result) in stat_rects.iter().zip(results) {
        let result = result?;
        let Some(eval) = evaluate_result(&result, rules) else {
            continue;
        };
        if eval.qualifies {
            highlights.push(RenderCommand {
                rect: highlight_rect(stat_rect, &eval.stat.bounds),
                qualifying: true,
            });
        }
    }

    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        highlights = highlights.len(),
        "frame pass complete"
    );

    Ok(FrameAnalysis {
        highlights,
        item_boxes,
        regions,
    })
}

/// Lift OCR text bounds (stat-image local) into frame coordinates with
/// the drawing margin applied
fn highlight_rect(stat_rect: &Rect, bounds: &TextBounds) -> Rect {
    if bounds.is_empty() {
        return *stat_rect;
    }
    Rect::new(
        stat_rect.x + bounds.x0 - HIGHLIGHT_GROW,
        stat_rect.y + bounds.y0 - HIGHLIGHT_GROW,
        (bounds.x1 - bounds.x0 + HIGHLIGHT_GROW + HIGHLIGHT_EXTRA).max(0) as u32,
        (bounds.y1 - bounds.y0 + HIGHLIGHT_GROW + HIGHLIGHT_EXTRA).max(0) as u32,
    )
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| format!("Failed to encode image: {}", e))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::Rgb;
    use crate::models::ocr_result::{OcrLine, OcrResult};
    use crate::models::stat_rule::StatRule;
    use crate::services::scanner::tests::{TestCanvas, LEGENDARY};

    /// Engine returning the same canned result for every crop
    struct FakeEngine {
        result: OcrResult,
    }

    impl OcrEngine for FakeEngine {
        async fn recognize(&self, _png: Vec<u8>) -> Result<OcrResult, String> {
            Ok(self.result.clone())
        }
    }

    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        async fn recognize(&self, _png: Vec<u8>) -> Result<OcrResult, String> {
            Err("OCR service unavailable".to_string())
        }
    }

    fn canned_result(text: &str) -> OcrResult {
        OcrResult {
            text: text.to_string(),
            lines: vec![OcrLine {
                text: text.to_string(),
                bbox: TextBounds {
                    x0: 4,
                    y0: 2,
                    x1: 310,
                    y1: 26,
                },
                words: Vec::new(),
            }],
        }
    }

    fn rules(name: &str, percentage: f64) -> RuleSet {
        RuleSet::new(vec![StatRule {
            name: name.to_string(),
            percentage,
        }])
    }

    /// Tooltip with a detectable outline, a non-black interior so the
    /// region trims stay put, and two sentinel text rows
    fn tooltip_frame() -> Frame {
        let mut canvas = TestCanvas::new(800, 1400);
        // interior backdrop: dark but not pure black
        canvas.fill_rect(101, 51, 480, 550, Rgb::new(25, 25, 25));
        // border outline terminated by the black background
        canvas.fill_row(50, 100, 480, LEGENDARY);
        canvas.fill_col(100, 50, 550, LEGENDARY);
        // min/max range text rows of two stat lines; raw gray 165
        // survives cleaning unchanged. Region starts at frame y 221.
        canvas.fill_row(391, 356, 406, Rgb::new(165, 165, 165));
        canvas.fill_row(421, 356, 406, Rgb::new(165, 165, 165));
        canvas.frame()
    }

    #[tokio::test]
    async fn test_qualifying_stat_highlighted() {
        let frame = tooltip_frame();
        let pool = OcrPool::new(
            FakeEngine {
                result: canned_result("+12.5% Critical Strike Chance [10.0 - 15.0]"),
            },
            2,
        );

        let analysis = analyze_frame(&frame, &rules("Critical Strike Chance", 40.0), &pool)
            .await
            .unwrap();

        assert_eq!(analysis.item_boxes.len(), 1);
        assert_eq!(analysis.regions.len(), 1);
        // both stat lines carry the same canned qualifying roll
        assert_eq!(analysis.highlights.len(), 2);
        assert!(analysis.highlights.iter().all(|h| h.qualifying));

        // lower stat box sits at frame y 392; bounds grow by the margin
        let second = &analysis.highlights[1];
        assert_eq!(second.rect.x, 106 + 4 - 5);
        assert_eq!(second.rect.y, 392 + 2 - 5);
        assert_eq!(second.rect.width, (310 - 4 + 7) as u32);
    }

    #[tokio::test]
    async fn test_below_threshold_stat_not_highlighted() {
        let frame = tooltip_frame();
        let pool = OcrPool::new(
            FakeEngine {
                result: canned_result("+12.5% Critical Strike Chance [10.0 - 15.0]"),
            },
            2,
        );

        let analysis = analyze_frame(&frame, &rules("Critical Strike Chance", 60.0), &pool)
            .await
            .unwrap();

        assert!(analysis.highlights.is_empty(), "50% roll against 60% rule");
        assert_eq!(analysis.item_boxes.len(), 1);
    }

    #[tokio::test]
    async fn test_equipped_box_skipped() {
        let mut canvas = TestCanvas::new(800, 1400);
        canvas.fill_rect(101, 151, 480, 650, Rgb::new(25, 25, 25));
        canvas.fill_row(150, 100, 480, LEGENDARY);
        canvas.fill_col(100, 150, 650, LEGENDARY);
        // EQUIPPED badge band above the box top
        canvas.fill_rect(150, 100, 400, 110, Rgb::new(150, 150, 150));
        let frame = canvas.frame();

        let pool = OcrPool::new(
            FakeEngine {
                result: canned_result("+12.5% Critical Strike Chance [10.0 - 15.0]"),
            },
            2,
        );

        let analysis = analyze_frame(&frame, &rules("Critical Strike Chance", 40.0), &pool)
            .await
            .unwrap();

        assert!(analysis.item_boxes.is_empty());
        assert!(analysis.highlights.is_empty());
    }

    #[tokio::test]
    async fn test_ocr_failure_fails_the_pass() {
        let frame = tooltip_frame();
        let pool = OcrPool::new(FailingEngine, 2);

        let result = analyze_frame(&frame, &rules("Critical Strike Chance", 40.0), &pool).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_frame_detects_nothing() {
        let frame = TestCanvas::new(800, 1400).frame();
        let pool = OcrPool::new(FailingEngine, 2);

        // no boxes means no OCR calls, so the failing engine never runs
        let analysis = analyze_frame(&frame, &rules("Critical Strike Chance", 40.0), &pool)
            .await
            .unwrap();
        assert!(analysis.item_boxes.is_empty());
        assert!(analysis.highlights.is_empty());
    }
}
