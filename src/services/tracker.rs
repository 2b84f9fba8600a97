use crate::models::parsed_stat::RenderCommand;
use crate::models::rect::Rect;
use crate::services::config::RuleStore;
use crate::services::ocr::{OcrEngine, OcrPool};
use crate::services::pipeline::analyze_frame;
use crate::services::screen_capture::FrameSource;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Raw scan geometry, included only when debug rendering is on
#[derive(Debug, Clone, Serialize)]
pub struct DebugGeometry {
    pub item_boxes: Vec<Rect>,
    pub regions: Vec<Rect>,
}

/// One frame's worth of output for the display layer
#[derive(Debug, Clone, Serialize)]
pub struct OverlayUpdate {
    pub highlights: Vec<RenderCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugGeometry>,
}

/// Drives the capture -> analyze -> render loop.
///
/// One pass runs at a time: a frame is captured, fully analyzed (the OCR
/// join is the only suspension point inside a pass) and its update sent
/// before the next capture starts. The loop is paced by OCR latency, not
/// display refresh.
pub struct ScanTracker<E> {
    capture: Arc<FrameSource>,
    rules: Arc<RuleStore>,
    pool: OcrPool<E>,
    stop_signal: Arc<Mutex<bool>>,
    running: Arc<Mutex<bool>>,
    debug_geometry: bool,
}

impl<E: OcrEngine + 'static> ScanTracker<E> {
    pub fn new(
        capture: FrameSource,
        rules: Arc<RuleStore>,
        pool: OcrPool<E>,
        debug_geometry: bool,
    ) -> Self {
        Self {
            capture: Arc::new(capture),
            rules,
            pool,
            stop_signal: Arc::new(Mutex::new(false)),
            running: Arc::new(Mutex::new(false)),
            debug_geometry,
        }
    }

    /// Spawn the scan loop; a second call while running is a no-op
    pub async fn start(&self, updates: Sender<OverlayUpdate>) {
        let mut running = self.running.lock().await;
        if *running {
            warn!("already scanning, ignoring restart request");
            return;
        }
        *running = true;
        drop(running);

        *self.stop_signal.lock().await = false;

        let capture = Arc::clone(&self.capture);
        let rules = Arc::clone(&self.rules);
        let pool = self.pool.clone();
        let stop_signal = Arc::clone(&self.stop_signal);
        let running = Arc::clone(&self.running);
        let debug_geometry = self.debug_geometry;

        tokio::spawn(async move {
            info!("scan loop started");

            while !*stop_signal.lock().await {
                let started = Instant::now();

                let frame = match capture.capture_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!(error = %e, "capture failed");
                        tokio::task::yield_now().await;
                        continue;
                    }
                };

                let snapshot = rules.snapshot();
                match analyze_frame(&frame, &snapshot, &pool).await {
                    Ok(analysis) => {
                        let update = OverlayUpdate {
                            highlights: analysis.highlights,
                            debug: debug_geometry.then(|| DebugGeometry {
                                item_boxes: analysis.item_boxes,
                                regions: analysis.regions,
                            }),
                        };
                        debug!(
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            highlights = update.highlights.len(),
                            "pass complete"
                        );
                        if updates.send(update).await.is_err() {
                            info!("update receiver dropped, stopping scan loop");
                            break;
                        }
                    }
                    Err(e) => {
                        // a failed pass is not fatal; the next frame
                        // attempt proceeds independently
                        warn!(error = %e, "pass failed");
                    }
                }

                tokio::task::yield_now().await;
            }

            *running.lock().await = false;
            info!("scan loop stopped");
        });
    }

    pub async fn stop(&self) {
        *self.stop_signal.lock().await = true;
        info!("scan loop stop requested");
    }

    pub async fn is_running(&self) -> bool {
        *self.running.lock().await
    }
}
