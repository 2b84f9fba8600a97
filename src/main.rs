use roll_overlay::models::stat_rule::RuleSet;
use roll_overlay::services::config::{ConfigManager, RuleStore};
use roll_overlay::services::ocr::{HttpOcrClient, OcrPool, DEFAULT_OCR_URL, DEFAULT_OCR_WORKERS};
use roll_overlay::services::screen_capture::FrameSource;
use roll_overlay::services::tracker::ScanTracker;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt::init();

    let config_manager = ConfigManager::new()?;
    let rules = config_manager.load()?;
    if rules.is_empty() {
        warn!(
            path = %config_manager.config_file_path().display(),
            "no stat rules configured; nothing will be highlighted"
        );
    } else {
        info!(count = rules.len(), "stat rules loaded");
    }
    let rule_store = Arc::new(RuleStore::new(RuleSet::new(rules)));

    let ocr_url =
        std::env::var("ROLL_OVERLAY_OCR_URL").unwrap_or_else(|_| DEFAULT_OCR_URL.to_string());
    let workers = std::env::var("ROLL_OVERLAY_OCR_WORKERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_OCR_WORKERS);
    let debug_geometry = std::env::var("ROLL_OVERLAY_DEBUG").is_ok_and(|v| v == "1");

    let client = HttpOcrClient::new(ocr_url.as_str())?;
    if let Err(e) = client.health_check().await {
        // not fatal: each pass degrades independently once the server is up
        warn!(url = %ocr_url, error = %e, "OCR server not reachable yet");
    }
    let pool = OcrPool::new(client, workers);
    info!(url = %ocr_url, workers = pool.workers(), "OCR pool ready");

    let capture = FrameSource::primary()?;
    let (width, height) = capture.dimensions()?;
    info!(width, height, "capturing primary monitor");

    let tracker = ScanTracker::new(capture, rule_store, pool, debug_geometry);
    let (tx, mut rx) = tokio::sync::mpsc::channel(8);
    tracker.start(tx).await;

    loop {
        tokio::select! {
            update = rx.recv() => {
                match update {
                    Some(update) => {
                        // render commands for the external overlay, one
                        // JSON object per line
                        let line = serde_json::to_string(&update)
                            .map_err(|e| format!("Failed to serialize update: {}", e))?;
                        println!("{}", line);
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                tracker.stop().await;
                break;
            }
        }
    }

    Ok(())
}
