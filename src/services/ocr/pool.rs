use crate::models::ocr_result::OcrResult;
use crate::services::ocr::engine::OcrEngine;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Default number of concurrent recognition workers
pub const DEFAULT_OCR_WORKERS: usize = 2;

/// Bounded worker pool in front of an OCR engine.
///
/// Jobs beyond the worker count queue up; callers block asynchronously
/// until a worker frees and their job completes. In-flight jobs are never
/// cancelled - results are consumed right after the per-frame join, so a
/// stale one simply gets dropped with its frame.
pub struct OcrPool<E> {
    engine: Arc<E>,
    permits: Arc<Semaphore>,
    workers: usize,
}

impl<E> Clone for OcrPool<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            permits: Arc::clone(&self.permits),
            workers: self.workers,
        }
    }
}

impl<E: OcrEngine> OcrPool<E> {
    pub fn new(engine: E, workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            engine: Arc::new(engine),
            permits: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub async fn recognize(&self, png: Vec<u8>) -> Result<OcrResult, String> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| "OCR pool closed".to_string())?;
        self.engine.recognize(png).await
    }
}
