use crate::models::ocr_result::OcrResult;
use std::future::Future;

/// OCR engine seam - abstraction over recognition backends
///
/// The pipeline treats recognition as a black box: encoded PNG in,
/// structured text with line/word/confidence detail out. The HTTP
/// client, and test fakes, plug in here.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, png: Vec<u8>) -> impl Future<Output = Result<OcrResult, String>> + Send;
}
