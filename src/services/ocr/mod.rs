pub mod engine;
pub mod http_ocr;
pub mod pool;

// Re-export main types
pub use engine::OcrEngine;
pub use http_ocr::{HttpOcrClient, DEFAULT_OCR_URL};
pub use pool::{OcrPool, DEFAULT_OCR_WORKERS};
