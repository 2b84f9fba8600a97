use crate::models::ocr_result::OcrResult;
use crate::services::ocr::engine::OcrEngine;
use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;

/// Default address of the local recognition server
pub const DEFAULT_OCR_URL: &str = "http://127.0.0.1:39841";

/// HTTP OCR client talking to the local recognition server
#[derive(Clone)]
pub struct HttpOcrClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ImageRequest {
    image_base64: String,
}

impl HttpOcrClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Check if the recognition server is up
    pub async fn health_check(&self) -> Result<(), String> {
        let url = format!("{}/health", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Health check failed: {}", e))?;
        Ok(())
    }
}

impl OcrEngine for HttpOcrClient {
    async fn recognize(&self, png: Vec<u8>) -> Result<OcrResult, String> {
        let image_base64 = general_purpose::STANDARD.encode(&png);
        let url = format!("{}/recognize", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ImageRequest { image_base64 })
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("OCR server error: {}", error_text));
        }

        response
            .json::<OcrResult>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}
