//! Gemini API連携（reqwest）

use crate::config::Config;
use crate::error::Result;
use pneumoscan_common::{
    Classifier, Delay, Error as CommonError, GeminiRequest, GeminiResponse, GenerateContent,
};
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// CLI用の分類アダプタ
pub type CliClassifier = Classifier<HttpTransport, TokioDelay>;

pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http })
    }
}

impl GenerateContent for HttpTransport {
    async fn generate_content(
        &self,
        url: &str,
        request: &GeminiRequest,
    ) -> pneumoscan_common::Result<GeminiResponse> {
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| CommonError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CommonError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(CommonError::Api(format!("{}: {}", status, text)));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 設定と実効APIキーから分類アダプタを組み立てる
pub fn build_classifier(config: &Config, api_key: Option<String>) -> Result<CliClassifier> {
    let transport = HttpTransport::new(Duration::from_secs(config.timeout_seconds))?;
    Ok(Classifier::new(config.to_classifier_config(api_key), transport, TokioDelay))
}
