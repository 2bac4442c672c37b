//! 胸部X線分類アダプタ
//!
//! Gemini への1回のリクエストで分類・信頼度・レポートを得る。
//! - APIキー未設定: 一定の待ち時間の後、固定のデモ結果を返す
//! - 通信/パース失敗: Normal・信頼度0の縮退結果を返す
//!
//! `analyze` は失敗しない。送信手段(`GenerateContent`)と待機(`Delay`)は
//! ブラウザ/CLI/テストで差し替える。

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::gemini::{endpoint_url, GeminiRequest, GeminiResponse, DEFAULT_MODEL};
use crate::parser::parse_analysis_response;
use crate::prompts::build_analysis_request;
use crate::types::{AnalysisResponse, Classification};

/// APIキー未設定時の疑似レイテンシ
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(2000);

/// 送信する画像のMIMEタイプ（アップロード形式に関わらず固定）
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

pub const SIMULATED_CONFIDENCE: f64 = 88.5;

pub const SIMULATED_REPORT: &str = "Simulated analysis: Opacity detected in the lower left lung field suggesting bacterial infection. Please configure a valid API key for real-time analysis.";

pub const FAILURE_REPORT: &str = "Analysis failed due to API error. Please check your connection and API key.";

/// generateContent の送信手段
pub trait GenerateContent {
    fn generate_content(
        &self,
        url: &str,
        request: &GeminiRequest,
    ) -> impl Future<Output = Result<GeminiResponse>>;
}

/// 疑似レイテンシ用の待機
pub trait Delay {
    fn wait(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// 送信MIMEタイプの決定方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MimePolicy {
    /// 常に image/png
    #[default]
    FixedPng,
    /// アップロードされた画像のMIMEタイプ（不明時は image/png）
    FromUpload,
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub simulated_latency: Duration,
    pub mime_policy: MimePolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            simulated_latency: DEFAULT_SIMULATED_LATENCY,
            mime_policy: MimePolicy::default(),
        }
    }
}

impl ClassifierConfig {
    /// 空白のみのキーは未設定扱い
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn is_demo_mode(&self) -> bool {
        self.credential().is_none()
    }

    pub fn outbound_mime<'a>(&self, uploaded: Option<&'a str>) -> &'a str {
        match self.mime_policy {
            MimePolicy::FixedPng => DEFAULT_IMAGE_MIME,
            MimePolicy::FromUpload => uploaded.unwrap_or(DEFAULT_IMAGE_MIME),
        }
    }
}

impl AnalysisResponse {
    /// APIキー未設定時のデモ結果
    pub fn simulated() -> Self {
        Self {
            classification: Classification::BacterialPneumonia,
            confidence: SIMULATED_CONFIDENCE,
            report: SIMULATED_REPORT.to_string(),
        }
    }

    /// 通信・パース失敗時の縮退結果
    pub fn failed() -> Self {
        Self {
            classification: Classification::Normal,
            confidence: 0.0,
            report: FAILURE_REPORT.to_string(),
        }
    }
}

pub struct Classifier<T, D> {
    config: ClassifierConfig,
    transport: T,
    delay: D,
}

impl<T: GenerateContent, D: Delay> Classifier<T, D> {
    pub fn new(config: ClassifierConfig, transport: T, delay: D) -> Self {
        Self { config, transport, delay }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// 画像を解析（送信MIMEは既定の image/png）
    ///
    /// `image_base64` はData URLのヘッダを除いたBase64本体
    pub async fn analyze(&self, image_base64: &str) -> AnalysisResponse {
        self.analyze_as(image_base64, None).await
    }

    /// アップロード時のMIMEタイプを添えて解析
    ///
    /// 失敗は全て縮退結果に変換されるため、常に整形済みの結果を返す
    pub async fn analyze_as(&self, image_base64: &str, uploaded_mime: Option<&str>) -> AnalysisResponse {
        match self.try_analyze(image_base64, uploaded_mime).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Gemini analysis failed: {}", e);
                AnalysisResponse::failed()
            }
        }
    }

    /// 失敗をそのまま返す版
    pub async fn try_analyze(
        &self,
        image_base64: &str,
        uploaded_mime: Option<&str>,
    ) -> Result<AnalysisResponse> {
        let Some(api_key) = self.config.credential() else {
            log::warn!("No API key found. Returning simulated analysis.");
            self.delay.wait(self.config.simulated_latency).await;
            return Ok(AnalysisResponse::simulated());
        };

        let mime_type = self.config.outbound_mime(uploaded_mime);
        let request = build_analysis_request(mime_type, image_base64);
        let url = endpoint_url(&self.config.model, api_key);

        log::info!("Requesting classification from {} ({})", self.config.model, mime_type);
        let response = self.transport.generate_content(&url, &request).await?;

        let text = response.first_text().ok_or(Error::EmptyResponse)?;
        parse_analysis_response(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    /// 返答を台本で決めるテスト用トランスポート
    enum Script {
        Reply(serde_json::Value),
        Fail(&'static str),
    }

    struct ScriptedTransport {
        script: Script,
        calls: Cell<usize>,
        last: RefCell<Option<(String, GeminiRequest)>>,
    }

    impl ScriptedTransport {
        fn new(script: Script) -> Self {
            Self { script, calls: Cell::new(0), last: RefCell::new(None) }
        }

        fn replying_text(text: &str) -> Self {
            Self::new(Script::Reply(json!({
                "candidates": [{ "content": { "parts": [{ "text": text }] } }]
            })))
        }
    }

    impl GenerateContent for ScriptedTransport {
        async fn generate_content(&self, url: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some((url.to_string(), request.clone()));
            match &self.script {
                Script::Reply(value) => Ok(serde_json::from_value(value.clone())?),
                Script::Fail(msg) => Err(Error::Transport(msg.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        waited: RefCell<Vec<Duration>>,
    }

    impl Delay for RecordingDelay {
        async fn wait(&self, duration: Duration) {
            self.waited.borrow_mut().push(duration);
        }
    }

    fn live_config() -> ClassifierConfig {
        ClassifierConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    fn assert_well_formed(response: &AnalysisResponse) {
        assert!(Classification::ALL.contains(&response.classification));
        assert!((0.0..=100.0).contains(&response.confidence));
    }

    #[test]
    fn test_no_credential_returns_simulated_after_delay() {
        let transport = ScriptedTransport::new(Script::Fail("unreachable"));
        let classifier = Classifier::new(ClassifierConfig::default(), transport, RecordingDelay::default());

        let response = block_on(classifier.analyze("iVBORw0KGgo="));

        assert_eq!(response.classification, Classification::BacterialPneumonia);
        assert_eq!(response.confidence, 88.5);
        assert!(response.report.starts_with("Simulated analysis"));
        assert_eq!(*classifier.delay.waited.borrow(), vec![Duration::from_millis(2000)]);
        assert_eq!(classifier.transport.calls.get(), 0);
    }

    #[test]
    fn test_blank_credential_is_demo_mode() {
        let config = ClassifierConfig {
            api_key: Some("   ".to_string()),
            simulated_latency: Duration::from_millis(5),
            ..Default::default()
        };
        assert!(config.is_demo_mode());

        let classifier = Classifier::new(config, ScriptedTransport::new(Script::Fail("x")), RecordingDelay::default());
        let response = block_on(classifier.analyze("data"));
        assert_eq!(response, AnalysisResponse::simulated());
        assert_eq!(*classifier.delay.waited.borrow(), vec![Duration::from_millis(5)]);
    }

    #[test]
    fn test_live_response_is_parsed() {
        let transport = ScriptedTransport::replying_text(
            r#"{"classification": "Viral Pneumonia", "confidence": 92.1, "report": "Diffuse interstitial infiltrates."}"#,
        );
        let classifier = Classifier::new(live_config(), transport, RecordingDelay::default());

        let response = block_on(classifier.analyze("iVBORw0KGgo="));

        assert_eq!(response.classification, Classification::ViralPneumonia);
        assert_eq!(response.confidence, 92.1);
        assert_eq!(response.report, "Diffuse interstitial infiltrates.");
        assert_eq!(classifier.transport.calls.get(), 1);
        assert!(classifier.delay.waited.borrow().is_empty());
    }

    #[test]
    fn test_request_targets_model_with_key() {
        let transport = ScriptedTransport::replying_text(r#"{"classification": "Normal", "confidence": 99, "report": "ok"}"#);
        let classifier = Classifier::new(live_config(), transport, RecordingDelay::default());

        block_on(classifier.analyze("AAAA"));

        let last = classifier.transport.last.borrow();
        let (url, request) = last.as_ref().expect("リクエストが記録されていない");
        assert!(url.contains("gemini-2.5-flash-image:generateContent"));
        assert!(url.ends_with("key=test-key"));

        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["inline_data"]["data"], "AAAA");
    }

    #[test]
    fn test_mime_fixed_to_png_by_default() {
        let transport = ScriptedTransport::replying_text(r#"{"classification": "Normal", "confidence": 99, "report": "ok"}"#);
        let classifier = Classifier::new(live_config(), transport, RecordingDelay::default());

        block_on(classifier.analyze_as("AAAA", Some("image/jpeg")));

        let last = classifier.transport.last.borrow();
        let body = serde_json::to_value(&last.as_ref().unwrap().1).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["inline_data"]["mime_type"], "image/png");
    }

    #[test]
    fn test_mime_from_upload_policy() {
        let config = ClassifierConfig { mime_policy: MimePolicy::FromUpload, ..live_config() };
        assert_eq!(config.outbound_mime(Some("image/jpeg")), "image/jpeg");
        assert_eq!(config.outbound_mime(None), "image/png");
        assert_eq!(ClassifierConfig::default().outbound_mime(Some("image/jpeg")), "image/png");
    }

    #[test]
    fn test_transport_error_degrades() {
        let transport = ScriptedTransport::new(Script::Fail("connection refused"));
        let classifier = Classifier::new(live_config(), transport, RecordingDelay::default());

        let response = block_on(classifier.analyze("AAAA"));

        assert_eq!(response.classification, Classification::Normal);
        assert_eq!(response.confidence, 0.0);
        assert!(response.report.contains("Analysis failed"));
    }

    #[test]
    fn test_try_analyze_surfaces_error() {
        let transport = ScriptedTransport::new(Script::Fail("timeout"));
        let classifier = Classifier::new(live_config(), transport, RecordingDelay::default());

        let result = block_on(classifier.try_analyze("AAAA", None));
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[test]
    fn test_empty_content_degrades() {
        let transport = ScriptedTransport::new(Script::Reply(json!({ "candidates": [] })));
        let classifier = Classifier::new(live_config(), transport, RecordingDelay::default());

        assert!(matches!(block_on(classifier.try_analyze("AAAA", None)), Err(Error::EmptyResponse)));
        assert_eq!(block_on(classifier.analyze("AAAA")), AnalysisResponse::failed());
    }

    #[test]
    fn test_every_reply_yields_well_formed_result() {
        let replies = [
            r#"{"classification": "Normal", "confidence": 12.5, "report": "ok"}"#,
            r#"{"classification": "Bacterial Pneumonia", "confidence": 250, "report": "ok"}"#,
            r#"{"classification": "Viral Pneumonia", "confidence": -3, "report": "ok"}"#,
            r#"{"classification": "Fungal", "confidence": 50, "report": "ok"}"#,
            r#"{"confidence": 50}"#,
            "not json at all",
            "[1, 2, 3]",
        ];

        for reply in replies {
            let classifier = Classifier::new(
                live_config(),
                ScriptedTransport::replying_text(reply),
                RecordingDelay::default(),
            );
            let response = block_on(classifier.analyze("AAAA"));
            assert_well_formed(&response);
        }

        let offline = Classifier::new(
            ClassifierConfig::default(),
            ScriptedTransport::new(Script::Fail("x")),
            RecordingDelay::default(),
        );
        assert_well_formed(&block_on(offline.analyze("AAAA")));
    }
}
