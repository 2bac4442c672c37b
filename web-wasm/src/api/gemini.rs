//! Gemini API連携（ブラウザ fetch）
//!
//! APIキーはビルド時の環境変数 `GEMINI_API_KEY`（または `API_KEY`）から埋め込む。
//! 未設定ならデモモードで動作する。

use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use pneumoscan_common::{
    Classifier, ClassifierConfig, Delay, Error, GeminiRequest, GeminiResponse,
    GenerateContent, Result, DEFAULT_MODEL,
};

/// ブラウザ用の分類アダプタ
pub type BrowserClassifier = Classifier<FetchTransport, TimerDelay>;

/// ビルド時に埋め込まれたAPIキー
pub fn embedded_api_key() -> Option<&'static str> {
    first_non_blank(option_env!("GEMINI_API_KEY"), option_env!("API_KEY"))
}

/// 空白だけの値は未設定として次を見る
fn first_non_blank(primary: Option<&'static str>, fallback: Option<&'static str>) -> Option<&'static str> {
    let present = |key: &&str| !key.trim().is_empty();
    primary.filter(present).or(fallback.filter(present))
}

pub fn browser_config() -> ClassifierConfig {
    ClassifierConfig {
        api_key: embedded_api_key().map(str::to_string),
        model: option_env!("GEMINI_MODEL").unwrap_or(DEFAULT_MODEL).to_string(),
        ..Default::default()
    }
}

pub fn browser_classifier() -> BrowserClassifier {
    Classifier::new(browser_config(), FetchTransport, TimerDelay)
}

fn js_error(value: JsValue) -> Error {
    Error::Transport(format!("{:?}", value))
}

/// window.fetch による送信
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl GenerateContent for FetchTransport {
    async fn generate_content(&self, url: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        let body = serde_json::to_string(request)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let window = web_sys::window().ok_or_else(|| Error::Transport("window unavailable".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        if !resp.ok() {
            return Err(Error::Api(format!("{} {}", resp.status(), resp.status_text())));
        }

        let json = JsFuture::from(resp.json().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        serde_wasm_bindgen::from_value(json).map_err(|e| Error::Transport(e.to_string()))
    }
}

/// setTimeout による待機
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    async fn wait(&self, duration: Duration) {
        gloo::timers::future::sleep(duration).await;
    }
}
