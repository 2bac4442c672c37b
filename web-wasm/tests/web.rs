//! ブラウザ上のテスト（wasm-pack test --headless --chrome）

#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use pneumoscan_common::{
    Classification, Classifier, ClassifierConfig, Delay, ScanStatus, Submission, submit, scan_id,
};
use pneumoscan_wasm::{browser_classifier, FetchTransport, TimerDelay};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn demo_classifier(latency_ms: u64) -> Classifier<FetchTransport, TimerDelay> {
    let config = ClassifierConfig {
        api_key: None,
        simulated_latency: Duration::from_millis(latency_ms),
        ..Default::default()
    };
    Classifier::new(config, FetchTransport, TimerDelay)
}

#[wasm_bindgen_test]
async fn test_timer_delay_waits() {
    let start = js_sys::Date::now();
    TimerDelay.wait(Duration::from_millis(50)).await;
    assert!(js_sys::Date::now() - start >= 40.0);
}

#[wasm_bindgen_test]
async fn test_demo_mode_in_browser() {
    let response = demo_classifier(20).analyze("iVBORw0KGgo=").await;
    assert_eq!(response.classification, Classification::BacterialPneumonia);
    assert_eq!(response.confidence, 88.5);
}

#[wasm_bindgen_test]
async fn test_submit_in_browser() {
    let submission = Submission {
        patient_id: "PT-12345".to_string(),
        image_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
    };

    let scan = submit(&demo_classifier(0), &submission, scan_id(7), || "2025-03-01T10:00:00.000Z".to_string())
        .await
        .expect("送信失敗");

    assert_eq!(scan.id, "SCN-7");
    assert_eq!(scan.patient_id, "PT-12345");
    assert_eq!(scan.status, ScanStatus::Completed);
}

#[wasm_bindgen_test]
fn test_browser_classifier_uses_default_model() {
    let classifier = browser_classifier();
    if option_env!("GEMINI_MODEL").is_none() {
        assert_eq!(classifier.config().model, pneumoscan_common::DEFAULT_MODEL);
    }
}
