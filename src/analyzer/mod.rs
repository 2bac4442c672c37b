//! 画像解析の実行（アップロード画面と同じフローをCLIで回す）

mod gemini_http;

pub use gemini_http::{build_classifier, CliClassifier, HttpTransport, TokioDelay};

use crate::error::{PneumoScanError, Result};
use crate::scanner::{self, ImageFile};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use pneumoscan_common::{
    iso_timestamp, scan_id, submit, Classifier, Delay, GenerateContent, ScanResult, UploadForm,
    ViewState,
};
use rand::Rng;
use std::time::Duration;

/// 1枚ずつ解析し、完了したスキャンを画面状態へ追加する
///
/// 読み込めない画像はスキップして続行する。戻り値は追加した記録。
pub async fn analyze_images<T, D>(
    classifier: &Classifier<T, D>,
    images: &[ImageFile],
    patient_id: &str,
    state: &mut ViewState,
    verbose: bool,
) -> Result<Vec<ScanResult>>
where
    T: GenerateContent,
    D: Delay,
{
    // 送信可否はアップロード画面と同じ判定（空文字のみ不可）
    if patient_id.is_empty() {
        return Err(PneumoScanError::EmptyPatientId);
    }

    let mut completed = Vec::new();

    for (idx, image) in images.iter().enumerate() {
        if verbose {
            println!("  [{}/{}] {}", idx + 1, images.len(), image.path.display());
        }

        let selected = match scanner::load_image(&image.path) {
            Ok(selected) => selected,
            Err(e) => {
                log::warn!("Skipping {}: {}", image.path.display(), e);
                println!("  ⚠ スキップ: {} ({})", image.file_name, e);
                continue;
            }
        };

        let mut form = UploadForm::default();
        form.set_image(selected);
        form.set_patient_id(patient_id);
        let Some(submission) = form.begin() else {
            continue;
        };

        let spinner = spinner(format!("{} を解析中...", image.file_name));
        let id = scan_id(rand::rng().random_range(0..10_000));
        let result = submit(classifier, &submission, id, || iso_timestamp(Utc::now())).await;
        spinner.finish_and_clear();
        form.finish();

        match result {
            Ok(scan) => {
                println!(
                    "  ✔ {} → {} ({})",
                    image.file_name,
                    scan.classification,
                    pneumoscan_common::format_percent(scan.confidence_score)
                );
                state.complete_upload(scan.clone());
                completed.push(scan);
            }
            Err(e) => {
                log::error!("Analysis error for {}: {}", image.file_name, e);
                println!("  ✖ 解析失敗: {} ({})", image.file_name, e);
            }
        }
    }

    Ok(completed)
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
