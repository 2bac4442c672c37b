//! アップロードフロー
//!
//! 画像選択 → Data URL化 → 送信時にヘッダを除去 → 解析 → ScanResult生成

use crate::classifier::{Classifier, Delay, GenerateContent};
use crate::error::{Error, Result};
use crate::types::{AnalysisResponse, ScanResult, ScanStatus};

/// 受け付ける画像形式
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg"];

pub fn is_accepted_mime(mime_type: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime_type)
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
pub fn strip_data_url_header(data_url: &str) -> Result<&str> {
    data_url
        .split_once(',')
        .map(|(_, data)| data)
        .ok_or(Error::InvalidDataUrl)
}

/// Data URLからMIMEタイプを抽出
pub fn data_url_mime_type(data_url: &str) -> Option<&str> {
    data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split([';', ',']).next())
        .filter(|mime| !mime.is_empty())
}

pub fn to_data_url(mime_type: &str, image_base64: &str) -> String {
    format!("data:{};base64,{}", mime_type, image_base64)
}

/// `SCN-<0..9999>` 形式のスキャンID
pub fn scan_id(n: u32) -> String {
    format!("SCN-{}", n % 10_000)
}

/// 選択済み画像（プレビュー兼保存用のData URL）
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub data_url: String,
}

impl SelectedImage {
    pub fn mime_type(&self) -> Option<&str> {
        data_url_mime_type(&self.data_url)
    }
}

/// 送信1回分の入力
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub patient_id: String,
    pub image_url: String,
}

impl Submission {
    pub fn image_base64(&self) -> Result<&str> {
        strip_data_url_header(&self.image_url)
    }

    pub fn mime_type(&self) -> Option<&str> {
        data_url_mime_type(&self.image_url)
    }
}

/// アップロード画面のフォーム状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    image: Option<SelectedImage>,
    patient_id: String,
    analyzing: bool,
}

impl UploadForm {
    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn set_image(&mut self, image: SelectedImage) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn set_patient_id(&mut self, patient_id: impl Into<String>) {
        self.patient_id = patient_id.into();
    }

    /// 画像あり・患者ID非空・解析中でない場合のみ送信可能
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.patient_id.is_empty() && !self.analyzing
    }

    /// 送信開始。送信不可なら None、可能なら解析中にして入力を返す
    pub fn begin(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        let image = self.image.as_ref()?;
        let submission = Submission {
            patient_id: self.patient_id.clone(),
            image_url: image.data_url.clone(),
        };
        self.analyzing = true;
        Some(submission)
    }

    /// 成否に関わらず解析中フラグを下ろす
    pub fn finish(&mut self) {
        self.analyzing = false;
    }
}

/// 解析結果からスキャン記録を生成
pub fn build_scan_record(
    id: String,
    patient_id: String,
    upload_date: String,
    image_url: String,
    response: AnalysisResponse,
) -> ScanResult {
    ScanResult {
        id,
        patient_id,
        upload_date,
        image_url,
        classification: response.classification,
        confidence_score: response.confidence,
        report: response.report,
        status: ScanStatus::Completed,
    }
}

/// 送信処理
///
/// 解析自体は失敗しないが、Data URLが壊れている場合はエラー（記録は作らない）。
/// `uploaded_at` は解析完了時点で呼ばれる。
pub async fn submit<T, D>(
    classifier: &Classifier<T, D>,
    submission: &Submission,
    id: String,
    uploaded_at: impl FnOnce() -> String,
) -> Result<ScanResult>
where
    T: GenerateContent,
    D: Delay,
{
    let image_base64 = submission.image_base64()?;
    let response = classifier.analyze_as(image_base64, submission.mime_type()).await;

    Ok(build_scan_record(
        id,
        submission.patient_id.clone(),
        uploaded_at(),
        submission.image_url.clone(),
        response,
    ))
}
