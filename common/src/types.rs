//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Classification: 診断分類（3値）
//! - ScanResult: 1件のスキャン記録
//! - AnalysisResponse: 解析アダプタの出力（ScanResult生成後に破棄）

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 診断分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Bacterial Pneumonia")]
    BacterialPneumonia,
    #[serde(rename = "Viral Pneumonia")]
    ViralPneumonia,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Normal,
        Classification::BacterialPneumonia,
        Classification::ViralPneumonia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Normal => "Normal",
            Classification::BacterialPneumonia => "Bacterial Pneumonia",
            Classification::ViralPneumonia => "Viral Pneumonia",
        }
    }

    /// Normal以外は異常所見
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Classification::Normal)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::Parse(format!("Unknown classification: {}", s)))
    }
}

/// スキャン処理ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanStatus {
    Processing,
    #[default]
    Completed,
    Failed,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Processing => "Processing",
            ScanStatus::Completed => "Completed",
            ScanStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 画面上のロール（認証ではなく表示切替のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    Radiologist,
    Administrator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Radiologist => "Radiologist",
            UserRole::Administrator => "Administrator",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UserRole::Radiologist => UserRole::Administrator,
            UserRole::Administrator => UserRole::Radiologist,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// スキャン記録
///
/// 作成後は変更しない。Completedの場合、分類・信頼度・レポートは常に揃っている。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub id: String,
    pub patient_id: String,

    /// アップロード日時（ISO-8601）
    pub upload_date: String,

    /// Data URL またはリモートURL
    pub image_url: String,

    pub classification: Classification,

    /// 信頼度 0-100
    pub confidence_score: f64,

    pub report: String,

    #[serde(default)]
    pub status: ScanStatus,
}

/// 解析アダプタの出力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub classification: Classification,
    pub confidence: f64,
    pub report: String,
}

/// JavaScriptの `Date.toISOString()` と同じ形式（ミリ秒 + Z）
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_iso_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// UNIXエポックからのミリ秒（ブラウザの `Date.now()`）を変換
pub fn timestamp_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
