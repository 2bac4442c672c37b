//! 表示用の集計・派生値
//!
//! ダッシュボードの統計、解析画面の確率バーとヒートマップ、分類ごとの色調

use chrono::{DateTime, Duration, Utc};

use crate::types::{parse_iso_timestamp, Classification, ScanResult};

/// 「直近」とみなす期間
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// ダッシュボード上部の統計カード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub abnormal: usize,
    pub recent: usize,
}

impl DashboardStats {
    pub fn from_scans(scans: &[ScanResult], now: DateTime<Utc>) -> Self {
        Self {
            total: scans.len(),
            abnormal: scans.iter().filter(|s| s.classification.is_abnormal()).count(),
            recent: scans.iter().filter(|s| is_recent(&s.upload_date, now)).count(),
        }
    }
}

/// アップロードから24時間未満か（日時が読めなければ false）
pub fn is_recent(upload_date: &str, now: DateTime<Utc>) -> bool {
    parse_iso_timestamp(upload_date)
        .map(|uploaded| now - uploaded < Duration::hours(RECENT_WINDOW_HOURS))
        .unwrap_or(false)
}

/// 解析画面の確率バー
///
/// 選択された肺炎分類は信頼度そのまま、それ以外は残りを等分した値。
/// 表示専用で、モデルの出力ではない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilitySplit {
    pub bacterial: f64,
    pub viral: f64,
}

impl ProbabilitySplit {
    pub fn for_result(classification: Classification, confidence: f64) -> Self {
        let remainder = (100.0 - confidence) / 2.0;
        let pick = |target: Classification| {
            if classification == target {
                confidence
            } else {
                remainder
            }
        };

        Self {
            bacterial: pick(Classification::BacterialPneumonia),
            viral: pick(Classification::ViralPneumonia),
        }
    }

    pub fn for_scan(scan: &ScanResult) -> Self {
        Self::for_result(scan.classification, scan.confidence_score)
    }
}

/// 疑似ヒートマップ（2層の放射グラデーション）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapOverlay {
    pub inner_color: &'static str,
    pub outer_color: &'static str,
}

impl HeatmapOverlay {
    /// Normal はオーバーレイなし
    pub fn for_classification(classification: Classification) -> Option<Self> {
        match classification {
            Classification::Normal => None,
            Classification::BacterialPneumonia => Some(Self {
                inner_color: "orange",
                outer_color: "yellow",
            }),
            Classification::ViralPneumonia => Some(Self {
                inner_color: "red",
                outer_color: "magenta",
            }),
        }
    }

    pub fn inner_gradient(&self) -> String {
        format!("radial-gradient(circle at 60% 60%, {}, transparent 40%)", self.inner_color)
    }

    pub fn outer_gradient(&self) -> String {
        format!("radial-gradient(circle at 60% 60%, {}, transparent 50%)", self.outer_color)
    }
}

/// 分類ごとの色調
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn for_classification(classification: Classification) -> Self {
        match classification {
            Classification::Normal => Tone::Success,
            Classification::BacterialPneumonia => Tone::Warning,
            Classification::ViralPneumonia => Tone::Danger,
        }
    }

    /// CSSクラス名
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Success => "tone-success",
            Tone::Warning => "tone-warning",
            Tone::Danger => "tone-danger",
        }
    }
}

/// 一覧の行キー（スキャンIDは重複しうるため日時と組にする）
pub fn row_key(scan: &ScanResult) -> (String, String) {
    (scan.id.clone(), scan.upload_date.clone())
}

/// 一覧・詳細画面の日時表示（UTC）。読めなければそのまま返す
pub fn format_upload_date(upload_date: &str) -> String {
    parse_iso_timestamp(upload_date)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| upload_date.to_string())
}

/// 数値の表示（整数なら小数点なし）
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}%", value)
    } else {
        format!("{}%", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_scans;
    use crate::types::{iso_timestamp, timestamp_from_millis, ScanStatus};

    fn now() -> DateTime<Utc> {
        timestamp_from_millis(1_735_000_000_000)
    }

    fn scan_at(upload_date: String, classification: Classification) -> ScanResult {
        ScanResult {
            id: "SCN-1".to_string(),
            patient_id: "PT-1".to_string(),
            upload_date,
            image_url: String::new(),
            classification,
            confidence_score: 90.0,
            report: String::new(),
            status: ScanStatus::Completed,
        }
    }

    #[test]
    fn test_dashboard_stats_seeded() {
        let stats = DashboardStats::from_scans(&seed_scans(now()), now());
        assert_eq!(stats, DashboardStats { total: 3, abnormal: 2, recent: 1 });
    }

    #[test]
    fn test_dashboard_stats_empty() {
        assert_eq!(DashboardStats::from_scans(&[], now()), DashboardStats::default());
    }

    #[test]
    fn test_is_recent_boundary() {
        let just_inside = iso_timestamp(now() - Duration::hours(24) + Duration::milliseconds(1));
        let exactly = iso_timestamp(now() - Duration::hours(24));
        assert!(is_recent(&just_inside, now()));
        assert!(!is_recent(&exactly, now()));
        assert!(!is_recent("not a date", now()));
    }

    #[test]
    fn test_stats_ignore_unparsable_dates() {
        let scans = vec![scan_at("???".to_string(), Classification::ViralPneumonia)];
        let stats = DashboardStats::from_scans(&scans, now());
        assert_eq!(stats.total, 1);
        assert_eq!(stats.abnormal, 1);
        assert_eq!(stats.recent, 0);
    }

    #[test]
    fn test_probability_split() {
        let bacterial = ProbabilitySplit::for_result(Classification::BacterialPneumonia, 89.2);
        assert_eq!(bacterial.bacterial, 89.2);
        assert!((bacterial.viral - 5.4).abs() < 1e-9);

        let viral = ProbabilitySplit::for_result(Classification::ViralPneumonia, 90.0);
        assert_eq!(viral, ProbabilitySplit { bacterial: 5.0, viral: 90.0 });

        let normal = ProbabilitySplit::for_result(Classification::Normal, 98.0);
        assert_eq!(normal, ProbabilitySplit { bacterial: 1.0, viral: 1.0 });
    }

    #[test]
    fn test_heatmap_overlay() {
        assert!(HeatmapOverlay::for_classification(Classification::Normal).is_none());

        let bacterial = HeatmapOverlay::for_classification(Classification::BacterialPneumonia).unwrap();
        assert_eq!(bacterial.inner_gradient(), "radial-gradient(circle at 60% 60%, orange, transparent 40%)");
        assert_eq!(bacterial.outer_gradient(), "radial-gradient(circle at 60% 60%, yellow, transparent 50%)");

        let viral = HeatmapOverlay::for_classification(Classification::ViralPneumonia).unwrap();
        assert_eq!(viral.inner_color, "red");
        assert_eq!(viral.outer_color, "magenta");
    }

    #[test]
    fn test_tone() {
        assert_eq!(Tone::for_classification(Classification::Normal), Tone::Success);
        assert_eq!(Tone::for_classification(Classification::BacterialPneumonia).css_class(), "tone-warning");
        assert_eq!(Tone::for_classification(Classification::ViralPneumonia).css_class(), "tone-danger");
    }

    #[test]
    fn test_row_key_distinguishes_colliding_ids() {
        let first = scan_at("2025-03-01T10:00:00.000Z".to_string(), Classification::Normal);
        let second = scan_at("2025-03-01T10:05:00.000Z".to_string(), Classification::ViralPneumonia);
        assert_eq!(first.id, second.id);
        assert_ne!(row_key(&first), row_key(&second));
        assert_eq!(row_key(&first), row_key(&first.clone()));
    }

    #[test]
    fn test_format_upload_date() {
        assert_eq!(format_upload_date("2025-03-01T10:05:00.000Z"), "2025-03-01 10:05");
        assert_eq!(format_upload_date("unknown"), "unknown");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(88.5), "88.5%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(100.0), "100%");
    }
}
