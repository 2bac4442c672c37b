//! 初期表示用のサンプルスキャン

use chrono::{DateTime, Duration, Utc};

use crate::types::{iso_timestamp, Classification, ScanResult, ScanStatus};

/// サンプル3件（2日前・1日前・現在）
pub fn seed_scans(now: DateTime<Utc>) -> Vec<ScanResult> {
    let seed = |id: &str, patient_id: &str, days_ago: i64, n: u8, classification: Classification, confidence_score: f64, report: &str| {
        ScanResult {
            id: id.to_string(),
            patient_id: patient_id.to_string(),
            upload_date: iso_timestamp(now - Duration::days(days_ago)),
            image_url: format!("https://picsum.photos/400/400?grayscale&random={}", n),
            classification,
            confidence_score,
            report: report.to_string(),
            status: ScanStatus::Completed,
        }
    };

    vec![
        seed(
            "SCN-1001", "PT-8923", 2, 1,
            Classification::Normal, 98.5,
            "No significant abnormalities detected. Lung fields are clear.",
        ),
        seed(
            "SCN-1002", "PT-4421", 1, 2,
            Classification::BacterialPneumonia, 89.2,
            "Focal consolidation observed in the right lower lobe, consistent with bacterial pneumonia.",
        ),
        seed(
            "SCN-1003", "PT-1102", 0, 3,
            Classification::ViralPneumonia, 92.1,
            "Diffuse interstitial infiltrates noted bilaterally. Suggestive of viral etiology.",
        ),
    ]
}
