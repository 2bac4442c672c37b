//! 管理画面の集計とモックデータ
//!
//! 週次ボリューム・診断分布・担当者一覧は固定のデモ値。

use chrono::{DateTime, Utc};

use crate::display::is_recent;
use crate::types::{Classification, ScanResult, UserRole};

/// 週次スキャン数（月〜日）
pub const WEEKLY_SCAN_VOLUME: [(&str, u32); 7] = [
    ("Mon", 24),
    ("Tue", 35),
    ("Wed", 42),
    ("Thu", 28),
    ("Fri", 55),
    ("Sat", 18),
    ("Sun", 12),
];

/// 診断分布（凡例名, 件数, 色）
pub const DIAGNOSIS_DISTRIBUTION: [(&str, u32, &str); 3] = [
    ("Normal", 400, "#0088FE"),
    ("Bacterial", 300, "#00C49F"),
    ("Viral", 300, "#FFBB28"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Personnel {
    pub name: &'static str,
    pub role: UserRole,
    pub last_active: &'static str,
    pub status: &'static str,
}

pub const AUTHORIZED_PERSONNEL: [Personnel; 3] = [
    Personnel {
        name: "Dr. Sarah Jenning",
        role: UserRole::Radiologist,
        last_active: "Now",
        status: "Active",
    },
    Personnel {
        name: "Dr. James Wilson",
        role: UserRole::Radiologist,
        last_active: "2h ago",
        status: "Active",
    },
    Personnel {
        name: "Admin System",
        role: UserRole::Administrator,
        last_active: "1d ago",
        status: "Active",
    },
];

/// 週次グラフの最大値（棒の高さの基準）
pub fn weekly_peak() -> u32 {
    WEEKLY_SCAN_VOLUME
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0)
}

/// 分布の割合（%）
pub fn distribution_shares() -> Vec<(&'static str, f64, &'static str)> {
    let total: u32 = DIAGNOSIS_DISTRIBUTION.iter().map(|(_, count, _)| count).sum();
    DIAGNOSIS_DISTRIBUTION
        .iter()
        .map(|(name, count, color)| {
            let share = if total == 0 {
                0.0
            } else {
                f64::from(*count) * 100.0 / f64::from(total)
            };
            (*name, share, *color)
        })
        .collect()
}

/// スキャン一覧の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyticsData {
    pub total_scans: usize,
    pub normal_cases: usize,
    pub bacterial_cases: usize,
    pub viral_cases: usize,
    pub recent_scans: usize,
}

impl AnalyticsData {
    pub fn from_scans(scans: &[ScanResult], now: DateTime<Utc>) -> Self {
        let count = |target: Classification| {
            scans.iter().filter(|s| s.classification == target).count()
        };

        Self {
            total_scans: scans.len(),
            normal_cases: count(Classification::Normal),
            bacterial_cases: count(Classification::BacterialPneumonia),
            viral_cases: count(Classification::ViralPneumonia),
            recent_scans: scans.iter().filter(|s| is_recent(&s.upload_date, now)).count(),
        }
    }

    pub fn abnormal_cases(&self) -> usize {
        self.bacterial_cases + self.viral_cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_scans;
    use crate::types::timestamp_from_millis;

    #[test]
    fn test_weekly_volume() {
        let counts: Vec<u32> = WEEKLY_SCAN_VOLUME.iter().map(|(_, c)| *c).collect();
        assert_eq!(counts, vec![24, 35, 42, 28, 55, 18, 12]);
        assert_eq!(WEEKLY_SCAN_VOLUME[0].0, "Mon");
        assert_eq!(WEEKLY_SCAN_VOLUME[6].0, "Sun");
        assert_eq!(weekly_peak(), 55);
    }

    #[test]
    fn test_distribution_shares() {
        let shares = distribution_shares();
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].0, "Normal");
        assert!((shares[0].1 - 40.0).abs() < 1e-9);
        assert!((shares[1].1 - 30.0).abs() < 1e-9);
        assert!((shares[2].1 - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_authorized_personnel() {
        assert_eq!(AUTHORIZED_PERSONNEL.len(), 3);
        assert_eq!(AUTHORIZED_PERSONNEL[0].name, "Dr. Sarah Jenning");
        assert_eq!(AUTHORIZED_PERSONNEL[2].role, UserRole::Administrator);
        assert!(AUTHORIZED_PERSONNEL.iter().all(|p| p.status == "Active"));
    }

    #[test]
    fn test_analytics_from_seeded_scans() {
        let now = timestamp_from_millis(1_735_000_000_000);
        let analytics = AnalyticsData::from_scans(&seed_scans(now), now);

        assert_eq!(analytics.total_scans, 3);
        assert_eq!(analytics.normal_cases, 1);
        assert_eq!(analytics.bacterial_cases, 1);
        assert_eq!(analytics.viral_cases, 1);
        assert_eq!(analytics.abnormal_cases(), 2);
        assert_eq!(analytics.recent_scans, 1);
    }
}
