//! 画面状態のテキスト描画（ターミナル用）

use chrono::{DateTime, Utc};
use pneumoscan_common::admin::{distribution_shares, weekly_peak, AUTHORIZED_PERSONNEL, WEEKLY_SCAN_VOLUME};
use pneumoscan_common::{
    format_percent, format_upload_date, AnalyticsData, DashboardStats, HeatmapOverlay,
    ProbabilitySplit, RenderTarget, ScanResult, ViewState,
};
use std::fmt::Write;

const BAR_WIDTH: u32 = 30;

/// 現在の画面を描画
pub fn render(state: &ViewState, now: DateTime<Utc>) -> String {
    match state.render_target() {
        RenderTarget::Dashboard => render_dashboard(state.scans(), now),
        RenderTarget::Upload => render_upload(),
        RenderTarget::Analysis(scan) => render_analysis(scan),
        RenderTarget::Admin => render_admin(state.scans(), now),
        RenderTarget::AccessDenied => "Access Denied\n".to_string(),
    }
}

pub fn render_dashboard(scans: &[ScanResult], now: DateTime<Utc>) -> String {
    let stats = DashboardStats::from_scans(scans, now);
    let mut out = String::new();

    let _ = writeln!(out, "Radiologist Dashboard");
    let _ = writeln!(
        out,
        "Total Scans: {}  |  Abnormal Findings: {}  |  Last 24 Hours: {}\n",
        stats.total, stats.abnormal, stats.recent
    );
    let _ = writeln!(
        out,
        "{:<10} {:<10} {:<17} {:<10} {:<20} {:>10}",
        "Scan", "Patient", "Uploaded", "Status", "Classification", "Confidence"
    );
    for scan in scans {
        let _ = writeln!(
            out,
            "{:<10} {:<10} {:<17} {:<10} {:<20} {:>10}",
            scan.id,
            scan.patient_id,
            format_upload_date(&scan.upload_date),
            scan.status,
            scan.classification,
            format_percent(scan.confidence_score),
        );
    }

    out
}

fn render_upload() -> String {
    "New Scan Upload\n`pneumoscan analyze <PATH> --patient-id <ID>` で画像を解析します\n".to_string()
}

pub fn render_analysis(scan: &ScanResult) -> String {
    let split = ProbabilitySplit::for_scan(scan);
    let mut out = String::new();

    let _ = writeln!(out, "Scan Analysis: {}", scan.patient_id);
    let _ = writeln!(out, "Processed on {}  (ID: {})\n", format_upload_date(&scan.upload_date), scan.id);
    let _ = writeln!(out, "Primary Diagnosis: {}", scan.classification);
    let _ = writeln!(out, "Confidence Score:  {}", format_percent(scan.confidence_score));
    let _ = writeln!(out, "  Bacterial Probability {:>7} {}", format_percent(split.bacterial), bar(split.bacterial, 100.0));
    let _ = writeln!(out, "  Viral Probability     {:>7} {}", format_percent(split.viral), bar(split.viral, 100.0));

    if let Some(overlay) = HeatmapOverlay::for_classification(scan.classification) {
        let _ = writeln!(out, "  AI Overlay: {}/{} at 60% 60%", overlay.inner_color, overlay.outer_color);
    }

    let _ = writeln!(out, "\nAutomated Clinical Report");
    let _ = writeln!(out, "{}", scan.report);

    out
}

pub fn render_admin(scans: &[ScanResult], now: DateTime<Utc>) -> String {
    let analytics = AnalyticsData::from_scans(scans, now);
    let peak = f64::from(weekly_peak().max(1));
    let mut out = String::new();

    let _ = writeln!(out, "System Administration");
    let _ = writeln!(
        out,
        "This session: {} scans ({} abnormal), {} in the last 24 hours\n",
        analytics.total_scans,
        analytics.abnormal_cases(),
        analytics.recent_scans
    );

    let _ = writeln!(out, "Weekly Scan Volume");
    for (day, count) in WEEKLY_SCAN_VOLUME {
        let _ = writeln!(out, "  {} {:>3} {}", day, count, bar(f64::from(count), peak));
    }

    let _ = writeln!(out, "\nDiagnosis Distribution");
    for (name, share, _) in distribution_shares() {
        let _ = writeln!(out, "  {:<10} {:>5.1}%", name, share);
    }

    let _ = writeln!(out, "\nAuthorized Personnel");
    for person in AUTHORIZED_PERSONNEL {
        let _ = writeln!(
            out,
            "  {:<18} {:<14} {:<8} {}",
            person.name, person.role, person.last_active, person.status
        );
    }

    out
}

fn bar(value: f64, max: f64) -> String {
    let filled = ((value / max).clamp(0.0, 1.0) * f64::from(BAR_WIDTH)).round() as usize;
    "█".repeat(filled)
}
