//! ダッシュボード（統計カード + スキャン一覧）

use leptos::prelude::*;
use pneumoscan_common::{
    format_percent, format_upload_date, row_key, DashboardStats, ScanResult, ScanStatus, ViewState,
};

use crate::app::now;

#[component]
pub fn Dashboard<F>(
    state: ReadSignal<ViewState>,
    on_view_scan: F,
) -> impl IntoView
where
    F: Fn(ScanResult) + 'static + Clone + Send,
{
    let stats = move || state.with(|s| DashboardStats::from_scans(s.scans(), now()));

    view! {
        <div class="page">
            <div class="page-header">
                <h1>"Radiologist Dashboard"</h1>
                <p class="text-muted">"Welcome back, Dr. Jenning. Here is today's overview."</p>
            </div>

            <div class="stats-grid">
                <StatCard label="Total Scans" value=Signal::derive(move || stats().total) tone="info" />
                <StatCard label="Abnormal Findings" value=Signal::derive(move || stats().abnormal) tone="danger" />
                <StatCard label="Last 24 Hours" value=Signal::derive(move || stats().recent) tone="success" />
            </div>

            <div class="card">
                <div class="card-header">
                    <h2>"Recent Scans"</h2>
                    <button class="link-button">"View All History"</button>
                </div>
                <table class="scan-table">
                    <thead>
                        <tr>
                            <th>"Patient ID"</th>
                            <th>"Date Uploaded"</th>
                            <th>"Status"</th>
                            <th>"Classification"</th>
                            <th>"Confidence"</th>
                            <th class="align-right">"Action"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || state.with(|s| s.scans().to_vec())
                            key=row_key
                            children=move |scan| {
                                let on_view_scan = on_view_scan.clone();
                                view! { <ScanRow scan=scan on_view_scan=on_view_scan /> }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<usize>, tone: &'static str) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <p class="stat-label">{label}</p>
            <p class=format!("stat-value tone-{}", tone)>{move || value.get()}</p>
        </div>
    }
}

#[component]
fn ScanRow<F>(scan: ScanResult, on_view_scan: F) -> impl IntoView
where
    F: Fn(ScanResult) + 'static + Clone + Send,
{
    let status_class = match scan.status {
        ScanStatus::Completed => "badge badge-success",
        ScanStatus::Processing | ScanStatus::Failed => "badge badge-pending",
    };
    let classification_class = if scan.classification.is_abnormal() {
        "badge badge-abnormal"
    } else {
        "badge badge-normal"
    };

    let patient_id = scan.patient_id.clone();
    let uploaded = format_upload_date(&scan.upload_date);
    let status = scan.status.as_str();
    let classification = scan.classification.as_str();
    let confidence = format_percent(scan.confidence_score);

    view! {
        <tr>
            <td class="strong">{patient_id}</td>
            <td class="text-muted">{uploaded}</td>
            <td><span class=status_class>{status}</span></td>
            <td><span class=classification_class>{classification}</span></td>
            <td>{confidence}</td>
            <td class="align-right">
                <button class="link-button" on:click=move |_| on_view_scan(scan.clone())>
                    "View Analysis"
                </button>
            </td>
        </tr>
    }
}
