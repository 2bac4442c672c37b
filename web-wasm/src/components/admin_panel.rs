//! 管理画面（モック分析 + 担当者一覧）
//!
//! グラフはライブラリを使わずCSSの棒・帯で描く。

use leptos::prelude::*;
use pneumoscan_common::admin::{
    distribution_shares, weekly_peak, AUTHORIZED_PERSONNEL, WEEKLY_SCAN_VOLUME,
};
use pneumoscan_common::{AnalyticsData, ViewState};

use crate::app::now;

#[component]
pub fn AdminPanel(state: ReadSignal<ViewState>) -> impl IntoView {
    let analytics = move || state.with(|s| AnalyticsData::from_scans(s.scans(), now()));
    let peak = weekly_peak().max(1);

    let bars = WEEKLY_SCAN_VOLUME
        .iter()
        .map(|(day, count)| {
            let height = f64::from(*count) * 100.0 / f64::from(peak);
            view! {
                <div class="bar">
                    <div class="bar-fill" style=format!("height: {:.1}%", height) title=count.to_string() />
                    <span class="bar-label">{*day}</span>
                </div>
            }
        })
        .collect_view();

    let shares = distribution_shares();
    let segments = shares
        .iter()
        .map(|(name, share, color)| {
            view! {
                <div class="segment" style=format!("width: {:.1}%; background: {}", share, color) title=*name />
            }
        })
        .collect_view();
    let legend = shares
        .iter()
        .map(|(name, _, color)| {
            view! {
                <div class="legend-item">
                    <span class="legend-dot" style=format!("background: {}", color) />
                    <span>{*name}</span>
                </div>
            }
        })
        .collect_view();

    let personnel = AUTHORIZED_PERSONNEL
        .iter()
        .map(|person| {
            view! {
                <tr>
                    <td class="strong">{person.name}</td>
                    <td>{person.role.as_str()}</td>
                    <td class="text-muted">{person.last_active}</td>
                    <td><span class="badge badge-success">{person.status}</span></td>
                    <td class="align-right"><button class="icon-button" title="Settings">"⚙"</button></td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="page admin-page">
            <div class="page-header">
                <h1>"System Administration"</h1>
                <p class="text-muted">"Manage users and view system-wide analytics."</p>
            </div>

            <p class="session-summary">
                {move || {
                    let a = analytics();
                    format!(
                        "This session: {} scans ({} normal, {} bacterial, {} viral), {} in the last 24 hours",
                        a.total_scans, a.normal_cases, a.bacterial_cases, a.viral_cases, a.recent_scans,
                    )
                }}
            </p>

            <div class="analytics-grid">
                <div class="card">
                    <h3>"Weekly Scan Volume"</h3>
                    <div class="bar-chart">{bars}</div>
                </div>
                <div class="card">
                    <h3>"Diagnosis Distribution"</h3>
                    <div class="distribution">{segments}</div>
                    <div class="legend">{legend}</div>
                </div>
            </div>

            <div class="card">
                <div class="card-header">
                    <h2>"Authorized Personnel"</h2>
                    <button class="primary-button">"Add New User"</button>
                </div>
                <table class="scan-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Role"</th>
                            <th>"Last Active"</th>
                            <th>"Status"</th>
                            <th class="align-right">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>{personnel}</tbody>
                </table>
            </div>
        </div>
    }
}
