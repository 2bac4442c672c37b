//! 解析結果の詳細画面
//!
//! 画像 + 疑似ヒートマップ、診断カード、確率バー、自動レポート

use leptos::prelude::*;
use pneumoscan_common::{
    format_percent, format_upload_date, HeatmapOverlay, ProbabilitySplit, ScanResult, Tone,
};

#[component]
pub fn AnalysisView<F>(scan: ScanResult, on_back: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    let (show_heatmap, set_show_heatmap) = signal(true);

    let overlay = HeatmapOverlay::for_classification(scan.classification);
    let split = ProbabilitySplit::for_scan(&scan);
    let tone = Tone::for_classification(scan.classification);
    let icon = if scan.classification.is_abnormal() { "⚠" } else { "✓" };

    view! {
        <div class="page analysis-page">
            <div class="analysis-header">
                <div class="analysis-title">
                    <button class="back-button" title="Back to dashboard" on:click=move |_| on_back(())>
                        "←"
                    </button>
                    <div>
                        <h1>{format!("Scan Analysis: {}", scan.patient_id)}</h1>
                        <p class="text-muted">
                            {format!("Processed on {}", format_upload_date(&scan.upload_date))}
                        </p>
                    </div>
                </div>
                <div class="analysis-actions">
                    <button class="secondary-button">"Share"</button>
                    <button class="primary-button">"Export Report"</button>
                </div>
            </div>

            <div class="analysis-grid">
                <div class="viewer-column">
                    <div class="xray-viewer">
                        <img src=scan.image_url.clone() alt="X-ray Scan" />
                        {overlay.map(|overlay| view! {
                            <Show when=move || show_heatmap.get()>
                                <div class="heatmap heatmap-inner" style=format!("background: {}", overlay.inner_gradient()) />
                                <div class="heatmap heatmap-outer" style=format!("background: {}", overlay.outer_gradient()) />
                            </Show>
                        })}
                        <div class="viewer-controls">
                            <button on:click=move |_| set_show_heatmap.update(|show| *show = !*show)>
                                {move || if show_heatmap.get() { "Hide AI Overlay" } else { "Show AI Overlay" }}
                            </button>
                        </div>
                    </div>
                    <p class="viewer-note">
                        "* Heatmap visualization highlights regions of interest used by the model for classification."
                    </p>
                </div>

                <div class="diagnosis-column">
                    <div class="card">
                        <h3 class="card-label">"Primary Diagnosis"</h3>
                        <div class=format!("diagnosis-box {}", tone.css_class())>
                            <span class="diagnosis-icon">{icon}</span>
                            <div>
                                <p class="diagnosis-name">{scan.classification.as_str()}</p>
                                <p class="diagnosis-confidence">
                                    {format!("Confidence Score: {}", format_percent(scan.confidence_score))}
                                </p>
                            </div>
                        </div>

                        <ProbabilityBar label="Bacterial Probability" value=split.bacterial class="fill-bacterial" />
                        <ProbabilityBar label="Viral Probability" value=split.viral class="fill-viral" />
                    </div>

                    <div class="card report-card">
                        <h3>"Automated Clinical Report"</h3>
                        <div class="report-body">{scan.report.clone()}</div>
                        <div class="report-footer">
                            <span>"Generated by PneumoScan AI v2.1"</span>
                            <span>{format!("ID: {}", scan.id)}</span>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ProbabilityBar(label: &'static str, value: f64, class: &'static str) -> impl IntoView {
    let width = value.clamp(0.0, 100.0);

    view! {
        <div class="probability">
            <div class="probability-row">
                <span class="text-muted">{label}</span>
                <span class="strong">{format_percent(value)}</span>
            </div>
            <div class="probability-track">
                <div class=format!("probability-fill {}", class) style=format!("width: {}%", width) />
            </div>
        </div>
    }
}
