//! メインアプリケーションコンポーネント
//!
//! 画面状態は `ViewState` ひとつのシグナルで持ち、
//! 描画先は `render_target` から決める。

use leptos::prelude::*;
use pneumoscan_common::{timestamp_from_millis, RenderTarget, ScanResult, Screen, ViewState};
use chrono::{DateTime, Utc};

use crate::components::{
    admin_panel::AdminPanel,
    analysis_view::AnalysisView,
    dashboard::Dashboard,
    layout::Layout,
    upload_portal::UploadPortal,
};

/// ブラウザの現在時刻
pub fn now() -> DateTime<Utc> {
    timestamp_from_millis(js_sys::Date::now() as i64)
}

/// 描画内容（シグナルの外へ持ち出すための所有版）
#[derive(Clone, PartialEq)]
enum Page {
    Dashboard,
    Upload,
    Analysis(ScanResult),
    Admin,
    AccessDenied,
}

impl From<RenderTarget<'_>> for Page {
    fn from(target: RenderTarget<'_>) -> Self {
        match target {
            RenderTarget::Dashboard => Page::Dashboard,
            RenderTarget::Upload => Page::Upload,
            RenderTarget::Analysis(scan) => Page::Analysis(scan.clone()),
            RenderTarget::Admin => Page::Admin,
            RenderTarget::AccessDenied => Page::AccessDenied,
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (state, set_state) = signal(ViewState::seeded(now()));

    let on_navigate = move |screen: Screen| set_state.update(|s| s.navigate(screen));
    let on_toggle_role = move |_: ()| set_state.update(|s| s.toggle_role());
    let on_view_scan = move |scan: ScanResult| set_state.update(|s| s.select_scan(scan));
    let on_scan_complete = move |scan: ScanResult| {
        log::info!("Scan {} completed for {}", scan.id, scan.patient_id);
        set_state.update(|s| s.complete_upload(scan));
    };
    let on_back = move |_: ()| set_state.update(|s| s.back());

    let page = Memo::new(move |_| state.with(|s| Page::from(s.render_target())));

    view! {
        <Layout state=state on_navigate=on_navigate on_toggle_role=on_toggle_role>
            {move || match page.get() {
                Page::Dashboard => view! {
                    <Dashboard state=state on_view_scan=on_view_scan />
                }.into_any(),
                Page::Upload => view! {
                    <UploadPortal on_scan_complete=on_scan_complete />
                }.into_any(),
                Page::Analysis(scan) => view! {
                    <AnalysisView scan=scan on_back=on_back />
                }.into_any(),
                Page::Admin => view! {
                    <AdminPanel state=state />
                }.into_any(),
                Page::AccessDenied => view! {
                    <div class="access-denied">"Access Denied"</div>
                }.into_any(),
            }}
        </Layout>
    }
}
