//! 解析中インジケータ
//!
//! 応答時間が読めないため進捗率は出さず、往復するバーのみ表示する。

use leptos::prelude::*;

#[component]
pub fn ProgressBar(message: &'static str) -> impl IntoView {
    view! {
        <div class="progress-container" role="status">
            <div class="progress-bar">
                <div class="progress-fill indeterminate" />
            </div>
            <p class="progress-text">{message}</p>
        </div>
    }
}
