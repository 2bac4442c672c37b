//! アップロード画面
//!
//! 画像(PNG/JPEG)と患者IDを受け取り、解析してスキャン記録を作る。

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, HtmlInputElement, ProgressEvent};
use pneumoscan_common::{
    iso_timestamp, scan_id, submit, upload::is_accepted_mime, ScanResult, SelectedImage, UploadForm,
};

use crate::api::gemini::browser_classifier;
use crate::app::now;
use crate::components::progress_bar::ProgressBar;

const FAILURE_ALERT: &str = "Analysis failed. Please try again.";

#[component]
pub fn UploadPortal<F>(on_scan_complete: F) -> impl IntoView
where
    F: Fn(ScanResult) + 'static + Clone + Send,
{
    let (form, set_form) = signal(UploadForm::default());
    let (is_dragover, set_is_dragover) = signal(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let handle_files = move |files: FileList| {
        if let Some(file) = files.get(0) {
            read_file(file, move |image| set_form.update(|f| f.set_image(image)));
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_file_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            handle_files(files);
        }
        // 同じファイルを選び直せるように
        input.set_value("");
    };

    let on_browse = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_analyze = move |_| {
        let Some(submission) = set_form.try_update(|f| f.begin()).flatten() else {
            return;
        };
        let on_scan_complete = on_scan_complete.clone();

        spawn_local(async move {
            let classifier = browser_classifier();
            let id = scan_id((js_sys::Math::random() * 10_000.0) as u32);
            let result = submit(&classifier, &submission, id, || iso_timestamp(now())).await;

            // 完了時には画面が切り替わりフォームが破棄されていることがある
            set_form.try_update(|f| f.finish());

            match result {
                Ok(scan) => on_scan_complete(scan),
                Err(e) => {
                    log::error!("Analysis error: {}", e);
                    gloo::dialogs::alert(FAILURE_ALERT);
                }
            }
        });
    };

    let can_submit = move || form.with(|f| f.can_submit());
    let is_analyzing = move || form.with(|f| f.is_analyzing());
    let preview = move || form.with(|f| f.image().map(|image| image.data_url.clone()));

    view! {
        <div class="page upload-page">
            <div class="page-header">
                <h1>"New Scan Upload"</h1>
                <p class="text-muted">"Upload an X-ray image for AI-powered analysis."</p>
            </div>

            <div class="upload-grid">
                <div class="upload-main">
                    <div class="card">
                        <label for="patient-id">"Patient Identifier"</label>
                        <input
                            type="text"
                            id="patient-id"
                            placeholder="Enter Patient ID (e.g. PT-12345)"
                            prop:value=move || form.with(|f| f.patient_id().to_string())
                            on:input=move |ev| {
                                set_form.update(|f| f.set_patient_id(event_target_value(&ev)));
                            }
                        />
                    </div>

                    <div
                        class=move || {
                            let mut classes = vec!["upload-area"];
                            if preview().is_some() {
                                classes.push("has-preview");
                            }
                            if is_dragover.get() {
                                classes.push("dragover");
                            }
                            classes.join(" ")
                        }
                        on:drop=on_drop
                        on:dragover=on_dragover
                        on:dragleave=move |_| set_is_dragover.set(false)
                    >
                        <Show
                            when=move || preview().is_some()
                            fallback=move || view! {
                                <div class="upload-icon">"⬆"</div>
                                <p class="upload-title">"Drag and drop your scan here"</p>
                                <p class="text-muted">"Supports JPG, PNG (Max 10MB)"</p>
                                <button class="secondary-button" on:click=on_browse>"Browse Files"</button>
                            }
                        >
                            <div class="preview">
                                <img src=move || preview().unwrap_or_default() alt="Preview" />
                                <button
                                    class="clear-button"
                                    title="Remove image"
                                    on:click=move |_| set_form.update(|f| f.clear_image())
                                >
                                    "✕"
                                </button>
                            </div>
                        </Show>
                        <input
                            type="file"
                            class="hidden"
                            accept="image/png, image/jpeg"
                            node_ref=file_input
                            on:change=on_file_change
                        />
                    </div>
                </div>

                <div class="card action-panel">
                    <h3>"Analysis Configuration"</h3>
                    <div class="model-info">
                        <p>"Model: " <strong>"PneumoNet v2.5 (Gemini)"</strong></p>
                        <p class="text-muted">"Optimized for Chest Radiography"</p>
                    </div>
                    <ul class="feature-list">
                        <li>"High-resolution heatmap generation"</li>
                        <li>"Multi-class classification"</li>
                        <li>"Automated report drafting"</li>
                    </ul>

                    <Show when=is_analyzing>
                        <ProgressBar message="Processing..." />
                    </Show>

                    <button
                        class="primary-button run-analysis"
                        disabled=move || !can_submit()
                        on:click=on_analyze
                    >
                        {move || if is_analyzing() { "Processing..." } else { "Run Analysis →" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// ファイルをData URLとして読み込む
fn read_file<F>(file: File, on_loaded: F)
where
    F: Fn(SelectedImage) + 'static,
{
    let file_name = file.name();
    let mime_type = file.type_();
    if !is_accepted_mime(&mime_type) {
        log::warn!("Ignored {} ({}): only PNG and JPEG are supported", file_name, mime_type);
        return;
    }

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::error!("FileReader unavailable: {:?}", e);
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: ProgressEvent| {
        if let Some(data_url) = reader_clone.result().ok().and_then(|r| r.as_string()) {
            on_loaded(SelectedImage {
                file_name: file_name.clone(),
                data_url,
            });
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onloadend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        log::error!("Failed to read file: {:?}", e);
    }
}
