//! PneumoScan Common Library
//!
//! CLIとWeb(WASM)で共有される型・解析アダプタ・画面状態

pub mod types;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod parser;
pub mod classifier;
pub mod view_state;
pub mod upload;
pub mod display;
pub mod admin;
pub mod seed;

pub use types::{
    AnalysisResponse, Classification, ScanResult, ScanStatus, UserRole,
    iso_timestamp, parse_iso_timestamp, timestamp_from_millis,
};
pub use error::{Error, Result};
pub use gemini::{GeminiRequest, GeminiResponse, DEFAULT_MODEL};
pub use prompts::{build_analysis_request, ANALYSIS_PROMPT};
pub use parser::{extract_json, parse_analysis_response};
pub use classifier::{Classifier, ClassifierConfig, Delay, GenerateContent, MimePolicy};
pub use view_state::{RenderTarget, Screen, ViewState};
pub use upload::{SelectedImage, Submission, UploadForm, build_scan_record, scan_id, submit};
pub use display::{format_percent, format_upload_date, row_key, DashboardStats, HeatmapOverlay, ProbabilitySplit, Tone};
pub use admin::{AnalyticsData, Personnel};
pub use seed::seed_scans;
