//! UIコンポーネント

pub mod layout;
pub mod dashboard;
pub mod upload_portal;
pub mod analysis_view;
pub mod admin_panel;
pub mod progress_bar;
