//! PneumoScan CLI
//!
//! ブラウザ版と同じ分類アダプタ・画面状態を使い、
//! ローカルの胸部X線画像を解析する。

pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod analyzer;
pub mod report;
