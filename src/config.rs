//! CLI設定（~/.config/pneumoscan/config.json）

use crate::error::{PneumoScanError, Result};
use pneumoscan_common::{ClassifierConfig, MimePolicy, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// APIキーを読む環境変数（先頭が優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_seconds: u64,
    pub simulated_latency_ms: u64,
    /// true ならアップロード画像の実際のMIMEタイプを送る（既定は常にPNG）
    pub send_detected_mime_type: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            timeout_seconds: 120,
            simulated_latency_ms: 2000,
            send_detected_mime_type: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルがなければ既定値
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PneumoScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pneumoscan").join("config.json"))
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 環境変数を優先し、なければ設定ファイルのキー
    pub fn effective_api_key(&self) -> Option<String> {
        self.resolve_api_key(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env(name))
            .chain(self.api_key.clone())
            .find(|key| !key.trim().is_empty())
    }

    pub fn to_classifier_config(&self, api_key: Option<String>) -> ClassifierConfig {
        ClassifierConfig {
            api_key,
            model: self.model.clone(),
            simulated_latency: Duration::from_millis(self.simulated_latency_ms),
            mime_policy: if self.send_detected_mime_type {
                MimePolicy::FromUpload
            } else {
                MimePolicy::FixedPng
            },
        }
    }
}
