use thiserror::Error;

#[derive(Error, Debug)]
pub enum PneumoScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です（PNG/JPEGのみ）: {0}")]
    UnsupportedImage(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("患者IDが入力されていません。`--patient-id PT-12345` のように指定してください")]
    EmptyPatientId,

    #[error("スキャンが見つかりません: {0}")]
    ScanNotFound(String),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Common(#[from] pneumoscan_common::Error),
}

pub type Result<T> = std::result::Result<T, PneumoScanError>;
