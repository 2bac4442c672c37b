//! 画像形式の判定とData URL化

use crate::error::{PneumoScanError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use pneumoscan_common::upload::{is_accepted_mime, to_data_url};
use pneumoscan_common::SelectedImage;
use std::path::Path;

/// 先頭バイトから形式を判定（拡張子は見ない）
pub fn detect_mime_type(bytes: &[u8]) -> Option<&'static str> {
    let mime = image::guess_format(bytes).ok().map(|format| format.to_mime_type())?;
    is_accepted_mime(mime).then_some(mime)
}

/// 画像を読み込み、ブラウザと同じData URL形式にする
pub fn load_image(path: &Path) -> Result<SelectedImage> {
    let bytes = std::fs::read(path)?;
    let mime_type = detect_mime_type(&bytes)
        .ok_or_else(|| PneumoScanError::UnsupportedImage(path.display().to_string()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(SelectedImage {
        file_name,
        data_url: to_data_url(mime_type, &STANDARD.encode(&bytes)),
    })
}
