mod format;

pub use format::{detect_mime_type, load_image};

use crate::error::{PneumoScanError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

fn image_file(path: &Path) -> ImageFile {
    ImageFile {
        path: path.to_path_buf(),
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    }
}

/// 画像ファイル1枚、またはフォルダ内の画像を列挙
///
/// 単一ファイル指定時は拡張子を問わない（形式は読み込み時に判定）
pub fn scan_path(path: &Path, recursive: bool) -> Result<Vec<ImageFile>> {
    if !path.exists() {
        return Err(PneumoScanError::FileNotFound(path.display().to_string()));
    }

    if path.is_file() {
        return Ok(vec![image_file(path)]);
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<ImageFile> = WalkDir::new(path)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| is_image_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .map(|e| image_file(e.path()))
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}
