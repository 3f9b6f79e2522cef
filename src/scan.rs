use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};

/// ディレクトリ内の境界ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// 最初の `.` より前の部分（`IL.geojson` -> `IL`）
    pub base_name: String,
}

pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// ディレクトリ直下のファイルをファイル名順に列挙する
pub fn list_input_files(dir: &Path) -> Result<Vec<InputFile>> {
    if !dir.is_dir() {
        return Err(CatalogError::InvalidDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let base_name = base_name(file_name).to_string();
        files.push(InputFile { path, base_name });
    }

    // read_dir の順序は不定なのでソートする
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
