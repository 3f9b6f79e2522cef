use gdal::vector::LayerAccess;
use gdal::Dataset;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, Result};

/// 1 フィーチャ分の属性（値はすべて文字列化する）
pub type FeatureProperties = BTreeMap<String, String>;

/// 境界ファイルの全レイヤー・全フィーチャの属性を読み込む
pub fn read_features(path: &Path) -> Result<Vec<FeatureProperties>> {
    let dataset = Dataset::open(path)?;

    let mut features = Vec::new();
    for mut layer in dataset.layers() {
        for feature in layer.features() {
            let properties: FeatureProperties = feature
                .fields()
                .filter_map(|(name, value)| value.and_then(|v| v.into_string()).map(|v| (name, v)))
                .collect();
            features.push(properties);
        }
    }

    tracing::debug!("Read {} features from {:?}", features.len(), path);
    Ok(features)
}

/// ジオメトリ文書全体をシングルクォートで囲んだ 1 行のテキストにする
///
/// 下流は文字列として扱うため、ネストした JSON にはしない。
/// キーの順序と数値の表記は元のファイルのまま保つ。
pub fn read_shape_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    let document: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| CatalogError::Geometry {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(format!("'{}'", document))
}
