//! 4 つのカタログ文書を生成するステップ
//!
//! 境界と投影法を先に生成し、その後に境界カタログを読み込んでプロダクトを生成する。

use std::path::{Path, PathBuf};
use tracing::info;

use crate::boundary::BoundaryCataloger;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::product::ProductGenerator;
use crate::projection::{ProjectionCataloger, RegionEpsgTable, WktSource};
use crate::region::RegionSet;
use crate::source::source_descriptor;
use crate::writer::CatalogWriter;

/// 地域区分ラベル付きの入力ディレクトリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDir {
    pub path: PathBuf,
    pub region_set: RegionSet,
}

impl InputDir {
    pub fn new(path: impl Into<PathBuf>, region_set: RegionSet) -> Self {
        Self {
            path: path.into(),
            region_set,
        }
    }
}

/// 境界カタログを生成し、レコード数を返す
pub fn generate_boundaries(config: &CatalogConfig, inputs: &[InputDir], output: &Path) -> Result<usize> {
    let mut cataloger = BoundaryCataloger::new(config);
    let mut records = Vec::new();
    for input in inputs {
        records.extend(cataloger.catalog_dir(&input.path, &input.region_set)?);
    }

    CatalogWriter::new().write(&records, output)?;
    Ok(records.len())
}

/// 投影法カタログを生成し、レコード数を返す
///
/// `regions` を与えると、そのディレクトリの地域名を対応表で引いて地域別の投影法を追加する。
pub fn generate_projections<W: WktSource>(
    config: &CatalogConfig,
    wkt_source: W,
    regions: Option<(&Path, &Path)>,
    output: &Path,
) -> Result<usize> {
    let cataloger = ProjectionCataloger::new(config, wkt_source);
    let records = match regions {
        Some((dir, table_path)) => {
            let table = RegionEpsgTable::from_path(table_path)?;
            info!("Loaded {} region EPSG rows from {:?}", table.len(), table_path);
            cataloger.catalog(Some((dir, &table)))?
        }
        None => cataloger.catalog(None)?,
    };

    CatalogWriter::new().write(&records, output)?;
    Ok(records.len())
}

/// 境界カタログと突き合わせてプロダクトリクエストを生成し、件数を返す
pub fn generate_products(
    config: &CatalogConfig,
    inputs: &[InputDir],
    boundary_catalog: &Path,
    output: &Path,
) -> Result<usize> {
    let writer = CatalogWriter::new();
    let boundaries = writer.read_boundaries(boundary_catalog)?;
    info!("Loaded {} boundaries from {:?}", boundaries.len(), boundary_catalog);

    let generator = ProductGenerator::new(config, &boundaries);
    let mut requests = Vec::new();
    for input in inputs {
        requests.extend(generator.generate_dir(&input.path, &input.region_set)?);
    }

    writer.write(&requests, output)?;
    Ok(requests.len())
}

pub fn generate_sources(output: &Path) -> Result<()> {
    CatalogWriter::new().write(&source_descriptor(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceDescriptor;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sources_identical_across_runs() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.json");
        let second = temp_dir.path().join("second.json");

        generate_sources(&first).unwrap();
        generate_sources(&second).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

        let descriptor: SourceDescriptor = CatalogWriter::new().read(&first).unwrap();
        assert_eq!(descriptor, source_descriptor());
    }

    #[test]
    fn test_products_require_boundary_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let inputs = vec![InputDir::new(temp_dir.path(), RegionSet::new("HUC2"))];
        let result = generate_products(
            &CatalogConfig::default(),
            &inputs,
            &temp_dir.path().join("missing.json"),
            &temp_dir.path().join("products.json"),
        );
        assert!(result.is_err());
    }
}
