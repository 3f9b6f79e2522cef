use std::path::Path;
use tracing::{debug, info};

use crate::config::{CatalogConfig, DescriptionFields, IdScheme};
use crate::error::Result;
use crate::model::{BoundaryRecord, Flag};
use crate::reader::{read_features, read_shape_text, FeatureProperties};
use crate::region::RegionSet;
use crate::relevance::is_relevant;
use crate::scan::{list_input_files, InputFile};

/// 境界カタログ生成
///
/// 連番 ID を使う場合、番号は同じインスタンスで処理した全ディレクトリで共有される。
pub struct BoundaryCataloger<'a> {
    config: &'a CatalogConfig,
    sequence: usize,
}

impl<'a> BoundaryCataloger<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        Self {
            config,
            sequence: 0,
        }
    }

    /// ディレクトリ内の対象ファイルから境界レコードを生成する
    pub fn catalog_dir(&mut self, dir: &Path, region_set: &RegionSet) -> Result<Vec<BoundaryRecord>> {
        info!("Cataloging boundaries in {:?} (set: {})", dir, region_set);

        let mut records = Vec::new();
        for file in list_input_files(dir)? {
            if !is_relevant(region_set, &file.base_name) {
                debug!("Skipping irrelevant file for {}: {:?}", region_set, file.path);
                continue;
            }
            records.extend(self.catalog_file(&file, region_set)?);
        }

        info!("Generated {} boundary records for {}", records.len(), region_set);
        Ok(records)
    }

    fn catalog_file(&mut self, file: &InputFile, region_set: &RegionSet) -> Result<Vec<BoundaryRecord>> {
        let features = read_features(&file.path)?;
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let shape = read_shape_text(&file.path)?;
        Ok(features
            .iter()
            .map(|properties| self.build_record(region_set, &file.base_name, &shape, properties))
            .collect())
    }

    pub fn build_record(
        &mut self,
        region_set: &RegionSet,
        base_name: &str,
        shape: &str,
        properties: &FeatureProperties,
    ) -> BoundaryRecord {
        let name = region_set.qualified_name(base_name);
        let id = match self.config.id_scheme {
            IdScheme::Name => name.clone(),
            IdScheme::Sequential => {
                self.sequence += 1;
                region_set.qualified_name(&self.sequence.to_string())
            }
        };

        let keyword = if region_set.is_hydrologic() {
            "HUC".to_string()
        } else {
            base_name.to_string()
        };

        BoundaryRecord {
            id,
            visible: Flag::TRUE,
            description: describe(&name, properties, &self.config.description_fields),
            name,
            projection: self.config.boundary_projection.clone(),
            shape: shape.to_string(),
            keywords: vec![keyword],
        }
    }
}

/// 属性があれば名称・構成州・面積を説明文に差し込む
pub fn describe(name: &str, properties: &FeatureProperties, fields: &DescriptionFields) -> String {
    let mut description = format!("This is the boundary for {}", name);

    if let Some(region_name) = non_empty(properties, &fields.name) {
        description.push_str(&format!(" ({})", region_name));
    }
    if let Some(states) = non_empty(properties, &fields.states) {
        description.push_str(&format!(", covering {}", states));
    }
    if let Some(area) = non_empty(properties, &fields.area) {
        description.push_str(&format!(", area {} sq km", area));
    }

    description.push('.');
    description
}

fn non_empty<'p>(properties: &'p FeatureProperties, field: &str) -> Option<&'p str> {
    properties
        .get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(pairs: &[(&str, &str)]) -> FeatureProperties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_describe_without_properties() {
        let description = describe("State_IL", &FeatureProperties::new(), &DescriptionFields::default());
        assert_eq!(description, "This is the boundary for State_IL.");
    }

    #[test]
    fn test_describe_with_properties() {
        let props = properties(&[
            ("NAME", "Ohio Region"),
            ("STATES", "IL,IN,KY,OH"),
            ("AREASQKM", "421000"),
        ]);
        let description = describe("HUC2_05", &props, &DescriptionFields::default());
        assert_eq!(
            description,
            "This is the boundary for HUC2_05 (Ohio Region), covering IL,IN,KY,OH, area 421000 sq km."
        );
    }

    #[test]
    fn test_describe_ignores_blank_values() {
        let props = properties(&[("NAME", "Illinois"), ("STATES", "  ")]);
        let description = describe("State_IL", &props, &DescriptionFields::default());
        assert_eq!(description, "This is the boundary for State_IL (Illinois).");
    }

    #[test]
    fn test_build_record_name_scheme() {
        let config = CatalogConfig::default();
        let mut cataloger = BoundaryCataloger::new(&config);
        let set = RegionSet::new("HUC2");

        let record = cataloger.build_record(&set, "07", "'{}'", &FeatureProperties::new());
        assert_eq!(record.id, "HUC2_07");
        assert_eq!(record.name, "HUC2_07");
        assert_eq!(record.projection, "EPSG:4269");
        assert_eq!(record.keywords, ["HUC"]);
        assert_eq!(record.shape, "'{}'");
        assert_eq!(record.visible, Flag::TRUE);
    }

    #[test]
    fn test_build_record_sequential_scheme() {
        let config = CatalogConfig {
            id_scheme: IdScheme::Sequential,
            ..CatalogConfig::default()
        };
        let mut cataloger = BoundaryCataloger::new(&config);
        let huc = RegionSet::new("HUC2");
        let state = RegionSet::new("State");

        let first = cataloger.build_record(&huc, "07", "''", &FeatureProperties::new());
        let second = cataloger.build_record(&state, "IL", "''", &FeatureProperties::new());
        assert_eq!(first.id, "HUC2_1");
        assert_eq!(second.id, "State_2");
        // 名前は ID 方式に関係なく安定
        assert_eq!(second.name, "State_IL");
        assert_eq!(second.keywords, ["IL"]);
    }
}
