use std::path::Path;
use tracing::{info, warn};

use crate::config::CatalogConfig;
use crate::error::Result;
use crate::model::{BoundaryRecord, Flag, ProductFlags, ProductInput, ProductRequest};
use crate::region::RegionSet;
use crate::scan::list_input_files;

/// 名前が一致する最初の境界レコードを探す
pub fn find_boundary<'b>(boundaries: &'b [BoundaryRecord], title: &str) -> Option<&'b BoundaryRecord> {
    boundaries.iter().find(|record| record.name == title)
}

/// プロダクトリクエスト生成
pub struct ProductGenerator<'a> {
    config: &'a CatalogConfig,
    boundaries: &'a [BoundaryRecord],
}

impl<'a> ProductGenerator<'a> {
    pub fn new(config: &'a CatalogConfig, boundaries: &'a [BoundaryRecord]) -> Self {
        Self { config, boundaries }
    }

    pub fn generate_dir(&self, dir: &Path, region_set: &RegionSet) -> Result<Vec<ProductRequest>> {
        info!("Generating product requests for {:?} (set: {})", dir, region_set);

        let mut requests = Vec::new();
        for file in list_input_files(dir)? {
            requests.extend(self.requests_for(region_set, &file.base_name));
        }

        info!("Generated {} product requests for {}", requests.len(), region_set);
        Ok(requests)
    }

    /// 1 ファイル分のリクエスト。境界が見つからなければ空
    pub fn requests_for(&self, region_set: &RegionSet, base_name: &str) -> Vec<ProductRequest> {
        let title = region_set.qualified_name(base_name);
        let Some(boundary) = find_boundary(self.boundaries, &title) else {
            warn!("No boundary named {}, skipping product requests", title);
            return Vec::new();
        };

        let mut requests: Vec<ProductRequest> = self
            .config
            .targets
            .iter()
            .map(|target| self.request(&title, &boundary.id, target.projection_id(), target.pitremove))
            .collect();

        // 州ごとの投影法を追加
        if region_set.is_political() && base_name.len() < 3 {
            match self.config.state_names.get(base_name) {
                Some(state) => {
                    requests.push(self.request(&title, &boundary.id, format!("proj_{}", state), false));
                }
                None => warn!("Unknown state abbreviation {:?} for {}", base_name, title),
            }
        }

        requests
    }

    fn request(&self, title: &str, boundary_id: &str, projection: String, pitremove: bool) -> ProductRequest {
        ProductRequest {
            visible: Flag::TRUE,
            title: title.to_string(),
            public: Flag::TRUE,
            input: ProductInput {
                source: self.config.data_source.clone(),
                boundary: boundary_id.to_string(),
                projection,
                resolution: self.config.resolution.to_pair(),
                products: ProductFlags {
                    slope: Flag::TRUE,
                    hillshade: Flag::TRUE,
                    pitremove: Flag::from(pitremove),
                },
                resampling_method: self.config.resampling_method.clone(),
                file_format: self.config.file_format.clone(),
            },
        }
    }
}
