use std::collections::BTreeMap;

use crate::source::SOURCE_ID;

/// 境界 ID の生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdScheme {
    /// `<set>_<file>`（実行ごとに安定）
    #[default]
    Name,
    /// `<set>_<n>`（1 から始まる通し番号）
    Sequential,
}

/// プロダクトリクエストの解像度
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Resolution {
    /// データサービス側で決める（`"-1"`）
    #[default]
    Placeholder,
    /// 秒角で指定し、度/ピクセルに換算する
    ArcSeconds(f64),
}

impl Resolution {
    pub fn to_pair(self) -> [String; 2] {
        let value = match self {
            Resolution::Placeholder => "-1".to_string(),
            Resolution::ArcSeconds(arcsec) => (arcsec / 3600.0).to_string(),
        };
        [value.clone(), value]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProjection {
    pub epsg: String,
    pub pitremove: bool,
}

impl TargetProjection {
    pub fn new(epsg: &str, pitremove: bool) -> Self {
        Self {
            epsg: epsg.to_string(),
            pitremove,
        }
    }

    pub fn projection_id(&self) -> String {
        format!("proj_{}", self.epsg)
    }
}

/// 州の略称から正式名称への対応表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNames(BTreeMap<&'static str, &'static str>);

const STATES: &[(&str, &str)] = &[
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AS", "American Samoa"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("GU", "Guam"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MP", "Northern Mariana Islands"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NA", "National"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VI", "Virgin Islands"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

impl StateNames {
    pub fn get(&self, abbreviation: &str) -> Option<&'static str> {
        self.0.get(abbreviation).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StateNames {
    fn default() -> Self {
        Self(STATES.iter().copied().collect())
    }
}

/// 境界説明文に差し込むフィーチャ属性名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionFields {
    pub name: String,
    pub states: String,
    pub area: String,
}

impl Default for DescriptionFields {
    fn default() -> Self {
        Self {
            name: "NAME".to_string(),
            states: "STATES".to_string(),
            area: "AREASQKM".to_string(),
        }
    }
}

/// 各生成ステップで共有する設定（起動時に一度だけ構築する）
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub data_source: String,
    pub boundary_projection: String,
    pub id_scheme: IdScheme,
    pub resolution: Resolution,
    pub targets: Vec<TargetProjection>,
    pub interesting_codes: Vec<String>,
    pub resampling_method: String,
    pub file_format: String,
    pub state_names: StateNames,
    /// 地域名を保持するフィーチャ属性
    pub region_name_field: String,
    pub description_fields: DescriptionFields,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_source: SOURCE_ID.to_string(),
            boundary_projection: "EPSG:4269".to_string(),
            id_scheme: IdScheme::default(),
            resolution: Resolution::default(),
            targets: vec![
                TargetProjection::new("4269", false),
                TargetProjection::new("3857", false),
                TargetProjection::new("5070", true),
            ],
            interesting_codes: vec!["4269".to_string(), "3857".to_string(), "5070".to_string()],
            resampling_method: "bilinear".to_string(),
            file_format: "GTiff".to_string(),
            state_names: StateNames::default(),
            region_name_field: "NAME".to_string(),
            description_fields: DescriptionFields::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets() {
        let config = CatalogConfig::default();
        let ids: Vec<String> = config.targets.iter().map(|t| t.projection_id()).collect();
        assert_eq!(ids, ["proj_4269", "proj_3857", "proj_5070"]);

        // 等積図法のみ窪地埋めを要求する
        let pitremove: Vec<bool> = config.targets.iter().map(|t| t.pitremove).collect();
        assert_eq!(pitremove, [false, false, true]);
    }

    #[test]
    fn test_state_names() {
        let states = StateNames::default();
        assert_eq!(states.len(), 57);
        assert_eq!(states.get("IL"), Some("Illinois"));
        assert_eq!(states.get("WV"), Some("West Virginia"));
        assert_eq!(states.get("ZZ"), None);
    }

    #[test]
    fn test_resolution_pair() {
        assert_eq!(Resolution::Placeholder.to_pair(), ["-1", "-1"]);

        let [x, y] = Resolution::ArcSeconds(3600.0).to_pair();
        assert_eq!(x, "1");
        assert_eq!(y, "1");
    }
}
