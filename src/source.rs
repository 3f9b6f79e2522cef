use crate::model::{Flag, SourceDescriptor};

pub const SOURCE_ID: &str = "USGS_NED_DATA";
pub const SOURCE_NAME: &str = "NED 1/3 arc second resolution data";
pub const SOURCE_DETAIL: &str = "Details of the data source that can be recognized by the Data Service";

/// データソースの記述子（入力に依存しない固定値）
pub fn source_descriptor() -> SourceDescriptor {
    SourceDescriptor {
        id: SOURCE_ID.to_string(),
        visible: Flag::TRUE,
        name: SOURCE_NAME.to_string(),
        detail: SOURCE_DETAIL.to_string(),
        keywords: vec!["USGS NED".to_string()],
    }
}
