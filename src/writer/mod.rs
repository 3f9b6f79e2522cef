use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::BoundaryRecord;

const INDENT: &[u8] = b"    ";

/// カタログ JSON の読み書き（4 スペースインデント）
#[derive(Default)]
pub struct CatalogWriter {}

impl CatalogWriter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn write<T: Serialize + ?Sized>(&self, value: &T, output_path: &Path) -> Result<()> {
        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(value, &mut writer)?;
        writer.flush()?;

        tracing::info!("Written catalog: {:?}", output_path);
        Ok(())
    }

    pub fn write_to<T: Serialize + ?Sized, W: Write>(&self, value: &T, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        value.serialize(&mut serializer)?;
        Ok(())
    }

    pub fn read<T: DeserializeOwned>(&self, input_path: &Path) -> Result<T> {
        let file = File::open(input_path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// 生成済みの境界カタログを読み込む
    pub fn read_boundaries(&self, input_path: &Path) -> Result<Vec<BoundaryRecord>> {
        self.read(input_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Flag;
    use crate::source::source_descriptor;
    use tempfile::TempDir;

    #[test]
    fn test_four_space_indent() {
        let mut buffer = Vec::new();
        CatalogWriter::new()
            .write_to(&source_descriptor(), &mut buffer)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("{\n    \"_id\": \"USGS_NED_DATA\""));
        assert!(text.contains("\n        \"USGS NED\"\n"));
    }

    #[test]
    fn test_boundaries_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("boundaries.json");

        let records = vec![BoundaryRecord {
            id: "State_IL".to_string(),
            visible: Flag::TRUE,
            name: "State_IL".to_string(),
            description: "This is the boundary for State_IL.".to_string(),
            projection: "EPSG:4269".to_string(),
            shape: "'{\"type\": \"FeatureCollection\"}'".to_string(),
            keywords: vec!["IL".to_string()],
        }];

        let writer = CatalogWriter::new();
        writer.write(&records, &path).unwrap();
        assert!(path.exists());

        let loaded = writer.read_boundaries(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = CatalogWriter::new().read_boundaries(&temp_dir.path().join("missing.json"));
        assert!(result.is_err());
    }
}
