use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `"true"` / `"false"` 文字列としてシリアライズされる真偽値
///
/// 下流のデータサービスは JSON の真偽値ではなく文字列を期待する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flag(pub bool);

impl Flag {
    pub const TRUE: Flag = Flag(true);
    pub const FALSE: Flag = Flag(false);
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(value)
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if self.0 { "true" } else { "false" })
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.as_str() {
            "true" => Ok(Flag(true)),
            "false" => Ok(Flag(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", found {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub visible: Flag,
    pub name: String,
    pub description: String,
    pub projection: String,
    /// ジオメトリ文書全体をシングルクォートで囲んだテキスト（構造化しない）
    pub shape: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub visible: Flag,
    pub name: String,
    pub epsg: String,
    pub content: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub visible: Flag,
    pub title: String,
    pub public: Flag,
    pub input: ProductInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub source: String,
    pub boundary: String,
    pub projection: String,
    pub resolution: [String; 2],
    pub products: ProductFlags,
    #[serde(rename = "resamplingMethod")]
    pub resampling_method: String,
    #[serde(rename = "fileFormat")]
    pub file_format: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFlags {
    pub slope: Flag,
    pub hillshade: Flag,
    pub pitremove: Flag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    #[serde(rename = "_id")]
    pub id: String,
    pub visible: Flag,
    pub name: String,
    pub detail: String,
    pub keywords: Vec<String>,
}
