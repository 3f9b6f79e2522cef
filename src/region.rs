use std::fmt;
use std::path::Path;

/// 入力ディレクトリ内の境界ファイル群をまとめる地域区分のラベル（"HUC2", "State" など）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionSet(String);

impl RegionSet {
    pub const HUC2: &'static str = "HUC2";
    pub const HUC4: &'static str = "HUC4";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// ディレクトリパスからラベルを推定する
    ///
    /// 末尾の要素を使い、それが `geojson` を含む場合は一つ上の要素を使う。
    /// `/data/HUC/HUC2/geojson/` -> `HUC2`, `/data/State/geojson` -> `State`
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let mut names = dir
            .components()
            .rev()
            .filter_map(|c| match c {
                std::path::Component::Normal(name) => name.to_str(),
                _ => None,
            });

        let last = names.next()?;
        if last.contains("geojson") {
            names.next().map(Self::new)
        } else {
            Some(Self::new(last))
        }
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn is_hydrologic(&self) -> bool {
        self.0.contains("HUC")
    }

    pub fn is_political(&self) -> bool {
        self.0.contains("State")
    }

    /// `<set>_<file>` 形式の境界名
    pub fn qualified_name(&self, base_name: &str) -> String {
        format!("{}_{}", self.0, base_name)
    }
}

impl fmt::Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
