use gdal::spatial_ref::SpatialRef;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::model::{Flag, ProjectionRecord};
use crate::reader::read_features;
use crate::scan::list_input_files;

/// `gdalsrsinfo` の出力で WKT の直前に現れる見出し行の接頭辞
///
/// GDAL 2 は `OGC WKT :`、GDAL 3 は `OGC WKT2:2019 :` のように版ごとに見出しが変わる。
pub const WKT_MARKER_PREFIX: &str = "OGC WKT";

/// EPSG コードから WKT を取得する
pub trait WktSource {
    fn wkt(&self, epsg: &str) -> Result<String>;
}

/// 外部コマンド `gdalsrsinfo` で WKT を取得する
#[derive(Debug, Clone)]
pub struct SrsInfoTool {
    program: PathBuf,
}

impl SrsInfoTool {
    pub const PROGRAM: &'static str = "gdalsrsinfo";

    /// PATH から `gdalsrsinfo` を探す
    pub fn locate() -> Result<Self> {
        let program = which::which(Self::PROGRAM)?;
        debug!("Using projection tool: {:?}", program);
        Ok(Self { program })
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl WktSource for SrsInfoTool {
    fn wkt(&self, epsg: &str) -> Result<String> {
        // WKT1 のみを出力させる
        let output = Command::new(&self.program)
            .args(["-o", "wkt1"])
            .arg(format!("epsg:{}", epsg))
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim().lines().next() {
                Some(line) => line.to_string(),
                None => format!("status {}", output.status),
            };
            return Err(CatalogError::ToolFailed {
                code: epsg.to_string(),
                detail,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_wkt(&stdout).ok_or_else(|| CatalogError::Wkt {
            code: epsg.to_string(),
            detail: "no WKT in tool output".to_string(),
        })
    }
}

/// GDAL ライブラリの SpatialRef で WKT を取得する
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialRefWkt;

impl WktSource for SpatialRefWkt {
    fn wkt(&self, epsg: &str) -> Result<String> {
        let code: u32 = epsg.trim().parse().map_err(|_| CatalogError::Wkt {
            code: epsg.to_string(),
            detail: "EPSG code is not numeric".to_string(),
        })?;
        let srs = SpatialRef::from_epsg(code)?;
        Ok(srs.to_pretty_wkt()?)
    }
}

/// ツール出力から WKT を取り出す
///
/// `OGC WKT...:` の見出し行があればその次の行以降、なければ出力全体を WKT とみなす。
/// 見出しの後に別の見出しが続く場合はそこで打ち切る。
pub fn extract_wkt(tool_output: &str) -> Option<String> {
    let lines: Vec<&str> = tool_output.lines().collect();
    let body = match lines.iter().position(|line| is_wkt_heading(line)) {
        Some(index) => {
            let rest = &lines[index + 1..];
            let end = rest
                .iter()
                .position(|line| is_heading(line))
                .unwrap_or(rest.len());
            rest[..end].join("\n")
        }
        None if lines.iter().any(|line| is_heading(line)) => return None,
        None => lines.join("\n"),
    };

    let wkt = body.trim();
    // WKT は `NAME[...]` の形で始まる
    wkt.contains('[').then(|| wkt.to_string())
}

fn is_wkt_heading(line: &str) -> bool {
    line.trim_start().starts_with(WKT_MARKER_PREFIX) && is_heading(line)
}

/// `PROJ.4 :` / `OGC WKT :` のような見出し行
fn is_heading(line: &str) -> bool {
    let line = line.trim();
    line.ends_with(':') && !line.contains('[')
}

/// WKT の先頭要素名を取り出す（`GEOGCS["NAD83",...` -> `NAD83`）
pub fn projection_name(wkt: &str) -> Option<String> {
    let head = wkt.split(',').next()?;
    let (_, quoted) = head.split_once('[')?;
    let name = quoted.trim().trim_matches('"');
    (!name.is_empty()).then(|| name.to_string())
}

/// 名前を `/` で区切ってキーワードにする
pub fn projection_keywords(name: &str) -> Vec<String> {
    name.split('/').map(|part| part.trim().to_string()).collect()
}

/// 地域名と EPSG コードの対応表（CSV の 3 列目が地域名、4 列目がコード）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionEpsgTable {
    rows: Vec<(String, String)>,
}

impl RegionEpsgTable {
    const REGION_COLUMN: usize = 2;
    const CODE_COLUMN: usize = 3;

    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        Self::from_reader(reader)
    }

    pub fn from_csv(text: &str) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        Self::from_reader(reader)
    }

    fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let (Some(region), Some(code)) = (
                record.get(Self::REGION_COLUMN),
                record.get(Self::CODE_COLUMN),
            ) {
                rows.push((region.to_string(), code.trim().to_string()));
            }
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 地域名に対応する EPSG コードを引く
    ///
    /// 表を先頭から走査し、地域列に地域名を含む最初の行を使う。
    pub fn lookup(&self, region: &str) -> Option<&str> {
        let needle = region.trim();
        if needle.is_empty() {
            return None;
        }
        self.rows
            .iter()
            .find(|(text, _)| text.contains(needle))
            .map(|(_, code)| code.as_str())
    }
}

/// 投影法カタログ生成
pub struct ProjectionCataloger<'a, W: WktSource> {
    config: &'a CatalogConfig,
    wkt_source: W,
}

impl<'a, W: WktSource> ProjectionCataloger<'a, W> {
    pub fn new(config: &'a CatalogConfig, wkt_source: W) -> Self {
        Self { config, wkt_source }
    }

    /// 固定の EPSG コードと、地域ディレクトリから得た地域別コードのレコードを生成する
    pub fn catalog(&self, regions: Option<(&Path, &RegionEpsgTable)>) -> Result<Vec<ProjectionRecord>> {
        let mut targets: Vec<(String, String)> = self
            .config
            .interesting_codes
            .iter()
            .map(|code| (code.clone(), code.clone()))
            .collect();

        if let Some((dir, table)) = regions {
            let names = self.region_names(dir)?;
            targets.extend(region_codes(&names, table));
        }

        let records = targets
            .iter()
            .map(|(label, code)| self.record(label, code))
            .collect::<Result<Vec<_>>>()?;

        info!("Generated {} projection records", records.len());
        Ok(records)
    }

    pub fn record(&self, label: &str, epsg: &str) -> Result<ProjectionRecord> {
        let content = self.wkt_source.wkt(epsg)?;
        let name = projection_name(&content).ok_or_else(|| CatalogError::Wkt {
            code: epsg.to_string(),
            detail: "no projection name in WKT".to_string(),
        })?;

        Ok(ProjectionRecord {
            id: format!("proj_{}", label),
            visible: Flag::TRUE,
            keywords: projection_keywords(&name),
            name,
            epsg: epsg.to_string(),
            content,
        })
    }

    /// ディレクトリ内の全フィーチャから地域名を集める（重複は最初の出現のみ）
    fn region_names(&self, dir: &Path) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for file in list_input_files(dir)? {
            for properties in read_features(&file.path)? {
                match properties.get(&self.config.region_name_field) {
                    Some(name) if seen.insert(name.clone()) => names.push(name.clone()),
                    Some(_) => {}
                    None => warn!(
                        "Feature in {:?} has no {} property",
                        file.path, self.config.region_name_field
                    ),
                }
            }
        }
        Ok(names)
    }
}

/// 地域名ごとに対応表を引き、(ラベル, コード) を地域名の順に返す
pub fn region_codes(names: &[String], table: &RegionEpsgTable) -> Vec<(String, String)> {
    names
        .iter()
        .filter_map(|name| match table.lookup(name) {
            Some(code) => Some((name.clone(), code.to_string())),
            None => {
                warn!("No EPSG code found for region {:?}", name);
                None
            }
        })
        .collect()
}
