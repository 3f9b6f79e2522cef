use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ned_catalog::{
    generate_boundaries, generate_products, generate_projections, generate_sources, CatalogConfig,
    IdScheme, InputDir, RegionSet, Resolution, SpatialRefWkt, SrsInfoTool,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GeoJSON ファイルを含む入力ディレクトリ
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// GeoJSON ファイルを含む 2 つ目の入力ディレクトリ（州など）
    #[arg(short, long, value_name = "DIR")]
    second_input_dir: Option<PathBuf>,

    /// 境界カタログの出力 JSON
    #[arg(value_name = "BOUNDARY_OUTPUT")]
    boundary_output: PathBuf,

    /// 投影法カタログの出力 JSON
    #[arg(value_name = "PROJECTION_OUTPUT")]
    projection_output: PathBuf,

    /// プロダクトカタログの出力 JSON
    #[arg(value_name = "PRODUCT_OUTPUT")]
    product_output: PathBuf,

    /// データソース記述子の出力 JSON
    #[arg(value_name = "SOURCES_OUTPUT")]
    sources_output: PathBuf,

    /// 入力ディレクトリの地域区分ラベル（省略時はパスから推定）
    #[arg(long)]
    region_set: Option<String>,

    /// 2 つ目の入力ディレクトリの地域区分ラベル（省略時はパスから推定）
    #[arg(long)]
    second_region_set: Option<String>,

    /// 地域名と EPSG コードの対応表（CSV）
    #[arg(long, value_name = "CSV", default_value = "stateEpsg.csv")]
    state_epsg: PathBuf,

    /// WKT の取得方法
    #[arg(long, value_enum, default_value_t = WktBackend::Tool)]
    wkt_source: WktBackend,

    /// 境界 ID を連番にする
    #[arg(long)]
    sequential_ids: bool,

    /// プロダクトの解像度（秒角、省略時は "-1"）
    #[arg(long, value_name = "ARCSEC")]
    resolution_arcsec: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WktBackend {
    /// gdalsrsinfo コマンド
    Tool,
    /// GDAL ライブラリ
    Library,
}

fn main() -> Result<()> {
    // ログの初期化
    tracing_subscriber::fmt::init();

    // CLI引数の解析
    let args = Args::parse();

    // 処理開始時間を記録
    let start_time = std::time::Instant::now();

    let config = build_config(&args);
    let inputs = collect_inputs(&args)?;

    // 境界 -> 投影法 -> プロダクト -> ソースの順に生成
    let count = generate_boundaries(&config, &inputs, &args.boundary_output)
        .context("Failed to generate boundary catalog")?;
    info!("Boundaries: {} records", count);

    let regions = args
        .second_input_dir
        .as_deref()
        .map(|dir| (dir, args.state_epsg.as_path()));
    let count = match args.wkt_source {
        WktBackend::Tool => {
            let tool = SrsInfoTool::locate().context("Failed to locate gdalsrsinfo")?;
            generate_projections(&config, tool, regions, &args.projection_output)
        }
        WktBackend::Library => {
            generate_projections(&config, SpatialRefWkt, regions, &args.projection_output)
        }
    }
    .context("Failed to generate projection catalog")?;
    info!("Projections: {} records", count);

    let count = generate_products(&config, &inputs, &args.boundary_output, &args.product_output)
        .context("Failed to generate product catalog")?;
    info!("Products: {} records", count);

    generate_sources(&args.sources_output).context("Failed to generate source descriptor")?;

    // 処理時間を表示
    let elapsed = start_time.elapsed();
    info!("Total processing time: {:?}", elapsed);

    Ok(())
}

fn build_config(args: &Args) -> CatalogConfig {
    CatalogConfig {
        id_scheme: if args.sequential_ids {
            IdScheme::Sequential
        } else {
            IdScheme::Name
        },
        resolution: args
            .resolution_arcsec
            .map_or(Resolution::Placeholder, Resolution::ArcSeconds),
        ..CatalogConfig::default()
    }
}

fn collect_inputs(args: &Args) -> Result<Vec<InputDir>> {
    let mut inputs = vec![input_dir(&args.input_dir, args.region_set.as_deref())?];
    if let Some(dir) = &args.second_input_dir {
        inputs.push(input_dir(dir, args.second_region_set.as_deref())?);
    }
    Ok(inputs)
}

fn input_dir(path: &Path, label: Option<&str>) -> Result<InputDir> {
    if !path.is_dir() {
        error!("Invalid input path: {:?}", path);
        anyhow::bail!("Input path must be a directory: {}", path.display());
    }

    let region_set = match label {
        Some(label) => RegionSet::new(label),
        None => RegionSet::from_dir(path).with_context(|| {
            format!(
                "Cannot derive region set from {}; pass it explicitly",
                path.display()
            )
        })?,
    };
    info!("Input directory {:?} (set: {})", path, region_set);

    Ok(InputDir::new(path, region_set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_positional_order() {
        let args = Args::try_parse_from([
            "ned-catalog",
            "/data/HUC/HUC2/geojson",
            "-s",
            "/data/State/geojson",
            "boundaries.json",
            "projections.json",
            "products.json",
            "sources.json",
        ])
        .unwrap();

        assert_eq!(args.input_dir, PathBuf::from("/data/HUC/HUC2/geojson"));
        assert_eq!(args.second_input_dir, Some(PathBuf::from("/data/State/geojson")));
        assert_eq!(args.boundary_output, PathBuf::from("boundaries.json"));
        assert_eq!(args.sources_output, PathBuf::from("sources.json"));
        assert_eq!(args.wkt_source, WktBackend::Tool);
        assert_eq!(args.state_epsg, PathBuf::from("stateEpsg.csv"));
    }

    #[test]
    fn test_build_config_options() {
        let args = Args::try_parse_from([
            "ned-catalog",
            "in",
            "b.json",
            "p.json",
            "r.json",
            "s.json",
            "--sequential-ids",
            "--resolution-arcsec",
            "0.3333",
        ])
        .unwrap();

        let config = build_config(&args);
        assert_eq!(config.id_scheme, IdScheme::Sequential);
        assert_eq!(config.resolution, Resolution::ArcSeconds(0.3333));
    }

    #[test]
    fn test_missing_outputs_rejected() {
        assert!(Args::try_parse_from(["ned-catalog", "in", "b.json"]).is_err());
    }
}
