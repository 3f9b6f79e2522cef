use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid geometry document {}: {source}", .path.display())]
    Geometry {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Projection tool not found: {0}")]
    ToolNotFound(#[from] which::Error),

    #[error("Projection tool failed for {code}: {detail}")]
    ToolFailed { code: String, detail: String },

    #[error("Unexpected WKT for EPSG:{code}: {detail}")]
    Wkt { code: String, detail: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
