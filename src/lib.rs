pub mod boundary;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod product;
pub mod projection;
pub mod reader;
pub mod region;
pub mod relevance;
pub mod scan;
pub mod source;
pub mod writer;

pub use catalog::{generate_boundaries, generate_products, generate_projections, generate_sources, InputDir};
pub use config::{CatalogConfig, IdScheme, Resolution, TargetProjection};
pub use error::{CatalogError, Result};
pub use model::{BoundaryRecord, ProductRequest, ProjectionRecord, SourceDescriptor};
pub use projection::{SpatialRefWkt, SrsInfoTool, WktSource};
pub use region::RegionSet;
pub use writer::CatalogWriter;
