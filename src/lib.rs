//! # fdsn-features - Seismological Web Services as GIS Feature Tables
//!
//! `fdsn_features` queries FDSN event, macroseismic and station web services,
//! parses the QuakeML, StationXML or pipe-delimited text replies and projects
//! them into flat feature tables with point geometries.
//!
//! ## Key Features
//!
//! - **Field Catalog**: every exportable attribute is a path through the
//!   document tree, with long and short column names and a type.
//!
//! - **Incremental QuakeML**: origins that events reference but the reply
//!   omitted are fetched one by one and merged into the same document.
//!
//! - **Macroseismic data points**: MDPs are located at their place and joined
//!   to the event, origin and MDP set they belong to.
//!
//! - **Limit handling**: replies that hit the service's maximum entry count
//!   are reported and can be split by time or magnitude and merged.
//!
//! - **Output sinks**: GeoJSON, Parquet with WKB geometry, and CSV with WKT.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use fdsn_features::prelude::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let service = ServiceDescriptor::new(
//!     "https://www.seismicportal.eu/fdsnws/event/1/query",
//!     ServiceKind::Event,
//! );
//! let filter = Filter {
//!     min_magnitude: Some(6.0),
//!     ..Default::default()
//! };
//!
//! let mut fetcher = Fetcher::new(Arc::new(HttpTransport::new()?), service, filter);
//! let outcome = fetcher.fetch_data().await?;
//!
//! let projector = Projector::new(OutputConfig::default());
//! let layer = projector.project(&outcome.document);
//! let stats = write_layer_to_path(layer, Path::new("events.geojson"), None, &WriterConfig::default())?;
//! println!("{}", stats);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`xml`]: DOM built from quick-xml events and the element parser
//! - [`model`]: QuakeML, macroseismic and StationXML entities
//! - [`document`]: entity tables for a whole reply, with merge operations
//! - [`schema`]: the static Field Catalog
//! - [`projector`]: documents to feature rows
//! - [`query`]: service catalog entries, filters and query URLs
//! - [`transport`]: HTTP access behind a trait, plus a replay adapter
//! - [`fetcher`]: the per-query state machine and the splitting driver
//! - [`writer`]: GeoJSON, Parquet and CSV sinks

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod fetcher;
pub mod model;
pub mod projector;
pub mod query;
pub mod schema;
pub mod transport;
pub mod writer;
pub mod xml;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::document::{
        Document, DocumentError, DocumentKind, QuakeMlDocument, StationXmlDocument, TextTable,
    };
    pub use crate::fetcher::{
        CancelHandle, FetchError, FetchOutcome, FetchState, Fetcher, FetcherEvent, Severity,
        SplitStrategy,
    };
    pub use crate::projector::{
        DepthUnit, FeatureRow, FieldValue, Geometry, Layer, LayerSchema, OutputConfig, Projector,
    };
    pub use crate::query::{
        build_url, Extent, Filter, OutputKind, ServiceCatalog, ServiceDescriptor, ServiceKind,
    };
    pub use crate::schema::{FieldDef, FieldType, LayerKind};
    pub use crate::transport::{CannedTransport, HttpTransport, Transport, TransportError};
    pub use crate::writer::{
        write_layer_to_path, CompressionType, OutputFormat, WriterConfig, WriterError, WriterStats,
    };
}
