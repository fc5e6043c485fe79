#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! GIS layer provider, geometry primitives, and R-tree zone indexes.
//!
//! The analysis consumes a fixed vocabulary of named feature collections
//! ([`LayerKind`]) through the read-only [`LayerProvider`] trait. Layers are
//! loaded once per analysis run (see [`GeoJsonDirectory`]) and never
//! mutated afterwards.
//!
//! Geometry operations return explicit [`geometry::GeomResult`] values so
//! callers can skip a malformed feature without aborting a batch. Zone and
//! line lookups go through R-tree envelopes before any precise test.

pub mod geojson_dir;
pub mod geometry;
pub mod index;
pub mod layers;

use std::path::PathBuf;

use thiserror::Error;

pub use geojson_dir::GeoJsonDirectory;
pub use geometry::{GeomResult, GeometryFailure, LocalProjection};
pub use index::{LineIndex, NearestLine, ZoneIndex};
pub use layers::{Feature, FeatureCollection, InMemoryLayers, LayerKind, LayerProvider};

/// Errors that can occur while reading a layer file.
#[derive(Debug, Error)]
pub enum LayerError {
    /// The layer file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The `GeoJSON` root is a bare geometry rather than a feature or
    /// feature collection.
    #[error("Unsupported GeoJSON root object: expected a Feature or FeatureCollection")]
    UnsupportedRoot,
}
