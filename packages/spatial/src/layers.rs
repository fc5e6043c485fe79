//! Layer vocabulary and the read-only provider interface.

use std::collections::BTreeMap;

use geo::Geometry;
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};

/// The fixed set of named feature collections the analysis consumes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum LayerKind {
    /// Parcel inventory polygons.
    Parcels,
    /// Vacant-land parcel polygons.
    VacantLand,
    /// Urban service area boundary.
    UrbanServiceArea,
    /// Sanitary sewer line segments.
    SanitarySewer,
    /// Prime agricultural soil polygons.
    PrimeAgSoils,
    /// Rail lines.
    Rail,
    /// Transit-priority zones.
    TransitPriority,
    /// Mapped wetlands.
    Wetlands,
    /// FEMA flood hazard zones.
    FloodHazard,
    /// Environmental corridors.
    EnvCorridors,
    /// Future land use plan zones.
    FutureLandUse,
    /// Municipal boundary.
    CityLimits,
    /// Stream centerlines.
    Streams,
}

impl LayerKind {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Parcels,
            Self::VacantLand,
            Self::UrbanServiceArea,
            Self::SanitarySewer,
            Self::PrimeAgSoils,
            Self::Rail,
            Self::TransitPriority,
            Self::Wetlands,
            Self::FloodHazard,
            Self::EnvCorridors,
            Self::FutureLandUse,
            Self::CityLimits,
            Self::Streams,
        ]
    }

    /// File stem of the layer's `GeoJSON` file (e.g. `urban_service_area`).
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Parcels => "parcels",
            Self::VacantLand => "vacant_land",
            Self::UrbanServiceArea => "urban_service_area",
            Self::SanitarySewer => "sanitary_sewer",
            Self::PrimeAgSoils => "prime_ag_soils",
            Self::Rail => "rail",
            Self::TransitPriority => "transit_priority",
            Self::Wetlands => "wetlands",
            Self::FloodHazard => "flood_hazard",
            Self::EnvCorridors => "env_corridors",
            Self::FutureLandUse => "future_land_use",
            Self::CityLimits => "city_limits",
            Self::Streams => "streams",
        }
    }

    /// Whether the spatial analysis cannot run at all without this layer.
    #[must_use]
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Parcels | Self::UrbanServiceArea)
    }
}

/// A single geographic feature with its attribute table row.
///
/// `geometry` is `None` when the source feature had no geometry or its
/// geometry could not be converted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    /// Feature geometry in WGS84 longitude/latitude.
    pub geometry: Option<Geometry<f64>>,
    /// Attribute values keyed by field name.
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Creates a feature with the given geometry and no properties.
    #[must_use]
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: Some(geometry.into()),
            properties: Map::new(),
        }
    }

    /// Adds or replaces a property, returning the feature.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Returns a string property, if present and a string.
    #[must_use]
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Returns a numeric property, if present and a number.
    #[must_use]
    pub fn property_f64(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }
}

/// An ordered collection of features from one layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    /// Features in source order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Wraps a list of features.
    #[must_use]
    pub const fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates over the features in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

/// Read-only source of named feature collections for one analysis run.
///
/// A provider is constructed once and passed explicitly to whatever needs
/// it. Any caching policy belongs to the implementation.
pub trait LayerProvider: Send + Sync {
    /// Returns the collection for `kind`, or `None` when the layer is
    /// unavailable.
    fn layer(&self, kind: LayerKind) -> Option<&FeatureCollection>;

    /// Lists every layer kind this provider cannot supply.
    fn missing(&self) -> Vec<LayerKind> {
        LayerKind::all()
            .iter()
            .copied()
            .filter(|kind| self.layer(*kind).is_none())
            .collect()
    }
}

/// A provider backed by collections already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLayers {
    layers: BTreeMap<LayerKind, FeatureCollection>,
}

impl InMemoryLayers {
    /// Creates a provider with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer, returning the provider.
    #[must_use]
    pub fn with_layer(mut self, kind: LayerKind, collection: FeatureCollection) -> Self {
        self.insert(kind, collection);
        self
    }

    /// Adds or replaces a layer.
    pub fn insert(&mut self, kind: LayerKind, collection: FeatureCollection) {
        self.layers.insert(kind, collection);
    }
}

impl LayerProvider for InMemoryLayers {
    fn layer(&self, kind: LayerKind) -> Option<&FeatureCollection> {
        self.layers.get(&kind)
    }
}
