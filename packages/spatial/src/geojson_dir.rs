//! A [`LayerProvider`] that reads one `GeoJSON` file per layer from a
//! directory.
//!
//! Every layer is read eagerly at construction. A missing or unreadable
//! file makes that layer unavailable rather than failing the load, so the
//! analysis can decide which absences are fatal.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use geojson::GeoJson;

use crate::LayerError;
use crate::layers::{Feature, FeatureCollection, LayerKind, LayerProvider};

/// Layers loaded from `<root>/<file_stem>.geojson`.
#[derive(Debug, Clone)]
pub struct GeoJsonDirectory {
    root: PathBuf,
    layers: BTreeMap<LayerKind, FeatureCollection>,
}

impl GeoJsonDirectory {
    /// Reads every known layer file under `root`.
    #[must_use]
    pub fn load(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut layers = BTreeMap::new();

        for kind in LayerKind::all() {
            let path = layer_path(&root, *kind);
            if !path.exists() {
                log::debug!("Layer {kind} not found at {}", path.display());
                continue;
            }

            match read_feature_collection(&path) {
                Ok(collection) => {
                    log::info!("Loaded {} features for layer {kind}", collection.len());
                    layers.insert(*kind, collection);
                }
                Err(e) => {
                    log::warn!("Layer {kind} unavailable: {e}");
                }
            }
        }

        Self { root, layers }
    }

    /// Directory the layers were read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LayerProvider for GeoJsonDirectory {
    fn layer(&self, kind: LayerKind) -> Option<&FeatureCollection> {
        self.layers.get(&kind)
    }
}

/// Returns the expected file path for a layer under `root`.
#[must_use]
pub fn layer_path(root: &Path, kind: LayerKind) -> PathBuf {
    root.join(format!("{}.geojson", kind.file_stem()))
}

/// Reads and parses a `GeoJSON` file into a [`FeatureCollection`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a `GeoJSON`
/// feature or feature collection.
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection, LayerError> {
    let text = std::fs::read_to_string(path).map_err(|source| LayerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_feature_collection(&text)
}

/// Parses `GeoJSON` text into a [`FeatureCollection`].
///
/// A single `Feature` root is accepted as a one-element collection.
/// Features whose geometry cannot be converted keep their properties but
/// get `geometry: None`.
///
/// # Errors
///
/// Returns an error if the text is not valid `GeoJSON` or the root is a
/// bare geometry.
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, LayerError> {
    let geojson: GeoJson = text.parse()?;

    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => return Err(LayerError::UnsupportedRoot),
    };

    let mut unconvertible = 0_usize;
    let collection: FeatureCollection = features
        .into_iter()
        .map(|f| {
            let feature = convert_feature(f);
            if feature.geometry.is_none() {
                unconvertible += 1;
            }
            feature
        })
        .collect();

    if unconvertible > 0 {
        log::debug!("{unconvertible} features have no usable geometry");
    }

    Ok(collection)
}

fn convert_feature(feature: geojson::Feature) -> Feature {
    let geometry = feature
        .geometry
        .and_then(|geom| geo::Geometry::<f64>::try_from(geom).ok());

    Feature {
        geometry,
        properties: feature.properties.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "PARCELNO": "0609-123", "Assessed_Acres": 2.5 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-89.5, 43.0], [-89.49, 43.0], [-89.49, 43.01], [-89.5, 43.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "PARCELNO": "no-geometry" },
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn parses_feature_collection() {
        let fc = parse_feature_collection(COLLECTION).unwrap();
        assert_eq!(fc.len(), 2);
        assert!(matches!(
            fc.features[0].geometry,
            Some(geo::Geometry::Polygon(_))
        ));
        assert_eq!(fc.features[0].property_str("PARCELNO"), Some("0609-123"));
        assert_eq!(fc.features[0].property_f64("Assessed_Acres"), Some(2.5));
        assert!(fc.features[1].geometry.is_none());
    }

    #[test]
    fn single_feature_root_is_accepted() {
        let text = r#"{
            "type": "Feature",
            "properties": null,
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
        }"#;
        let fc = parse_feature_collection(text).unwrap();
        assert_eq!(fc.len(), 1);
        assert!(fc.features[0].properties.is_empty());
    }

    #[test]
    fn bare_geometry_root_is_rejected() {
        let text = r#"{ "type": "Point", "coordinates": [0.0, 0.0] }"#;
        assert!(matches!(
            parse_feature_collection(text),
            Err(LayerError::UnsupportedRoot)
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_feature_collection("{ not json"),
            Err(LayerError::GeoJson(_))
        ));
    }

    #[test]
    fn missing_directory_yields_no_layers() {
        let provider = GeoJsonDirectory::load("/nonexistent/growth-sim-layers");
        assert_eq!(provider.missing().len(), LayerKind::all().len());
    }

    #[test]
    fn layer_path_uses_file_stem() {
        let path = layer_path(Path::new("/data"), LayerKind::UrbanServiceArea);
        assert_eq!(path, PathBuf::from("/data/urban_service_area.geojson"));
    }
}
