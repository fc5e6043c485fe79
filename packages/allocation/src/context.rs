//! Shared, read-only inputs for every strategy in one analysis run.

use geo::{MultiLineString, MultiPolygon, Point};
use growth_sim_parcel_models::Parcel;
use growth_sim_spatial::geometry::{self, LocalProjection};
use growth_sim_spatial::{FeatureCollection, LayerKind, LayerProvider, ZoneIndex};

use crate::AnalysisError;
use crate::config::AnalysisConfig;
use crate::parcels::parse_parcels;

/// Parsed parcels, boundary polygons, and sensitive-zone indexes.
///
/// Built once from a [`LayerProvider`] and borrowed by every strategy.
/// Candidates produced by strategies borrow parcels from here.
pub struct AnalysisContext<'p> {
    layers: &'p dyn LayerProvider,
    config: AnalysisConfig,
    projection: LocalProjection,
    parcels: Vec<Parcel>,
    vacant_land: Option<Vec<Parcel>>,
    service_area: Option<MultiPolygon<f64>>,
    service_area_unusable: bool,
    service_area_edge_km: Option<MultiLineString<f64>>,
    city_limits: Option<MultiPolygon<f64>>,
    wetlands: ZoneIndex,
    flood_hazard: ZoneIndex,
}

impl<'p> AnalysisContext<'p> {
    /// Parses the parcel inventory and boundary layers from `layers`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Unavailable`] if the parcel or
    /// urban-service-area layer is absent.
    pub fn new(layers: &'p dyn LayerProvider, config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let missing: Vec<LayerKind> = LayerKind::all()
            .iter()
            .copied()
            .filter(|kind| kind.is_critical() && layers.layer(*kind).is_none())
            .collect();

        let (Some(parcel_layer), Some(service_area_layer)) = (
            layers.layer(LayerKind::Parcels),
            layers.layer(LayerKind::UrbanServiceArea),
        ) else {
            return Err(AnalysisError::Unavailable { missing });
        };

        let parcels = parse_parcels(parcel_layer);
        log::info!("Parsed {} parcels", parcels.len());

        let vacant_land = layers.layer(LayerKind::VacantLand).map(parse_parcels);

        let projection = geometry::extent(parcel_layer.iter().filter_map(|f| f.geometry.as_ref()))
            .map_or_else(
                || LocalProjection::centered_on(config.civic_center[1]),
                LocalProjection::for_extent,
            );

        let (service_area, service_area_unusable) =
            match first_polygon(service_area_layer, LayerKind::UrbanServiceArea) {
                FirstPolygon::Missing => (None, false),
                FirstPolygon::Unusable => (None, true),
                FirstPolygon::Usable(usa) => (Some(usa), false),
            };
        let service_area_edge_km = service_area
            .as_ref()
            .map(|usa| projection.lines(&geometry::boundary(usa)));

        let city_limits = layers
            .layer(LayerKind::CityLimits)
            .and_then(|layer| first_polygon(layer, LayerKind::CityLimits).usable());

        let wetlands = ZoneIndex::from_layer(layers.layer(LayerKind::Wetlands), |_| true);
        let flood_hazard = ZoneIndex::from_layer(layers.layer(LayerKind::FloodHazard), |f| {
            !f.property_str("FLD_ZONE")
                .unwrap_or_default()
                .to_uppercase()
                .starts_with('X')
        });
        log::debug!(
            "Indexed {} wetlands and {} flood hazard zones ({} and {} skipped)",
            wetlands.len(),
            flood_hazard.len(),
            wetlands.skipped(),
            flood_hazard.skipped()
        );

        Ok(Self {
            layers,
            config,
            projection,
            parcels,
            vacant_land,
            service_area,
            service_area_unusable,
            service_area_edge_km,
            city_limits,
            wetlands,
            flood_hazard,
        })
    }

    /// Settings for this run.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Raw layer access for strategies that build their own indexes.
    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&'p FeatureCollection> {
        self.layers.layer(kind)
    }

    /// Kilometre projection centred on the parcel inventory.
    #[must_use]
    pub const fn projection(&self) -> LocalProjection {
        self.projection
    }

    /// Every parsed parcel.
    #[must_use]
    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    /// Vacant-land parcels, falling back to the full inventory when the
    /// vacant-land layer is absent.
    #[must_use]
    pub fn vacant_land(&self) -> &[Parcel] {
        self.vacant_land.as_deref().unwrap_or(&self.parcels)
    }

    /// Urban service area polygon, if its first feature is usable.
    #[must_use]
    pub const fn service_area(&self) -> Option<&MultiPolygon<f64>> {
        self.service_area.as_ref()
    }

    /// Whether `polygons` intersect the urban service area. True for every
    /// parcel when the layer has no features, false for every parcel when
    /// its first feature has no usable polygon.
    #[must_use]
    pub fn intersects_service_area(&self, polygons: &MultiPolygon<f64>) -> bool {
        match &self.service_area {
            Some(usa) => geometry::polygons_intersect(polygons, usa),
            None => !self.service_area_unusable,
        }
    }

    /// Whether `point` lies inside the urban service area. Always false
    /// without a usable service area.
    #[must_use]
    pub fn inside_service_area(&self, point: Point<f64>) -> bool {
        self.service_area
            .as_ref()
            .is_some_and(|usa| geometry::contains_point(usa, point))
    }

    /// Distance in kilometres from `point` to the urban service area
    /// boundary, or `None` without a usable service area.
    #[must_use]
    pub fn service_area_distance_km(&self, point: Point<f64>) -> Option<f64> {
        let edge = self.service_area_edge_km.as_ref()?;
        Some(
            geometry::distance_to_lines(&self.projection.point(point), edge)
                .unwrap_or(f64::INFINITY),
        )
    }

    /// Whether `point` lies inside city limits. True when the city-limits
    /// layer is absent or unusable.
    #[must_use]
    pub fn inside_city_limits(&self, point: Point<f64>) -> bool {
        self.city_limits
            .as_ref()
            .is_none_or(|limits| geometry::contains_point(limits, point))
    }

    /// Whether `point` lies in a wetland.
    #[must_use]
    pub fn in_wetland(&self, point: Point<f64>) -> bool {
        self.wetlands.contains(point)
    }

    /// Whether `point` lies in a flood hazard zone other than Zone X.
    #[must_use]
    pub fn in_flood_hazard(&self, point: Point<f64>) -> bool {
        self.flood_hazard.contains(point)
    }

    /// Whether `point` overlaps a wetland or a non-X flood hazard zone.
    #[must_use]
    pub fn is_sensitive(&self, point: Point<f64>) -> bool {
        self.in_wetland(point) || self.in_flood_hazard(point)
    }
}

enum FirstPolygon {
    Missing,
    Unusable,
    Usable(MultiPolygon<f64>),
}

impl FirstPolygon {
    fn usable(self) -> Option<MultiPolygon<f64>> {
        match self {
            Self::Usable(polygon) => Some(polygon),
            Self::Missing | Self::Unusable => None,
        }
    }
}

fn first_polygon(layer: &FeatureCollection, kind: LayerKind) -> FirstPolygon {
    let Some(feature) = layer.iter().next() else {
        return FirstPolygon::Missing;
    };
    let result = feature
        .geometry
        .as_ref()
        .map_or(Err(geometry::GeometryFailure::Empty), geometry::polygonal);

    match result {
        Ok(polygon) => FirstPolygon::Usable(polygon),
        Err(e) => {
            log::warn!("Ignoring {kind} boundary: {e}");
            FirstPolygon::Unusable
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Synthetic layers shared by the strategy tests.
    //!
    //! Coordinates sit near 43N so distances resemble the real study area.
    //! A 0.01 degree step is about 0.81 km east-west and 1.1 km
    //! north-south.

    use geo::{LineString, Polygon, polygon};
    use growth_sim_spatial::{Feature, FeatureCollection, InMemoryLayers, LayerKind};

    /// Axis-aligned rectangle from `(x0, y0)` to `(x1, y1)`.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
        ]
    }

    /// Small square parcel centred on `(x, y)` with the given acreage.
    pub fn parcel(id: &str, x: f64, y: f64, acres: f64) -> Feature {
        let h = 0.0005;
        Feature::new(rect(x - h, y - h, x + h, y + h))
            .with_property("PARCELNO", id)
            .with_property("Assessed_Acres", acres)
    }

    /// Urban service area covering `[-89.52, -89.48] x [42.98, 43.02]`.
    pub fn service_area() -> FeatureCollection {
        FeatureCollection::new(vec![Feature::new(rect(-89.52, 42.98, -89.48, 43.02))])
    }

    /// A provider with the given parcels and the standard service area.
    pub fn layers(parcels: Vec<Feature>) -> InMemoryLayers {
        InMemoryLayers::new()
            .with_layer(LayerKind::Parcels, FeatureCollection::new(parcels))
            .with_layer(LayerKind::UrbanServiceArea, service_area())
    }

    /// A single-feature line layer.
    pub fn line_layer(line: LineString<f64>) -> FeatureCollection {
        FeatureCollection::new(vec![Feature::new(line)])
    }
}

#[cfg(test)]
mod tests {
    use geo::point;
    use growth_sim_spatial::{Feature, FeatureCollection, InMemoryLayers};

    use super::fixtures::{layers, parcel, rect, service_area};
    use super::*;

    #[test]
    fn missing_critical_layers_are_reported() {
        let provider = InMemoryLayers::new()
            .with_layer(LayerKind::Parcels, FeatureCollection::default());
        let Err(AnalysisError::Unavailable { missing }) =
            AnalysisContext::new(&provider, AnalysisConfig::default())
        else {
            panic!("Expected Unavailable");
        };
        assert_eq!(missing, vec![LayerKind::UrbanServiceArea]);

        let Err(AnalysisError::Unavailable { missing }) =
            AnalysisContext::new(&InMemoryLayers::new(), AnalysisConfig::default())
        else {
            panic!("Expected Unavailable");
        };
        assert_eq!(missing, vec![LayerKind::Parcels, LayerKind::UrbanServiceArea]);
    }

    #[test]
    fn vacant_land_falls_back_to_parcels() {
        let without = layers(vec![parcel("A", -89.5, 43.0, 1.0)]);
        let context = AnalysisContext::new(&without, AnalysisConfig::default()).unwrap();
        assert_eq!(context.vacant_land().len(), 1);

        let with = layers(vec![parcel("A", -89.5, 43.0, 1.0)])
            .with_layer(LayerKind::VacantLand, FeatureCollection::default());
        let context = AnalysisContext::new(&with, AnalysisConfig::default()).unwrap();
        assert!(context.vacant_land().is_empty());
    }

    #[test]
    fn service_area_distance_and_membership() {
        let provider = layers(vec![]);
        let context = AnalysisContext::new(&provider, AnalysisConfig::default()).unwrap();

        assert!(context.inside_service_area(point!(x: -89.5, y: 43.0)));
        assert!(!context.inside_service_area(point!(x: -89.45, y: 43.0)));

        // 0.01 degrees east of the east edge.
        let d = context
            .service_area_distance_km(point!(x: -89.47, y: 43.0))
            .unwrap();
        assert!((d - 0.814).abs() < 0.01, "unexpected distance {d}");
    }

    #[test]
    fn unusable_service_area_counts_as_absent() {
        let provider = InMemoryLayers::new()
            .with_layer(LayerKind::Parcels, FeatureCollection::default())
            .with_layer(
                LayerKind::UrbanServiceArea,
                FeatureCollection::new(vec![Feature::default()]),
            );
        let context = AnalysisContext::new(&provider, AnalysisConfig::default()).unwrap();
        assert!(context.service_area().is_none());
        assert_eq!(context.service_area_distance_km(point!(x: 0.0, y: 0.0)), None);
        assert!(!context.intersects_service_area(&rect(0.0, 0.0, 1.0, 1.0).into()));
    }

    #[test]
    fn featureless_service_area_admits_everything() {
        let provider = InMemoryLayers::new()
            .with_layer(LayerKind::Parcels, FeatureCollection::default())
            .with_layer(LayerKind::UrbanServiceArea, FeatureCollection::default());
        let context = AnalysisContext::new(&provider, AnalysisConfig::default()).unwrap();
        assert!(context.service_area().is_none());
        assert!(context.intersects_service_area(&rect(0.0, 0.0, 1.0, 1.0).into()));
    }

    #[test]
    fn city_limits_default_to_everywhere() {
        let without = layers(vec![]);
        let context = AnalysisContext::new(&without, AnalysisConfig::default()).unwrap();
        assert!(context.inside_city_limits(point!(x: 10.0, y: 10.0)));

        let with = layers(vec![]).with_layer(
            LayerKind::CityLimits,
            FeatureCollection::new(vec![Feature::new(rect(-89.6, 42.9, -89.4, 43.1))]),
        );
        let context = AnalysisContext::new(&with, AnalysisConfig::default()).unwrap();
        assert!(context.inside_city_limits(point!(x: -89.5, y: 43.0)));
        assert!(!context.inside_city_limits(point!(x: 10.0, y: 10.0)));
    }

    #[test]
    fn zone_x_flood_is_not_sensitive() {
        let provider = InMemoryLayers::new()
            .with_layer(LayerKind::Parcels, FeatureCollection::default())
            .with_layer(LayerKind::UrbanServiceArea, service_area())
            .with_layer(
                LayerKind::FloodHazard,
                FeatureCollection::new(vec![
                    Feature::new(rect(0.0, 0.0, 1.0, 1.0)).with_property("FLD_ZONE", "x500"),
                    Feature::new(rect(2.0, 0.0, 3.0, 1.0)).with_property("FLD_ZONE", "AE"),
                ]),
            )
            .with_layer(
                LayerKind::Wetlands,
                FeatureCollection::new(vec![Feature::new(rect(4.0, 0.0, 5.0, 1.0))]),
            );
        let context = AnalysisContext::new(&provider, AnalysisConfig::default()).unwrap();

        assert!(!context.is_sensitive(point!(x: 0.5, y: 0.5)));
        assert!(context.is_sensitive(point!(x: 2.5, y: 0.5)));
        assert!(context.is_sensitive(point!(x: 4.5, y: 0.5)));
        assert!(context.in_wetland(point!(x: 4.5, y: 0.5)));
        assert!(!context.in_flood_hazard(point!(x: 4.5, y: 0.5)));
    }
}
