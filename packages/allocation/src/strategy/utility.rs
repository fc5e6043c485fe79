use geo::{Point, Rect};
use growth_sim_parcel_models::ScoredCandidate;
use growth_sim_scenario_models::ScenarioId;
use growth_sim_spatial::geometry::{self, FEET_PER_KM};
use growth_sim_spatial::{Feature, FeatureCollection, LayerKind, LineIndex};

use super::{CandidateStrategy, eligible, linear_score};
use crate::context::AnalysisContext;

/// Parcels further than this from a sewer segment are not candidates.
const MAX_DISTANCE_KM: f64 = 0.5;

const SLOPE_PER_KM: f64 = 200.0;

/// Padding around the sewer network's bounding box, in degrees (~0.5 km).
const BBOX_PADDING_DEG: f64 = 0.005;

/// Segments steeper than this (percent) earn [`SLOPE_BONUS`].
const BONUS_SLOPE_PCT: f64 = 0.5;

const SLOPE_BONUS: f64 = 10.0;

/// Growth that follows existing gravity sewer capacity.
pub struct UtilityService;

impl CandidateStrategy for UtilityService {
    fn scenario(&self) -> ScenarioId {
        ScenarioId::UtilityService
    }

    fn select_candidates<'c>(&self, context: &'c AnalysisContext<'_>) -> Vec<ScoredCandidate<'c>> {
        let Some(sewer_layer) = context.layer(LayerKind::SanitarySewer) else {
            log::warn!("No sewer data for {} scenario", self.scenario());
            return Vec::new();
        };

        let gravity_only = sewer_layer.iter().any(is_gravity);
        if !gravity_only {
            log::debug!("No gravity segments tagged, using the whole sewer layer");
        }
        let selected = |f: &Feature| !gravity_only || is_gravity(f);

        let projection = context.projection();
        let sewers = LineIndex::build(sewer_layer, projection, selected);
        let bbox = geometry::extent(
            sewer_layer
                .iter()
                .filter(|f| selected(*f))
                .filter_map(|f| f.geometry.as_ref()),
        );
        let (Some(bbox), false) = (bbox, sewers.is_empty()) else {
            log::warn!("No usable sewer segments for {} scenario", self.scenario());
            return Vec::new();
        };
        log::debug!(
            "{}: {} sewer segments ({} skipped)",
            self.scenario(),
            sewers.len(),
            sewers.skipped()
        );

        eligible(context.parcels(), self.min_acres())
            .filter(|p| within_padded(bbox, p.centroid))
            .filter_map(|parcel| {
                let nearest =
                    sewers.nearest_within(projection.point(parcel.centroid), MAX_DISTANCE_KM)?;
                if context.is_sensitive(parcel.centroid) {
                    return None;
                }

                let slope = segment_slope(sewer_layer, nearest.feature);
                let mut score = linear_score(nearest.distance_km, SLOPE_PER_KM);
                if slope > BONUS_SLOPE_PCT {
                    score = (score + SLOPE_BONUS).min(100.0);
                }

                let slope_note = if slope > 0.0 {
                    format!(", {slope:.1}% slope")
                } else {
                    String::new()
                };
                Some(ScoredCandidate {
                    parcel,
                    score,
                    reason: format!(
                        "{:.0}ft from gravity sewer{slope_note}",
                        (nearest.distance_km * FEET_PER_KM).round()
                    ),
                })
            })
            .collect()
    }
}

fn is_gravity(feature: &Feature) -> bool {
    feature.geometry.is_some() && feature.property_str("FlowType") == Some("Gravity")
}

fn segment_slope(layer: &FeatureCollection, feature: usize) -> f64 {
    layer
        .features
        .get(feature)
        .and_then(|f| f.property_f64("SLOPE"))
        .unwrap_or(0.0)
}

fn within_padded(bbox: Rect<f64>, point: Point<f64>) -> bool {
    point.x() >= bbox.min().x - BBOX_PADDING_DEG
        && point.x() <= bbox.max().x + BBOX_PADDING_DEG
        && point.y() >= bbox.min().y - BBOX_PADDING_DEG
        && point.y() <= bbox.max().y + BBOX_PADDING_DEG
}
