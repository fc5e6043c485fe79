use growth_sim_parcel_models::ScoredCandidate;
use growth_sim_scenario_models::ScenarioId;
use growth_sim_spatial::{LayerKind, LineIndex, ZoneIndex};

use super::{CandidateStrategy, eligible, miles};
use crate::context::AnalysisContext;

/// Distance assumed when there is no usable service area boundary.
const DEFAULT_DISTANCE_KM: f64 = 5.0;

/// 75 ft stream buffer.
const STREAM_BUFFER_KM: f64 = 0.023;

const STREAM_PENALTY: f64 = 40.0;

const SLOPE_PER_KM: f64 = 10.0;

/// Growth that keeps clear of natural resource features.
pub struct ResourceBased;

impl CandidateStrategy for ResourceBased {
    fn scenario(&self) -> ScenarioId {
        ScenarioId::ResourceBased
    }

    fn select_candidates<'c>(&self, context: &'c AnalysisContext<'_>) -> Vec<ScoredCandidate<'c>> {
        let projection = context.projection();
        let corridors = ZoneIndex::from_layer(context.layer(LayerKind::EnvCorridors), |_| true);
        let streams = context
            .layer(LayerKind::Streams)
            .map(|layer| LineIndex::build(layer, projection, |_| true));

        eligible(context.parcels(), self.min_acres())
            .filter(|p| !corridors.contains(p.centroid) && !context.is_sensitive(p.centroid))
            .map(|parcel| {
                let near_stream = streams.as_ref().is_some_and(|index| {
                    index.any_within(&projection.polygons(&parcel.geometry), STREAM_BUFFER_KM)
                });
                let env_score = if near_stream {
                    100.0 - STREAM_PENALTY
                } else {
                    100.0
                };

                let distance = context
                    .service_area_distance_km(parcel.centroid)
                    .unwrap_or(DEFAULT_DISTANCE_KM);
                let issue_note = if near_stream { " (near stream)" } else { "" };

                ScoredCandidate {
                    parcel,
                    score: (env_score - distance * SLOPE_PER_KM).max(0.0),
                    reason: format!(
                        "Clear of env corridors/wetlands/flood{issue_note}, {:.1}mi from USA",
                        miles(distance)
                    ),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use geo::line_string;
    use growth_sim_spatial::{Feature, FeatureCollection};

    use super::*;
    use crate::config::AnalysisConfig;
    use crate::context::fixtures::{layers, line_layer, parcel, rect};

    #[test]
    fn excludes_corridors_and_penalizes_streams() {
        let provider = layers(vec![
            parcel("corridor", -89.50, 43.000, 1.0),
            parcel("stream", -89.50, 43.010, 1.0),
            parcel("clear", -89.50, 42.990, 1.0),
        ])
        .with_layer(
            LayerKind::EnvCorridors,
            FeatureCollection::new(vec![Feature::new(rect(-89.501, 42.999, -89.499, 43.001))]),
        )
        .with_layer(
            LayerKind::Streams,
            // 0.0006 deg north of the stream parcel's centroid, ~11 m past its edge
            line_layer(line_string![(x: -89.52, y: 43.0106), (x: -89.48, y: 43.0106)]),
        );
        let context = AnalysisContext::new(&provider, AnalysisConfig::default()).unwrap();
        let candidates = ResourceBased.select_candidates(&context);

        let ids: Vec<&str> = candidates
            .iter()
            .filter_map(|c| c.parcel.parcel_no.as_deref())
            .collect();
        assert_eq!(ids, vec!["stream", "clear"]);
        assert!(candidates[0].reason.contains("(near stream)"));
        assert!(!candidates[1].reason.contains("near stream"));
        assert!((candidates[1].score - candidates[0].score - STREAM_PENALTY).abs() < 0.5);
    }

    #[test]
    fn flood_hazard_excludes() {
        let provider = layers(vec![parcel("flooded", -89.50, 43.000, 1.0)]).with_layer(
            LayerKind::FloodHazard,
            FeatureCollection::new(vec![
                Feature::new(rect(-89.51, 42.99, -89.49, 43.01)).with_property("FLD_ZONE", "AE"),
            ]),
        );
        let context = AnalysisContext::new(&provider, AnalysisConfig::default()).unwrap();
        assert!(ResourceBased.select_candidates(&context).is_empty());
    }
}
