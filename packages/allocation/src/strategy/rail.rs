use growth_sim_parcel_models::ScoredCandidate;
use growth_sim_scenario_models::ScenarioId;
use growth_sim_spatial::{LayerKind, LineIndex, ZoneIndex};

use super::{CandidateStrategy, SMALL_LOT_MIN_ACRES, eligible, linear_score, miles};
use crate::context::AnalysisContext;

/// Roughly one mile.
const MAX_DISTANCE_KM: f64 = 1.6;

const SLOPE_PER_KM: f64 = 62.5;

const TRANSIT_BONUS: f64 = 15.0;

/// Transit-oriented development along rail lines.
pub struct RailCorridor;

impl CandidateStrategy for RailCorridor {
    fn scenario(&self) -> ScenarioId {
        ScenarioId::RailCorridor
    }

    fn min_acres(&self) -> f64 {
        SMALL_LOT_MIN_ACRES
    }

    fn select_candidates<'c>(&self, context: &'c AnalysisContext<'_>) -> Vec<ScoredCandidate<'c>> {
        let Some(rail_layer) = context.layer(LayerKind::Rail).filter(|l| !l.is_empty()) else {
            log::warn!("No rail data for {} scenario", self.scenario());
            return Vec::new();
        };

        let projection = context.projection();
        let rail = LineIndex::build(rail_layer, projection, |_| true);
        if rail.skipped() > 0 {
            log::warn!("Skipped {} rail features with unusable geometry", rail.skipped());
        }
        if rail.is_empty() {
            log::warn!("Rail layer has no usable lines for {} scenario", self.scenario());
            return Vec::new();
        }

        let transit = ZoneIndex::from_layer(context.layer(LayerKind::TransitPriority), |_| true);

        eligible(context.parcels(), self.min_acres())
            .filter_map(|parcel| {
                let nearest =
                    rail.nearest_within(projection.point(parcel.centroid), MAX_DISTANCE_KM)?;
                if context.is_sensitive(parcel.centroid) {
                    return None;
                }

                let distance = nearest.distance_km;
                let mut score = linear_score(distance, SLOPE_PER_KM);
                let in_transit_zone = transit.contains(parcel.centroid);
                if in_transit_zone {
                    score = (score + TRANSIT_BONUS).min(100.0);
                }

                let transit_note = if in_transit_zone {
                    ", transit priority zone"
                } else {
                    ""
                };
                Some(ScoredCandidate {
                    parcel,
                    score,
                    reason: format!("{:.2}mi from rail{transit_note}", miles(distance)),
                })
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

    fn rail_line() -> FeatureCollection {
        line_layer(line_string![(x: -89.60, y: 43.00), (x: -89.40, y: 43.00)])
    }

    #[test]
    fn missing_or_empty_rail_yields_nothing() {
        let without = layers(vec![parcel("a", -89.5, 43.0, 1.0)]);
        let context = AnalysisContext::new(&without, AnalysisConfig::default()).unwrap();
        assert!(RailCorridor.select_candidates(&context).is_empty());

        let empty = layers(vec![parcel("a", -89.5, 43.0, 1.0)])
            .with_layer(LayerKind::Rail, FeatureCollection::default());
        let context = AnalysisContext::new(&empty, AnalysisConfig::default()).unwrap();
        assert!(RailCorridor.select_candidates(&context).is_empty());

        let unusable = layers(vec![parcel("a", -89.5, 43.0, 1.0)]).with_layer(
            LayerKind::Rail,
            FeatureCollection::new(vec![Feature::default()]),
        );
        let context = AnalysisContext::new(&unusable, AnalysisConfig::default()).unwrap();
        assert!(RailCorridor.select_candidates(&context).is_empty());
    }

    #[test]
    fn scores_by_distance_within_a_mile() {
        let provider = layers(vec![
            parcel("on-line", -89.50, 43.000, 0.15),
            parcel("near", -89.50, 43.010, 0.15),
            parcel("too-far", -89.50, 43.020, 0.15),
            parcel("too-small", -89.50, 43.000, 0.05),
        ])
        .with_layer(LayerKind::Rail, rail_line());
        let context = AnalysisContext::new(&provider, AnalysisConfig::default()).unwrap();
        let candidates = RailCorridor.select_candidates(&context);

        let ids: Vec<&str> = candidates
            .iter()
            .filter_map(|c| c.parcel.parcel_no.as_deref())
            .collect();
        assert_eq!(ids, vec!["on-line", "near"]);
        assert!((candidates[0].score - 100.0).abs() < 1e-6);
        assert_eq!(candidates[0].reason, "0.00mi from rail");
        // 0.01 deg north is ~1.106 km
        assert!((candidates[1].score - 30.9).abs() < 0.5, "got {}", candidates[1].score);
    }

    #[test]
    fn transit_zone_adds_bonus_capped_at_100() {
        let provider = layers(vec![
            parcel("on-line", -89.50, 43.000, 1.0),
            parcel("near", -89.45, 43.010, 1.0),
        ])
        .with_layer(LayerKind::Rail, rail_line())
        .with_layer(
            LayerKind::TransitPriority,
            FeatureCollection::new(vec![Feature::new(rect(-89.6, 42.9, -89.4, 43.1))]),
        );
        let context = AnalysisContext::new(&provider, AnalysisConfig::default()).unwrap();
        let candidates = RailCorridor.select_candidates(&context);

        assert!((candidates[0].score - 100.0).abs() < 1e-6);
        assert!((candidates[1].score - 45.9).abs() < 0.5);
        assert!(candidates[1].reason.ends_with(", transit priority zone"));
    }
}
