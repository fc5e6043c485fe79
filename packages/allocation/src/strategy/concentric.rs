use geo::Point;
use growth_sim_parcel_models::ScoredCandidate;
use growth_sim_scenario_models::ScenarioId;
use growth_sim_spatial::geometry;

use super::{CandidateStrategy, eligible, linear_score, miles};
use crate::context::AnalysisContext;

/// Parcels further than this from the civic center are not candidates.
const MAX_DISTANCE_KM: f64 = 8.0;

const SLOPE_PER_KM: f64 = 12.5;

/// Rings of growth around the civic center.
pub struct Concentric;

impl CandidateStrategy for Concentric {
    fn scenario(&self) -> ScenarioId {
        ScenarioId::Concentric
    }

    fn select_candidates<'c>(&self, context: &'c AnalysisContext<'_>) -> Vec<ScoredCandidate<'c>> {
        let config = context.config();
        let [lon, lat] = config.civic_center;
        let center = Point::new(lon, lat);

        eligible(context.parcels(), self.min_acres())
            .filter_map(|parcel| {
                let distance = geometry::great_circle_km(parcel.centroid, center);
                (distance <= MAX_DISTANCE_KM && !context.is_sensitive(parcel.centroid)).then(|| {
                    ScoredCandidate {
                        parcel,
                        score: linear_score(distance, SLOPE_PER_KM),
                        reason: format!(
                            "{:.1}mi from {} center",
                            miles(distance),
                            config.civic_center_label
                        ),
                    }
                })
            })
            .collect()
    }
}
