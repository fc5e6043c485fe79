use growth_sim_parcel_models::ScoredCandidate;
use growth_sim_scenario_models::ScenarioId;

use super::{CandidateStrategy, SMALL_LOT_MIN_ACRES, eligible};
use crate::context::AnalysisContext;

/// Development of vacant land already inside the urban service area.
pub struct Infill;

impl CandidateStrategy for Infill {
    fn scenario(&self) -> ScenarioId {
        ScenarioId::Infill
    }

    fn min_acres(&self) -> f64 {
        SMALL_LOT_MIN_ACRES
    }

    fn select_candidates<'c>(&self, context: &'c AnalysisContext<'_>) -> Vec<ScoredCandidate<'c>> {
        eligible(context.vacant_land(), self.min_acres())
            .filter(|p| context.intersects_service_area(&p.geometry))
            .map(|parcel| ScoredCandidate {
                parcel,
                score: (parcel.acres * 10.0).min(100.0),
                reason: format!("Vacant {:.1}ac inside Urban Service Area", parcel.acres),
            })
            .collect()
    }
}
