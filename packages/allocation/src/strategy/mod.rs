//! Per-scenario parcel eligibility and scoring.
//!
//! Each scenario has exactly one [`CandidateStrategy`]. Strategies only read
//! from the [`AnalysisContext`] and are independent of each other.

mod agriculture;
mod concentric;
mod infill;
mod lateral;
mod rail;
mod resource;
mod utility;

use growth_sim_parcel_models::{Parcel, ScoredCandidate};
use growth_sim_scenario_models::ScenarioId;
use growth_sim_spatial::geometry::MILES_PER_KM;

pub use agriculture::AgPreservation;
pub use concentric::Concentric;
pub use infill::Infill;
pub use lateral::LateralExpansion;
pub use rail::RailCorridor;
pub use resource::ResourceBased;
pub use utility::UtilityService;

use crate::context::AnalysisContext;

/// Default minimum parcel size in acres.
pub const DEFAULT_MIN_ACRES: f64 = 0.25;

/// Minimum parcel size for strategies that favour small lots.
pub const SMALL_LOT_MIN_ACRES: f64 = 0.1;

/// Filters and scores parcels for one scenario.
pub trait CandidateStrategy: Send + Sync {
    /// Scenario this strategy implements.
    fn scenario(&self) -> ScenarioId;

    /// Parcels smaller than this are never candidates.
    fn min_acres(&self) -> f64 {
        DEFAULT_MIN_ACRES
    }

    /// Returns every eligible parcel with its score and justification, in
    /// inventory order.
    fn select_candidates<'c>(&self, context: &'c AnalysisContext<'_>) -> Vec<ScoredCandidate<'c>>;
}

/// Every strategy, in scenario order.
pub static STRATEGIES: [&dyn CandidateStrategy; 7] = [
    &LateralExpansion,
    &Concentric,
    &RailCorridor,
    &UtilityService,
    &AgPreservation,
    &Infill,
    &ResourceBased,
];

/// Looks up the strategy for a scenario.
#[must_use]
pub fn strategy_for(scenario: ScenarioId) -> &'static dyn CandidateStrategy {
    match scenario {
        ScenarioId::FudaLateral => &LateralExpansion,
        ScenarioId::Concentric => &Concentric,
        ScenarioId::RailCorridor => &RailCorridor,
        ScenarioId::UtilityService => &UtilityService,
        ScenarioId::AgPreservation => &AgPreservation,
        ScenarioId::Infill => &Infill,
        ScenarioId::ResourceBased => &ResourceBased,
    }
}

/// Parcels with positive area of at least `min_acres`.
fn eligible(parcels: &[Parcel], min_acres: f64) -> impl Iterator<Item = &Parcel> {
    parcels
        .iter()
        .filter(move |p| p.acres > 0.0 && p.acres >= min_acres)
}

/// Score that falls linearly from 100 by `slope` points per kilometre.
fn linear_score(distance_km: f64, slope: f64) -> f64 {
    (100.0 - distance_km * slope).max(0.0)
}

fn miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

#[cfg(test)]
mod tests {
    use growth_sim_scenario_models::ScenarioId;

    use super::*;

    #[test]
    fn table_covers_every_scenario_in_order() {
        let ids: Vec<ScenarioId> = STRATEGIES.iter().map(|s| s.scenario()).collect();
        assert_eq!(ids, ScenarioId::all().to_vec());
        for id in ScenarioId::all() {
            assert_eq!(strategy_for(*id).scenario(), *id);
        }
    }

    #[test]
    fn small_lot_thresholds() {
        for id in ScenarioId::all() {
            let expected = match id {
                ScenarioId::RailCorridor | ScenarioId::Infill => SMALL_LOT_MIN_ACRES,
                _ => DEFAULT_MIN_ACRES,
            };
            assert!(
                (strategy_for(*id).min_acres() - expected).abs() < f64::EPSILON,
                "unexpected minimum for {id}"
            );
        }
    }

    #[test]
    fn linear_score_is_clamped() {
        assert!((linear_score(0.0, 20.0) - 100.0).abs() < f64::EPSILON);
        assert!((linear_score(2.5, 20.0) - 50.0).abs() < f64::EPSILON);
        assert!(linear_score(10.0, 20.0).abs() < f64::EPSILON);
        assert!(linear_score(f64::INFINITY, 20.0).abs() < f64::EPSILON);
    }
}
