use growth_sim_parcel_models::ScoredCandidate;
use growth_sim_scenario_models::ScenarioId;
use growth_sim_spatial::{LayerKind, ZoneIndex};

use super::{CandidateStrategy, eligible, miles};
use crate::context::AnalysisContext;

/// Distance assumed when there is no usable service area boundary.
const DEFAULT_DISTANCE_KM: f64 = 5.0;

/// Exact `Farmland_P` value marking enrolled farmland.
const PRESERVED_FARMLAND: &str = "Farmland Preservation";

/// Growth steered away from enrolled farmland.
///
/// Preserved farmland is deprioritized, not excluded: it can still be
/// allocated once better land runs out.
pub struct AgPreservation;

impl CandidateStrategy for AgPreservation {
    fn scenario(&self) -> ScenarioId {
        ScenarioId::AgPreservation
    }

    fn select_candidates<'c>(&self, context: &'c AnalysisContext<'_>) -> Vec<ScoredCandidate<'c>> {
        let preserved = ZoneIndex::from_layer(context.layer(LayerKind::PrimeAgSoils), |f| {
            f.property_str("Farmland_P") == Some(PRESERVED_FARMLAND)
        });
        log::debug!(
            "{}: {} farmland preservation features",
            self.scenario(),
            preserved.len()
        );

        eligible(context.parcels(), self.min_acres())
            .filter(|p| !context.is_sensitive(p.centroid))
            .map(|parcel| {
                let distance = context
                    .service_area_distance_km(parcel.centroid)
                    .unwrap_or(DEFAULT_DISTANCE_KM);
                let distance_mi = miles(distance);

                if preserved.contains(parcel.centroid) {
                    ScoredCandidate {
                        parcel,
                        score: (30.0 - distance * 10.0).max(0.0),
                        reason: format!(
                            "Overlaps farmland preservation, {distance_mi:.1}mi from USA (deprioritized)"
                        ),
                    }
                } else {
                    ScoredCandidate {
                        parcel,
                        score: (100.0 - distance * 15.0).max(0.0),
                        reason: format!("Non-preserved soil, {distance_mi:.1}mi from USA"),
                    }
                }
            })
            .collect()
    }
}
