use growth_sim_parcel_models::ScoredCandidate;
use growth_sim_scenario_models::ScenarioId;
use growth_sim_spatial::{LayerKind, ZoneIndex};

use super::{CandidateStrategy, eligible, linear_score, miles};
use crate::context::AnalysisContext;

/// Distance assumed when there is no usable service area boundary.
const DEFAULT_DISTANCE_KM: f64 = 10.0;

/// Points lost per kilometre from the service area edge.
const SLOPE_PER_KM: f64 = 20.0;

/// Outward growth just beyond the urban service area, within city limits.
pub struct LateralExpansion;

impl CandidateStrategy for LateralExpansion {
    fn scenario(&self) -> ScenarioId {
        ScenarioId::FudaLateral
    }

    fn select_candidates<'c>(&self, context: &'c AnalysisContext<'_>) -> Vec<ScoredCandidate<'c>> {
        let parks = ZoneIndex::from_layer(context.layer(LayerKind::FutureLandUse), |f| {
            f.property_str("GLUP") == Some("PARK")
        });

        eligible(context.parcels(), self.min_acres())
            .filter(|p| !context.inside_service_area(p.centroid))
            .filter(|p| context.inside_city_limits(p.centroid))
            .filter(|p| !context.is_sensitive(p.centroid))
            .filter(|p| !parks.contains(p.centroid))
            .map(|parcel| {
                let distance = context
                    .service_area_distance_km(parcel.centroid)
                    .unwrap_or(DEFAULT_DISTANCE_KM);
                ScoredCandidate {
                    parcel,
                    score: linear_score(distance, SLOPE_PER_KM),
                    reason: format!("{:.1}mi from Urban Service Area edge", miles(distance)),
                }
            })
            .collect()
    }
}
