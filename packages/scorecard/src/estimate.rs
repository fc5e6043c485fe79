//! Heuristic spatial profile for scenarios without a GIS overlay.
//!
//! The numbers are planning rules of thumb keyed by scenario. They keep the
//! scorecard usable when no precomputed [`SpatialProfile`] is available.

use growth_sim_scenario_models::{Scenario, ScenarioId, SpatialProfile};

use crate::metrics::round1;

/// Prime farmland acres of the most farmland-hungry scenario.
const REFERENCE_AG_ACRES: f64 = 820.0;

/// Share of developed land assumed to touch environmental features.
const fn environmental_factor(id: ScenarioId) -> f64 {
    match id {
        ScenarioId::ResourceBased => 0.02,
        ScenarioId::AgPreservation => 0.05,
        ScenarioId::Infill => 0.01,
        ScenarioId::FudaLateral => 0.08,
        ScenarioId::Concentric | ScenarioId::RailCorridor | ScenarioId::UtilityService => 0.04,
    }
}

const fn stream_buffer_violations(id: ScenarioId) -> u32 {
    match id {
        ScenarioId::ResourceBased | ScenarioId::Infill => 0,
        ScenarioId::AgPreservation | ScenarioId::RailCorridor => 1,
        ScenarioId::FudaLateral => 4,
        ScenarioId::Concentric | ScenarioId::UtilityService => 2,
    }
}

const fn gravity_sewered_pct(id: ScenarioId) -> f64 {
    match id {
        ScenarioId::UtilityService => 0.95,
        ScenarioId::Infill => 0.90,
        ScenarioId::Concentric => 0.65,
        ScenarioId::FudaLateral
        | ScenarioId::RailCorridor
        | ScenarioId::AgPreservation
        | ScenarioId::ResourceBased => 0.45,
    }
}

const fn transit_proximity_pct(id: ScenarioId) -> f64 {
    match id {
        ScenarioId::RailCorridor => 0.72,
        ScenarioId::Infill => 0.55,
        ScenarioId::Concentric => 0.38,
        ScenarioId::UtilityService => 0.25,
        ScenarioId::ResourceBased => 0.20,
        ScenarioId::AgPreservation => 0.15,
        ScenarioId::FudaLateral => 0.12,
    }
}

const fn infiltration_high_pct(id: ScenarioId) -> f64 {
    match id {
        ScenarioId::ResourceBased => 0.6,
        ScenarioId::AgPreservation => 0.5,
        ScenarioId::FudaLateral
        | ScenarioId::Concentric
        | ScenarioId::RailCorridor
        | ScenarioId::UtilityService
        | ScenarioId::Infill => 0.3,
    }
}

/// Estimates the spatial profile of `scenario` after developing `acres`.
#[must_use]
pub fn estimate_spatial_profile(scenario: &Scenario, acres: f64) -> SpatialProfile {
    let id = scenario.id;
    let ag_acres = f64::from(scenario.ag_acres);
    let ag_scale = ag_acres / REFERENCE_AG_ACRES;
    let env = environmental_factor(id);

    let avg_land_value_per_acre = match id {
        ScenarioId::Infill => 180_000.0,
        ScenarioId::RailCorridor => 120_000.0,
        _ => 85_000.0 * ag_scale.mul_add(0.3, 1.0),
    };

    SpatialProfile {
        wetland_overlap_acres: round1(acres * env * 0.6),
        floodplain_overlap_acres: round1(acres * env * 0.4),
        stream_buffer_violation_count: stream_buffer_violations(id),
        gravity_sewered_pct: gravity_sewered_pct(id),
        transit_proximity_pct: transit_proximity_pct(id),
        prime_ag_overlap_acres: ag_acres,
        vacant_land_acres: if id == ScenarioId::Infill { acres } else { 0.0 },
        total_developable_acres: acres,
        avg_land_value_per_acre,
        env_corridor_overlap_acres: round1(acres * env * 0.3),
        soil_class_1_and_2_pct: ag_scale * 0.8,
        infiltration_high_pct: infiltration_high_pct(id),
    }
}
