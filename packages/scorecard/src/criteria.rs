//! Checks a scenario against the city's adopted growth model.

use growth_sim_scenario_models::ScenarioId;
use growth_sim_scorecard_models::{AdoptedModelCriteria, CriterionStatus, PreferenceLevel};

use crate::metrics::ADOPTED_GROWTH_RATE;

/// Most stream buffer violations that still only warn.
const STREAM_BUFFER_WARN_MAX: u32 = 2;

/// Most wetland acres that still only warn.
const WETLAND_WARN_MAX_ACRES: f64 = 5.0;

/// How far each scenario advances the adopted model's four preferences:
/// rail corridor, groundwater recharge, agricultural preservation and
/// gravity sewer.
const fn preferences(id: ScenarioId) -> [PreferenceLevel; 4] {
    use PreferenceLevel::{High, Low, Med};

    match id {
        ScenarioId::FudaLateral => [Low, Low, Low, Med],
        ScenarioId::Concentric => [Med, Med, Med, Med],
        ScenarioId::RailCorridor => [High, Med, Med, Med],
        ScenarioId::UtilityService => [Med, Med, Med, High],
        ScenarioId::AgPreservation => [Med, Med, High, Low],
        ScenarioId::Infill => [Med, High, High, High],
        ScenarioId::ResourceBased => [Med, High, Med, Med],
    }
}

/// Evaluates the adopted-model criteria for scenario `id` at
/// `growth_rate`, given its stream buffer violations and wetland overlap.
#[must_use]
pub fn evaluate_adopted_criteria(
    id: ScenarioId,
    growth_rate: f64,
    stream_buffer_violations: u32,
    wetland_acres: f64,
) -> AdoptedModelCriteria {
    let stream_buffer_status = match stream_buffer_violations {
        0 => CriterionStatus::Pass,
        n if n <= STREAM_BUFFER_WARN_MAX => CriterionStatus::Warn,
        _ => CriterionStatus::Fail,
    };

    let wetland_buffer_status = if wetland_acres <= 0.0 {
        CriterionStatus::Pass
    } else if wetland_acres <= WETLAND_WARN_MAX_ACRES {
        CriterionStatus::Warn
    } else {
        CriterionStatus::Fail
    };

    let [rail, groundwater, ag, sewer] = preferences(id);

    AdoptedModelCriteria {
        growth_rate_pass: growth_rate <= ADOPTED_GROWTH_RATE,
        stream_buffer_status,
        wetland_buffer_status,
        rail_corridor_preference: rail,
        groundwater_recharge_preference: groundwater,
        ag_preservation: ag,
        gravity_sewer_preference: sewer,
    }
}
