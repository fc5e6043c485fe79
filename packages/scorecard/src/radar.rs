//! Side-by-side dimension scores for comparing scenarios.

use std::collections::BTreeMap;

use growth_sim_scenario_models::{DensityLevel, Scenario};
use growth_sim_scorecard_models::{DimensionId, RadarPoint, ScorecardResult};

use crate::ScorecardError;
use crate::engine::compute_scorecard;
use crate::metrics::PROJECTION_YEAR;

const FULL_MARK: u8 = 100;

/// One chart axis per dimension, each holding every scenario's rounded
/// score through [`PROJECTION_YEAR`].
///
/// # Errors
///
/// * [`ScorecardError::InvalidGrowthRate`] if `growth_rate` is negative or
///   not finite
pub fn radar_data(
    scenarios: &[Scenario],
    growth_rate: f64,
    density: DensityLevel,
) -> Result<Vec<RadarPoint>, ScorecardError> {
    let scorecards = scenarios
        .iter()
        .map(|s| {
            compute_scorecard(s, growth_rate, density, PROJECTION_YEAR)
                .map(|scorecard| (s.id, scorecard))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DimensionId::all()
        .iter()
        .map(|&axis| RadarPoint {
            axis: axis.axis_label().to_string(),
            axis_id: axis,
            full_mark: FULL_MARK,
            scores: scorecards
                .iter()
                .map(|(id, scorecard)| (*id, rounded_score(scorecard, axis)))
                .collect::<BTreeMap<_, _>>(),
        })
        .collect())
}

#[allow(clippy::cast_possible_truncation)]
fn rounded_score(scorecard: &ScorecardResult, axis: DimensionId) -> i64 {
    scorecard
        .dimension(axis)
        .map_or(0, |d| d.score.round() as i64)
}

#[cfg(test)]
mod tests {
    use growth_sim_scenario::all_scenarios;
    use growth_sim_scenario_models::ScenarioId;

    use super::*;

    #[test]
    fn one_point_per_axis_with_every_scenario() {
        let scenarios = all_scenarios();
        let points = radar_data(&scenarios, 75.0, DensityLevel::Med).unwrap();

        let axes: Vec<&str> = points.iter().map(|p| p.axis.as_str()).collect();
        assert_eq!(axes, vec!["Fiscal", "Environmental", "Housing", "Transport"]);

        for point in &points {
            assert_eq!(point.full_mark, 100);
            assert_eq!(point.scores.len(), scenarios.len());
            assert!(point.scores.values().all(|s| (0..=100).contains(s)));
        }
    }

    #[test]
    fn matches_scorecard_rounding() {
        let scenarios = all_scenarios();
        let points = radar_data(&scenarios, 75.0, DensityLevel::Med).unwrap();

        // Concentric transport: transit 56, VMT 0
        let transport = points
            .iter()
            .find(|p| p.axis_id == DimensionId::Transportation)
            .unwrap();
        assert_eq!(transport.scores[&ScenarioId::Concentric], 28);
    }

    #[test]
    fn propagates_invalid_rate() {
        assert!(radar_data(&all_scenarios(), -5.0, DensityLevel::Low).is_err());
        assert!(radar_data(&[], 75.0, DensityLevel::Low).unwrap()[0].scores.is_empty());
    }
}
