//! Plain-text rendering of scenario listings, scorecards and comparisons.

use std::fmt::Write as _;

use growth_sim_scenario_models::{DensityLevel, Scenario, ScenarioId};
use growth_sim_scorecard::{
    ScorecardError, compute_scorecard, estimate_spatial_profile, evaluate_adopted_criteria,
    growth_metrics, project_metrics,
};
use growth_sim_scorecard_models::{
    AdoptedModelCriteria, ProjectedMetrics, RadarPoint, ScorecardResult,
};
use serde::Serialize;

/// Everything printed for one scenario by the `scorecard` command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub scenario: ScenarioId,
    pub name: String,
    pub growth_rate: f64,
    pub density: DensityLevel,
    pub year: u16,
    pub projected: ProjectedMetrics,
    pub scorecard: ScorecardResult,
    pub criteria: AdoptedModelCriteria,
}

/// Scorecards and adopted-model criteria for `scenarios`.
///
/// # Errors
///
/// * [`ScorecardError::InvalidGrowthRate`] if `growth_rate` is negative or
///   not finite
pub fn scenario_reports(
    scenarios: &[Scenario],
    growth_rate: f64,
    density: DensityLevel,
    year: u16,
) -> Result<Vec<ScenarioReport>, ScorecardError> {
    scenarios
        .iter()
        .map(|scenario| {
            let scorecard = compute_scorecard(scenario, growth_rate, density, year)?;
            let profile = scenario.spatial_profile.unwrap_or_else(|| {
                estimate_spatial_profile(scenario, growth_metrics(growth_rate, density, year).acres)
            });

            Ok(ScenarioReport {
                scenario: scenario.id,
                name: scenario.name.clone(),
                growth_rate,
                density,
                year,
                projected: project_metrics(scenario, growth_rate, density),
                scorecard,
                criteria: evaluate_adopted_criteria(
                    scenario.id,
                    growth_rate,
                    profile.stream_buffer_violation_count,
                    profile.wetland_overlap_acres,
                ),
            })
        })
        .collect()
}

/// One line per scenario with its headline projections.
#[must_use]
pub fn scenario_table(scenarios: &[Scenario], growth_rate: f64, density: DensityLevel) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:<28} {:>6} {:>8} {:>7} {:>9} {:>7}",
        "ID", "NAME", "INFRA", "ACRES", "UNITS", "INFRA $M", "AG AC"
    );

    for scenario in scenarios {
        let metrics = project_metrics(scenario, growth_rate, density);
        let _ = writeln!(
            out,
            "{:<16} {:<28} {:>5.2}x {:>8.0} {:>7} {:>9.1} {:>7}",
            scenario.id.as_ref(),
            scenario.name,
            scenario.infra_mult,
            metrics.acres,
            metrics.units,
            metrics.infra_millions,
            metrics.ag_land,
        );
    }

    out
}

/// Multi-line scorecard for one scenario.
#[must_use]
pub fn scorecard_table(report: &ScenarioReport) -> String {
    let mut out = String::new();
    let card = &report.scorecard;

    let _ = writeln!(
        out,
        "{} ({}) at {} ac/yr, {} density, {}: overall {} ({:.1})",
        report.name,
        report.scenario,
        report.growth_rate,
        report.density,
        report.year,
        card.overall_grade,
        card.overall_score
    );

    for dimension in &card.dimensions {
        let _ = writeln!(
            out,
            "  {:<18} {} {:>5.1}  {}",
            dimension.label, dimension.grade, dimension.score, dimension.summary
        );
        for metric in &dimension.metrics {
            let _ = writeln!(out, "    {:<30} {}", metric.label, metric.formatted);
        }
    }

    let criteria = &report.criteria;
    let _ = writeln!(
        out,
        "  Adopted model: growth {}, stream buffers {}, wetland buffers {}",
        if criteria.growth_rate_pass { "pass" } else { "fail" },
        criteria.stream_buffer_status,
        criteria.wetland_buffer_status
    );
    let _ = writeln!(
        out,
        "  Preferences: rail {}, groundwater {}, ag {}, gravity sewer {}",
        criteria.rail_corridor_preference,
        criteria.groundwater_recharge_preference,
        criteria.ag_preservation,
        criteria.gravity_sewer_preference
    );

    out
}

/// Scenario rows by dimension columns.
#[must_use]
pub fn comparison_table(points: &[RadarPoint]) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<16}", "SCENARIO");
    for point in points {
        let _ = write!(out, " {:>13}", point.axis);
    }
    out.push('\n');

    for id in ScenarioId::all() {
        if !points.iter().any(|p| p.scores.contains_key(id)) {
            continue;
        }
        let _ = write!(out, "{:<16}", id.as_ref());
        for point in points {
            match point.scores.get(id) {
                Some(score) => {
                    let _ = write!(out, " {score:>13}");
                }
                None => {
                    let _ = write!(out, " {:>13}", "-");
                }
            }
        }
        out.push('\n');
    }

    out
}
