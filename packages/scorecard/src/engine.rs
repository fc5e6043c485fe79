//! Four-dimension scorecard for one scenario at a growth rate, density and
//! horizon year.

use growth_sim_scenario_models::{DensityLevel, Scenario, ScenarioId, SpatialProfile};
use growth_sim_scorecard_models::{
    DimensionId, Grade, MetricUnit, ScorecardDimension, ScorecardMetric, ScorecardResult,
};

use crate::ScorecardError;
use crate::estimate::estimate_spatial_profile;
use crate::format::{format_plain, format_value};
use crate::grading;
use crate::metrics::{
    BASE_INFRA_COST_PER_ACRE, EXISTING_JOBS, EXISTING_UNITS, GrowthMetrics, MILL_RATE,
    PERSONS_PER_UNIT, SprawlClass, TRIPS_PER_PERSON_PER_DAY, assessed_value_per_unit,
    growth_metrics, impervious_pct,
};

/// Cost-to-serve ratio reported when new growth yields no tax revenue.
const NO_REVENUE_COST_TO_SERVE: f64 = 2.0;

/// Years of net revenue capitalized into debt capacity.
const DEBT_TERM_YEARS: f64 = 20.0;

/// Revenue coverage lenders require.
const DEBT_COVERAGE: f64 = 1.25;

/// Grades `scenario` on fiscal, environmental, social and transportation
/// outcomes.
///
/// Uses the scenario's precomputed spatial profile when it has one and
/// falls back to [`estimate_spatial_profile`] otherwise.
///
/// # Errors
///
/// * [`ScorecardError::InvalidGrowthRate`] if `growth_rate` is negative or
///   not finite
pub fn compute_scorecard(
    scenario: &Scenario,
    growth_rate: f64,
    density: DensityLevel,
    current_year: u16,
) -> Result<ScorecardResult, ScorecardError> {
    if !growth_rate.is_finite() || growth_rate < 0.0 {
        return Err(ScorecardError::InvalidGrowthRate(growth_rate));
    }

    let growth = growth_metrics(growth_rate, density, current_year);
    let profile = scenario.spatial_profile.unwrap_or_else(|| {
        log::debug!(
            "No spatial profile for {}, estimating from {} acres",
            scenario.id,
            growth.acres
        );
        estimate_spatial_profile(scenario, growth.acres)
    });

    let dimensions = vec![
        fiscal(scenario, density, &growth),
        environmental(density, &growth, &profile),
        social(scenario.id, density, &growth, &profile),
        transportation(scenario.id, density, &growth, &profile),
    ];

    let scores: Vec<f64> = dimensions.iter().map(|d| d.score).collect();
    let overall_score = grading::overall_score(&scores);

    Ok(ScorecardResult {
        dimensions,
        overall_grade: Grade::from_score(overall_score),
        overall_score,
    })
}

fn metric(id: &str, label: &str, value: f64, unit: MetricUnit) -> ScorecardMetric {
    metric_formatted(id, label, value, unit, format_value(value, unit))
}

fn metric_formatted(
    id: &str,
    label: &str,
    value: f64,
    unit: MetricUnit,
    formatted: String,
) -> ScorecardMetric {
    ScorecardMetric {
        id: id.to_string(),
        label: label.to_string(),
        value,
        unit,
        formatted,
    }
}

fn dimension(
    id: DimensionId,
    scores: &[f64],
    metrics: Vec<ScorecardMetric>,
    summary: String,
) -> ScorecardDimension {
    let score = grading::dimension_score(scores);
    ScorecardDimension {
        id,
        label: id.label().to_string(),
        grade: Grade::from_score(score),
        score,
        metrics,
        summary,
    }
}

// ── Fiscal ──────────────────────────────────────────────────────────────

const fn infra_cost_per_acre(scenario: &Scenario) -> f64 {
    match scenario.id {
        ScenarioId::Infill => 25_000.0,
        // Gravity sewer baseline, no extension premium
        ScenarioId::UtilityService => BASE_INFRA_COST_PER_ACRE,
        _ => BASE_INFRA_COST_PER_ACRE * scenario.infra_mult,
    }
}

fn fiscal(scenario: &Scenario, density: DensityLevel, growth: &GrowthMetrics) -> ScorecardDimension {
    let units = growth.units;
    let total_infra_cost = growth.acres * infra_cost_per_acre(scenario);
    let infra_cost_per_unit = if units > 0.0 {
        total_infra_cost / units
    } else {
        0.0
    };

    let tax_revenue = units * assessed_value_per_unit(density) * MILL_RATE / 1000.0;
    let operating_cost =
        units * SprawlClass::classify(scenario.id, density).operating_cost_per_unit();
    let cost_to_serve = if tax_revenue > 0.0 {
        operating_cost / tax_revenue
    } else {
        NO_REVENUE_COST_TO_SERVE
    };
    let debt_capacity = ((tax_revenue - operating_cost) * DEBT_COVERAGE * DEBT_TERM_YEARS).max(0.0);

    let scores = [
        grading::grade_infra_cost_per_unit(infra_cost_per_unit),
        grading::grade_cost_to_serve(cost_to_serve),
    ];

    let metrics = vec![
        metric(
            "infra-cost-unit",
            "Infrastructure cost/unit",
            infra_cost_per_unit,
            MetricUnit::Dollars,
        ),
        metric_formatted(
            "tax-revenue",
            "Annual tax revenue",
            tax_revenue,
            MetricUnit::MillionDollars,
            format_value(tax_revenue / 1e6, MetricUnit::MillionDollars),
        ),
        metric(
            "cost-to-serve",
            "Cost-to-serve ratio",
            cost_to_serve,
            MetricUnit::Ratio,
        ),
        metric_formatted(
            "debt-capacity",
            "Debt capacity impact",
            debt_capacity,
            MetricUnit::MillionDollars,
            format_value(debt_capacity / 1e6, MetricUnit::MillionDollars),
        ),
    ];

    let summary = if cost_to_serve < 1.0 {
        "Revenue-positive growth pattern"
    } else {
        "Operating costs exceed revenue"
    };

    dimension(DimensionId::Fiscal, &scores, metrics, summary.to_string())
}

// ── Environmental ───────────────────────────────────────────────────────

fn environmental(
    density: DensityLevel,
    growth: &GrowthMetrics,
    profile: &SpatialProfile,
) -> ScorecardDimension {
    let wetland = profile.wetland_overlap_acres;
    let floodplain = profile.floodplain_overlap_acres;
    let violations = profile.stream_buffer_violation_count;
    let impervious = impervious_pct(density);
    let impervious_acres = growth.acres * impervious;

    let scores = [
        grading::grade_wetland_impact(wetland),
        grading::grade_floodplain_impact(floodplain),
        grading::grade_impervious_surface(impervious),
        grading::grade_stream_buffer_violations(f64::from(violations)),
    ];

    let metrics = vec![
        metric(
            "wetland-impact",
            "Wetland acres impacted",
            wetland,
            MetricUnit::Acres,
        ),
        metric(
            "floodplain",
            "Floodplain encroachment",
            floodplain,
            MetricUnit::Acres,
        ),
        metric_formatted(
            "impervious",
            "Impervious surface",
            impervious_acres,
            MetricUnit::Acres,
            format!(
                "{}% ({})",
                format_plain(impervious * 100.0),
                format_value(impervious_acres, MetricUnit::Acres)
            ),
        ),
        metric(
            "buffer-violations",
            "Stream buffer violations",
            f64::from(violations),
            MetricUnit::Count,
        ),
    ];

    let summary = if violations == 0 && wetland < 1.0 {
        "Minimal environmental impact".to_string()
    } else {
        format!(
            "{violations} buffer violation{}, {} wetland overlap",
            if violations == 1 { "" } else { "s" },
            format_value(wetland, MetricUnit::Acres)
        )
    };

    dimension(DimensionId::Environmental, &scores, metrics, summary)
}

// ── Social & housing ────────────────────────────────────────────────────

const fn affordable_pct(id: ScenarioId, density: DensityLevel) -> f64 {
    match (id, density) {
        (ScenarioId::RailCorridor, _) | (_, DensityLevel::High) => 0.20,
        (ScenarioId::Infill, _) => 0.18,
        (_, DensityLevel::Med) => 0.12,
        (_, DensityLevel::Low) => 0.05,
    }
}

fn social(
    id: ScenarioId,
    density: DensityLevel,
    growth: &GrowthMetrics,
    profile: &SpatialProfile,
) -> ScorecardDimension {
    let units = growth.units;
    let affordable = affordable_pct(id, density);
    let affordable_units = (units * affordable).round();
    let jobs_housing = EXISTING_JOBS / (EXISTING_UNITS + units);
    let median_lot_cost = profile.avg_land_value_per_acre / growth.dwelling_units_per_acre;

    let scores = [
        grading::grade_affordable_housing(affordable),
        grading::grade_jobs_housing(jobs_housing),
    ];

    let metrics = vec![
        metric("total-units", "Total dwelling units", units, MetricUnit::Units),
        metric_formatted(
            "affordable-units",
            "Affordable units (≤80% AMI)",
            affordable_units,
            MetricUnit::Units,
            format!(
                "{} ({}%)",
                format_value(affordable_units, MetricUnit::Units),
                format_plain(affordable * 100.0)
            ),
        ),
        metric(
            "jobs-housing",
            "Jobs-housing balance",
            jobs_housing,
            MetricUnit::Ratio,
        ),
        metric(
            "lot-cost",
            "Median lot cost",
            median_lot_cost,
            MetricUnit::Dollars,
        ),
    ];

    let summary = if affordable >= 0.15 {
        "Strong affordable housing contribution"
    } else {
        "Limited affordability impact"
    };

    dimension(DimensionId::Social, &scores, metrics, summary.to_string())
}

// ── Transportation ──────────────────────────────────────────────────────

/// Average trip length in miles.
const fn trip_length_miles(id: ScenarioId) -> f64 {
    match id {
        ScenarioId::RailCorridor => 6.2,
        ScenarioId::Infill | ScenarioId::Concentric => 7.5,
        _ => 9.8,
    }
}

/// Developed acres served per new road mile. Infill reuses existing
/// streets, halving the need.
const fn acres_per_road_mile(id: ScenarioId, density: DensityLevel) -> f64 {
    let base = match density {
        DensityLevel::Low => 8.0,
        DensityLevel::Med => 12.0,
        DensityLevel::High => 20.0,
    };
    match id {
        ScenarioId::Infill => base * 2.0,
        _ => base,
    }
}

fn transportation(
    id: ScenarioId,
    density: DensityLevel,
    growth: &GrowthMetrics,
    profile: &SpatialProfile,
) -> ScorecardDimension {
    let units = growth.units;
    let daily_vmt = units * PERSONS_PER_UNIT * TRIPS_PER_PERSON_PER_DAY * trip_length_miles(id);
    let transit = profile.transit_proximity_pct;
    let road_miles = growth.acres / acres_per_road_mile(id, density);

    let scores = [
        grading::grade_transit_access(transit),
        grading::grade_vmt(daily_vmt / units.max(1.0)),
    ];

    let metrics = vec![
        metric(
            "daily-vmt",
            "Est. daily VMT increase",
            daily_vmt,
            MetricUnit::Vmt,
        ),
        metric(
            "transit-access",
            "% within ½mi transit",
            transit,
            MetricUnit::Percent,
        ),
        metric(
            "road-miles",
            "New road-miles needed",
            road_miles,
            MetricUnit::Miles,
        ),
    ];

    let summary = if transit > 0.5 {
        "Transit-supportive development pattern"
    } else {
        "Auto-dependent growth pattern"
    };

    dimension(
        DimensionId::Transportation,
        &scores,
        metrics,
        summary.to_string(),
    )
}
