//! Planning constants and the growth arithmetic shared by every dimension.

use growth_sim_scenario_models::{DensityLevel, Scenario, ScenarioId};
use growth_sim_scorecard_models::ProjectedMetrics;

/// First year of the projection.
pub const BASE_YEAR: u16 = 2025;

/// Horizon year used by the quick projection metrics.
pub const PROJECTION_YEAR: u16 = 2030;

/// Property tax dollars per $1,000 of assessed value.
pub const MILL_RATE: f64 = 21.5;

pub const PERSONS_PER_UNIT: f64 = 2.3;

pub const TRIPS_PER_PERSON_PER_DAY: f64 = 3.4;

/// Jobs in the city today.
pub const EXISTING_JOBS: f64 = 18_000.0;

/// Dwelling units in the city today.
pub const EXISTING_UNITS: f64 = 13_500.0;

/// Infrastructure cost per developed acre before the scenario multiplier.
pub const BASE_INFRA_COST_PER_ACRE: f64 = 68_000.0;

/// Adopted growth budget in acres per year.
pub const ADOPTED_GROWTH_RATE: f64 = 75.0;

/// Assessed value of a new dwelling unit.
#[must_use]
pub const fn assessed_value_per_unit(density: DensityLevel) -> f64 {
    match density {
        DensityLevel::Low => 350_000.0,
        DensityLevel::Med => 285_000.0,
        DensityLevel::High => 220_000.0,
    }
}

/// Share of developed land that is impervious.
#[must_use]
pub const fn impervious_pct(density: DensityLevel) -> f64 {
    match density {
        DensityLevel::Low => 0.35,
        DensityLevel::Med => 0.50,
        DensityLevel::High => 0.65,
    }
}

/// How compact a development pattern is, which drives service costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprawlClass {
    Sprawl,
    Moderate,
    Compact,
}

impl SprawlClass {
    /// Infill and rail scenarios are compact regardless of density.
    #[must_use]
    pub const fn classify(scenario: ScenarioId, density: DensityLevel) -> Self {
        match (scenario, density) {
            (ScenarioId::Infill | ScenarioId::RailCorridor, _) | (_, DensityLevel::High) => {
                Self::Compact
            }
            (_, DensityLevel::Low) => Self::Sprawl,
            (_, DensityLevel::Med) => Self::Moderate,
        }
    }

    /// Annual municipal operating cost per dwelling unit.
    #[must_use]
    pub const fn operating_cost_per_unit(self) -> f64 {
        match self {
            Self::Sprawl => 3_200.0,
            Self::Moderate => 2_400.0,
            Self::Compact => 1_800.0,
        }
    }
}

/// Developed acreage and units after a number of years of growth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthMetrics {
    /// Years of growth, never less than one.
    pub years: u16,
    pub acres: f64,
    pub units: f64,
    pub dwelling_units_per_acre: f64,
}

/// Growth from the base year through `current_year`.
///
/// A year at or before the base year counts as one year of growth.
#[must_use]
pub fn growth_metrics(growth_rate: f64, density: DensityLevel, current_year: u16) -> GrowthMetrics {
    let years = current_year.saturating_sub(BASE_YEAR).max(1);
    let dwelling_units_per_acre = density.dwelling_units_per_acre();
    let acres = growth_rate * f64::from(years);

    GrowthMetrics {
        years,
        acres,
        units: (acres * dwelling_units_per_acre).round(),
        dwelling_units_per_acre,
    }
}

/// Headline acreage, units, infrastructure cost and farmland loss through
/// [`PROJECTION_YEAR`].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn project_metrics(scenario: &Scenario, growth_rate: f64, density: DensityLevel) -> ProjectedMetrics {
    let growth = growth_metrics(growth_rate, density, PROJECTION_YEAR);
    let infra = growth.acres * BASE_INFRA_COST_PER_ACRE * scenario.infra_mult / 1e6;
    let ag_land = f64::from(scenario.ag_acres) * (growth_rate / ADOPTED_GROWTH_RATE);

    ProjectedMetrics {
        acres: growth.acres,
        units: growth.units.max(0.0) as u64,
        infra_millions: round1(infra),
        ag_land: ag_land.round().max(0.0) as u64,
    }
}

/// Rounds to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use growth_sim_scenario::scenario;

    use super::*;

    #[test]
    fn growth_through_2030() {
        let growth = growth_metrics(75.0, DensityLevel::Med, 2030);
        assert_eq!(growth.years, 5);
        assert!((growth.acres - 375.0).abs() < f64::EPSILON);
        assert!((growth.units - 1875.0).abs() < f64::EPSILON);
    }

    #[test]
    fn base_year_counts_as_one_year() {
        for year in [1990, BASE_YEAR] {
            let growth = growth_metrics(40.0, DensityLevel::High, year);
            assert_eq!(growth.years, 1, "year {year}");
            assert!((growth.units - 300.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn sprawl_classes() {
        use ScenarioId::{AgPreservation, Concentric, Infill, RailCorridor};
        assert_eq!(SprawlClass::classify(Infill, DensityLevel::Low), SprawlClass::Compact);
        assert_eq!(SprawlClass::classify(RailCorridor, DensityLevel::Low), SprawlClass::Compact);
        assert_eq!(SprawlClass::classify(Concentric, DensityLevel::High), SprawlClass::Compact);
        assert_eq!(SprawlClass::classify(Concentric, DensityLevel::Low), SprawlClass::Sprawl);
        assert_eq!(SprawlClass::classify(AgPreservation, DensityLevel::Med), SprawlClass::Moderate);
    }

    #[test]
    fn projected_metrics_for_lateral_expansion() {
        let lateral = scenario(ScenarioId::FudaLateral).unwrap();
        let metrics = project_metrics(&lateral, 75.0, DensityLevel::Med);

        assert!((metrics.acres - 375.0).abs() < f64::EPSILON);
        assert_eq!(metrics.units, 1875);
        // 375 * 68,000 * 1.2 = $30.6M
        assert!((metrics.infra_millions - 30.6).abs() < 1e-9);
        assert_eq!(metrics.ag_land, 820);
    }

    #[test]
    fn projected_ag_land_scales_with_rate() {
        let lateral = scenario(ScenarioId::FudaLateral).unwrap();
        assert_eq!(project_metrics(&lateral, 37.5, DensityLevel::Low).ag_land, 410);
        let infill = scenario(ScenarioId::Infill).unwrap();
        assert_eq!(project_metrics(&infill, 150.0, DensityLevel::Low).ag_land, 0);
    }
}
