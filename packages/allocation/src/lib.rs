#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scenario parcel allocation.
//!
//! Runs the seven scenario strategies over a parcel inventory, dates each
//! scenario's candidates under an annual acreage budget, and projects the
//! result into serializable [`ScenarioAllocation`]s.
//!
//! The run is synchronous and reads its layers from a [`LayerProvider`]
//! that stays immutable for the whole batch.

pub mod allocator;
pub mod boundary;
pub mod config;
pub mod context;
pub mod parcels;
pub mod progress;
pub mod projection;
pub mod strategy;

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use growth_sim_parcel_models::ScenarioAllocation;
use growth_sim_scenario_models::ScenarioId;
use growth_sim_spatial::{LayerKind, LayerProvider};
use serde::Serialize;
use thiserror::Error;

pub use allocator::{AllocationError, assign_development_years};
pub use boundary::scenario_boundary;
pub use config::{AnalysisConfig, ConfigError};
pub use context::AnalysisContext;
pub use progress::{NullProgress, ProgressCallback};
pub use strategy::{CandidateStrategy, STRATEGIES, strategy_for};

/// Errors that abort a spatial analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A layer the analysis cannot run without is absent.
    #[error("Spatial analysis unavailable, missing layers: {}", format_layers(missing))]
    Unavailable {
        /// The absent critical layers.
        missing: Vec<LayerKind>,
    },

    /// The configured growth budget cannot be allocated.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

fn format_layers(layers: &[LayerKind]) -> String {
    layers
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(", ")
}

/// Per-scenario statistics from one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRunSummary {
    /// Scenario the numbers belong to.
    pub scenario: ScenarioId,
    /// Parcels that passed the strategy's filters.
    pub candidates: usize,
    /// Parcels that received a development year.
    pub assigned: usize,
    /// Wall-clock time spent on the scenario.
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Dated allocations for every scenario at one growth rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialAnalysis {
    /// Annual growth budget in acres per year.
    pub growth_rate: f64,
    /// Allocations keyed by scenario.
    pub allocations: BTreeMap<ScenarioId, ScenarioAllocation>,
    /// Run statistics in scenario order.
    pub summaries: Vec<ScenarioRunSummary>,
}

impl SpatialAnalysis {
    /// Allocation for one scenario.
    #[must_use]
    pub fn allocation(&self, scenario: ScenarioId) -> Option<&ScenarioAllocation> {
        self.allocations.get(&scenario)
    }
}

/// Runs every scenario strategy against `layers` and dates the results.
///
/// # Errors
///
/// * [`AnalysisError::Unavailable`] if the parcel or urban-service-area
///   layer is absent. No strategy runs in that case.
/// * [`AnalysisError::Allocation`] if the configured growth rate is not a
///   positive finite number.
pub fn run_spatial_analysis(
    layers: &dyn LayerProvider,
    config: &AnalysisConfig,
    progress: &dyn ProgressCallback,
) -> Result<SpatialAnalysis, AnalysisError> {
    let growth_rate = config.growth_rate;
    if !growth_rate.is_finite() || growth_rate <= 0.0 {
        return Err(AllocationError::InvalidGrowthRate(growth_rate).into());
    }

    let context = AnalysisContext::new(layers, config.clone())?;
    log::info!(
        "Running {} scenario strategies over {} parcels at {growth_rate} ac/yr",
        STRATEGIES.len(),
        context.parcels().len()
    );

    progress.set_total(STRATEGIES.len() as u64);

    let mut allocations = BTreeMap::new();
    let mut summaries = Vec::with_capacity(STRATEGIES.len());

    for strategy in STRATEGIES {
        let scenario = strategy.scenario();
        progress.set_message(format!("Allocating {scenario}"));
        let start = Instant::now();

        let candidates = strategy.select_candidates(&context);
        let candidate_count = candidates.len();
        log::info!("{scenario}: {candidate_count} candidate parcels found");

        let allocated = assign_development_years(candidates, growth_rate, config.max_parcels)?;
        let parcels =
            projection::project_allocation(&allocated, &config.default_school_district);

        let elapsed = start.elapsed();
        log::info!(
            "{scenario}: {} parcels assigned ({:.1}s)",
            parcels.len(),
            elapsed.as_secs_f64()
        );

        summaries.push(ScenarioRunSummary {
            scenario,
            candidates: candidate_count,
            assigned: parcels.len(),
            elapsed,
        });
        allocations.insert(
            scenario,
            ScenarioAllocation::new(scenario, growth_rate, parcels),
        );
        progress.inc(1);
    }

    progress.finish(format!("Allocated {} scenarios", allocations.len()));

    Ok(SpatialAnalysis {
        growth_rate,
        allocations,
        summaries,
    })
}

#[cfg(test)]
mod tests {
    use geo::line_string;
    use growth_sim_spatial::{FeatureCollection, InMemoryLayers};

    use super::*;
    use crate::context::fixtures::{layers, line_layer, parcel};

    fn sample_layers() -> InMemoryLayers {
        let mut parcels = Vec::new();
        for i in 0..12 {
            let offset = f64::from(i) * 0.004;
            parcels.push(parcel(&format!("in-{i}"), -89.515 + offset, 43.000, 3.0 + f64::from(i)));
            parcels.push(parcel(&format!("out-{i}"), -89.478 + offset, 43.010, 6.0));
        }
        layers(parcels).with_layer(
            LayerKind::Rail,
            line_layer(line_string![(x: -89.60, y: 43.005), (x: -89.40, y: 43.005)]),
        )
    }

    #[test]
    fn unavailable_before_any_strategy_runs() {
        let provider =
            InMemoryLayers::new().with_layer(LayerKind::Parcels, FeatureCollection::default());
        let err =
            run_spatial_analysis(&provider, &AnalysisConfig::default(), &NullProgress).unwrap_err();
        assert!(
            matches!(&err, AnalysisError::Unavailable { missing } if missing == &vec![LayerKind::UrbanServiceArea])
        );
        assert!(err.to_string().contains("urban-service-area"));
    }

    #[test]
    fn rejects_invalid_growth_rate() {
        let config = AnalysisConfig::default().with_growth_rate(0.0);
        let err = run_spatial_analysis(&sample_layers(), &config, &NullProgress).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Allocation(AllocationError::InvalidGrowthRate(_))
        ));
    }

    #[test]
    fn allocates_every_scenario() {
        let analysis =
            run_spatial_analysis(&sample_layers(), &AnalysisConfig::default(), &NullProgress)
                .unwrap();

        assert_eq!(analysis.allocations.len(), ScenarioId::all().len());
        assert_eq!(analysis.summaries.len(), ScenarioId::all().len());

        for summary in &analysis.summaries {
            let allocation = analysis.allocation(summary.scenario).unwrap();
            assert_eq!(allocation.total_count, summary.assigned);
            assert!(summary.assigned <= summary.candidates);
            for p in &allocation.parcels {
                assert!((0.0..=100.0).contains(&p.priority_score));
            }
        }

        let utility = analysis.allocation(ScenarioId::UtilityService).unwrap();
        assert_eq!(utility.total_count, 0, "No sewer layer means no candidates");
        assert_eq!(utility.year_range, None);

        let rail = analysis.allocation(ScenarioId::RailCorridor).unwrap();
        assert!(rail.total_count > 0);
    }

    #[test]
    fn runs_are_deterministic() {
        let provider = sample_layers();
        let config = AnalysisConfig::default();
        let a = run_spatial_analysis(&provider, &config, &NullProgress).unwrap();
        let b = run_spatial_analysis(&provider, &config, &NullProgress).unwrap();
        assert_eq!(a.allocations, b.allocations);
    }

    #[test]
    fn faster_growth_never_delays_development() {
        let provider = sample_layers();
        let slow = run_spatial_analysis(
            &provider,
            &AnalysisConfig::default().with_growth_rate(10.0),
            &NullProgress,
        )
        .unwrap();
        let fast = run_spatial_analysis(
            &provider,
            &AnalysisConfig::default().with_growth_rate(40.0),
            &NullProgress,
        )
        .unwrap();

        for id in ScenarioId::all() {
            let slow = &slow.allocations[id].parcels;
            let fast = &fast.allocations[id].parcels;
            assert_eq!(slow.len(), fast.len());
            for (s, f) in slow.iter().zip(fast) {
                assert_eq!(s.parcel_no, f.parcel_no);
                assert!(f.develop_year <= s.develop_year);
            }
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let analysis =
            run_spatial_analysis(&sample_layers(), &AnalysisConfig::default(), &NullProgress)
                .unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json["growthRate"].is_number());
        assert!(json["allocations"]["rail-corridor"]["totalCount"].is_number());
    }
}
