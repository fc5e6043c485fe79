#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Growth metrics and letter-graded scorecards.
//!
//! Everything here is pure arithmetic over a [`Scenario`] definition, a
//! growth rate, a density level and a horizon year. Spatial inputs come
//! from the scenario's precomputed profile or, lacking one, from
//! [`estimate_spatial_profile`].
//!
//! [`Scenario`]: growth_sim_scenario_models::Scenario

pub mod criteria;
pub mod engine;
pub mod estimate;
pub mod format;
pub mod grading;
pub mod metrics;
pub mod radar;

use thiserror::Error;

pub use criteria::evaluate_adopted_criteria;
pub use engine::compute_scorecard;
pub use estimate::estimate_spatial_profile;
pub use format::format_value;
pub use metrics::{GrowthMetrics, growth_metrics, project_metrics};
pub use radar::radar_data;

/// Errors from scorecard computation.
#[derive(Debug, Error)]
pub enum ScorecardError {
    /// Growth rate is negative or not a finite number.
    #[error("Invalid growth rate {0}: expected a finite, non-negative number of acres per year")]
    InvalidGrowthRate(f64),
}
