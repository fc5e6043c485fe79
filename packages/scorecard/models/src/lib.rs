#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scorecard result types.
//!
//! A [`ScorecardResult`] grades one scenario on four dimensions. Every
//! value here is computed on demand and never persisted.

use std::collections::BTreeMap;

use growth_sim_scenario_models::ScenarioId;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Letter grade for a 0–100 score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Maps a score to a grade: A ≥ 90, B ≥ 75, C ≥ 60, D ≥ 40, F below.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::A
        } else if score >= 75.0 {
            Self::B
        } else if score >= 60.0 {
            Self::C
        } else if score >= 40.0 {
            Self::D
        } else {
            Self::F
        }
    }
}

/// The four scorecard dimensions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DimensionId {
    Fiscal,
    Environmental,
    Social,
    Transportation,
}

impl DimensionId {
    /// Returns all variants of this enum, in scorecard order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fiscal,
            Self::Environmental,
            Self::Social,
            Self::Transportation,
        ]
    }

    /// Full display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fiscal => "Fiscal Impact",
            Self::Environmental => "Environmental",
            Self::Social => "Social & Housing",
            Self::Transportation => "Transportation",
        }
    }

    /// Short label used as a comparison chart axis.
    #[must_use]
    pub const fn axis_label(self) -> &'static str {
        match self {
            Self::Fiscal => "Fiscal",
            Self::Environmental => "Environmental",
            Self::Social => "Housing",
            Self::Transportation => "Transport",
        }
    }
}

/// Unit of a [`ScorecardMetric`] value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum MetricUnit {
    /// Whole dollars.
    #[serde(rename = "$")]
    #[strum(serialize = "$")]
    Dollars,
    /// Millions of dollars.
    #[serde(rename = "$M")]
    #[strum(serialize = "$M")]
    MillionDollars,
    /// A fraction shown as a percentage.
    #[serde(rename = "%")]
    #[strum(serialize = "%")]
    Percent,
    /// A dimensionless ratio.
    #[serde(rename = "ratio")]
    #[strum(serialize = "ratio")]
    Ratio,
    /// Miles.
    #[serde(rename = "mi")]
    #[strum(serialize = "mi")]
    Miles,
    /// Acres.
    #[serde(rename = "ac")]
    #[strum(serialize = "ac")]
    Acres,
    /// Dwelling units.
    #[serde(rename = "units")]
    #[strum(serialize = "units")]
    Units,
    /// Vehicle miles traveled per day.
    #[serde(rename = "VMT")]
    #[strum(serialize = "VMT")]
    Vmt,
    /// A plain count.
    #[serde(rename = "count")]
    #[strum(serialize = "count")]
    Count,
}

/// One reported metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardMetric {
    /// Stable kebab-case identifier (e.g. `cost-to-serve`).
    pub id: String,
    /// Display label.
    pub label: String,
    /// Raw value in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: MetricUnit,
    /// Human-readable rendering of the value.
    pub formatted: String,
}

/// Grade and metrics for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardDimension {
    pub id: DimensionId,
    pub label: String,
    pub grade: Grade,
    /// Mean of the dimension's graded metric scores, 0–100.
    pub score: f64,
    /// Reported metrics. Not every reported metric is graded.
    pub metrics: Vec<ScorecardMetric>,
    /// One-line verdict.
    pub summary: String,
}

/// A complete scenario scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardResult {
    /// The four dimensions in [`DimensionId::all`] order.
    pub dimensions: Vec<ScorecardDimension>,
    pub overall_grade: Grade,
    /// Mean of the dimension scores.
    pub overall_score: f64,
}

impl ScorecardResult {
    /// Looks up a dimension by id.
    #[must_use]
    pub fn dimension(&self, id: DimensionId) -> Option<&ScorecardDimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }
}

/// Quick headline numbers shown next to the growth-rate control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedMetrics {
    /// Developed acres over the projection horizon.
    pub acres: f64,
    /// Dwelling units over the projection horizon.
    pub units: u64,
    /// Infrastructure cost in millions of dollars, one decimal.
    pub infra_millions: f64,
    /// Prime agricultural acres consumed, scaled by growth rate.
    pub ag_land: u64,
}

/// Outcome of a pass/warn/fail criterion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CriterionStatus {
    Pass,
    Warn,
    Fail,
}

/// How strongly a scenario advances a planning preference.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PreferenceLevel {
    High,
    Med,
    Low,
}

/// A scenario checked against the adopted growth model's criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptedModelCriteria {
    /// Growth rate is at or under the adopted 75 acres/year.
    pub growth_rate_pass: bool,
    pub stream_buffer_status: CriterionStatus,
    pub wetland_buffer_status: CriterionStatus,
    pub rail_corridor_preference: PreferenceLevel,
    pub groundwater_recharge_preference: PreferenceLevel,
    pub ag_preservation: PreferenceLevel,
    pub gravity_sewer_preference: PreferenceLevel,
}

/// One axis of a multi-scenario comparison chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    /// Axis label (e.g. "Housing").
    pub axis: String,
    pub axis_id: DimensionId,
    /// Maximum value on the axis.
    pub full_mark: u8,
    /// Rounded dimension score per scenario.
    #[serde(flatten)]
    pub scores: BTreeMap<ScenarioId, i64>,
}
