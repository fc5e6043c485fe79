#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Growth scenario identifiers, density levels, and spatial profile types.
//!
//! This crate defines the fixed vocabulary shared by the allocation and
//! scorecard crates: the seven built-in growth philosophies, the three
//! residential density levels, and the overlay-derived [`SpatialProfile`]
//! that feeds a scenario's scorecard.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identifier of one of the seven built-in growth scenarios.
///
/// The kebab-case string form (e.g. `"rail-corridor"`) is the stable key
/// used in scenario definition files, allocation output, and the CLI.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScenarioId {
    /// Lateral expansion of the Future Urban Development Area outward from
    /// the urban-service boundary.
    FudaLateral,
    /// Radial growth around the civic center.
    Concentric,
    /// Transit-oriented development along the rail line.
    RailCorridor,
    /// Growth limited to land reachable by gravity sewer.
    UtilityService,
    /// Growth steered away from preserved prime farmland.
    AgPreservation,
    /// Redevelopment of vacant land inside the urban-service boundary.
    Infill,
    /// Growth shaped around watersheds and environmental corridors.
    ResourceBased,
}

impl ScenarioId {
    /// Returns all variants of this enum, in canonical display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::FudaLateral,
            Self::Concentric,
            Self::RailCorridor,
            Self::UtilityService,
            Self::AgPreservation,
            Self::Infill,
            Self::ResourceBased,
        ]
    }
}

/// Residential density level applied to newly developed acreage.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum DensityLevel {
    /// Large-lot single family (3 DU/acre).
    Low,
    /// Mixed single family and townhome (5 DU/acre).
    #[default]
    Med,
    /// Multifamily and compact mixed use (7.5 DU/acre).
    High,
}

impl DensityLevel {
    /// Dwelling units built per developed acre at this density.
    #[must_use]
    pub const fn dwelling_units_per_acre(self) -> f64 {
        match self {
            Self::Low => 3.0,
            Self::Med => 5.0,
            Self::High => 7.5,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Med, Self::High]
    }
}

/// Qualitative agricultural-land impact label for a scenario.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AgImpact {
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    None,
    #[serde(rename = "very low")]
    #[strum(serialize = "very low")]
    VeryLow,
    #[serde(rename = "low")]
    #[strum(serialize = "low")]
    Low,
    #[serde(rename = "medium-low")]
    #[strum(serialize = "medium-low")]
    MediumLow,
    #[serde(rename = "medium")]
    #[strum(serialize = "medium")]
    Medium,
    #[serde(rename = "high")]
    #[strum(serialize = "high")]
    High,
}

/// A built-in growth scenario definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Stable scenario identifier.
    pub id: ScenarioId,
    /// Display name (e.g. "Rail Corridor / TOD").
    pub name: String,
    /// One-line tagline shown under the name.
    pub subtitle: String,
    /// Longer planning narrative.
    pub description: String,
    /// Infrastructure cost multiplier relative to the gravity-sewer
    /// baseline of $68,000/acre.
    pub infra_mult: f64,
    /// Prime agricultural acres consumed at the reference growth rate of
    /// 75 acres/year.
    pub ag_acres: u32,
    /// Qualitative agricultural impact.
    pub ag_impact: AgImpact,
    /// Overlay-derived metrics, when a real overlay has been computed for
    /// this scenario. `None` means the scorecard falls back to the
    /// estimator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_profile: Option<SpatialProfile>,
}

/// Aggregate overlay metrics for one scenario's developed footprint.
///
/// Percentages are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialProfile {
    /// Developed acres overlapping mapped wetlands.
    pub wetland_overlap_acres: f64,
    /// Developed acres overlapping the regulatory floodplain.
    pub floodplain_overlap_acres: f64,
    /// Parcels encroaching on the 75-foot stream buffer.
    pub stream_buffer_violation_count: u32,
    /// Share of developed acres served by gravity sewer.
    pub gravity_sewered_pct: f64,
    /// Share of developed acres within a half mile of transit.
    pub transit_proximity_pct: f64,
    /// Developed acres overlapping prime agricultural soils.
    pub prime_ag_overlap_acres: f64,
    /// Developed acres drawn from the vacant-land inventory.
    pub vacant_land_acres: f64,
    /// Total developed acres the profile was computed over.
    pub total_developable_acres: f64,
    /// Average assessed land value per acre.
    pub avg_land_value_per_acre: f64,
    /// Developed acres overlapping environmental corridors.
    pub env_corridor_overlap_acres: f64,
    /// Share of developed acres on class 1 or 2 soils.
    pub soil_class_1_and_2_pct: f64,
    /// Share of developed acres with high groundwater infiltration.
    pub infiltration_high_pct: f64,
}
