#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Parcel, scored candidate, and dated allocation types.
//!
//! A [`Parcel`] is an immutable record parsed from the parcel inventory.
//! Strategies borrow parcels to produce [`ScoredCandidate`]s, the allocator
//! dates them into [`AllocatedParcel`]s, and [`ParcelProjection`] is the
//! owned, serializable record handed to callers.

use geo::{MultiPolygon, Point};
use growth_sim_scenario_models::ScenarioId;
use serde::{Deserialize, Serialize};

/// First simulated development year. Allocation starts counting from here.
pub const BASE_YEAR: u16 = 2025;

/// Last simulated development year. Allocations never go past it.
pub const HORIZON_YEAR: u16 = 2060;

/// A single real-property land unit from the parcel inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    /// Assessor parcel number, if the source row carried one.
    pub parcel_no: Option<String>,
    /// Situs address.
    pub address: Option<String>,
    /// Owner of record.
    pub owner: Option<String>,
    /// School district name.
    pub school_district: Option<String>,
    /// Parcel area in acres. Always positive for parcels entering a
    /// strategy.
    pub acres: f64,
    /// Assessed land value in dollars, excluding improvements.
    pub land_value: Option<f64>,
    /// Parcel boundary in WGS84 longitude/latitude.
    pub geometry: MultiPolygon<f64>,
    /// Representative point used for zone membership and distance tests.
    pub centroid: Point<f64>,
}

/// A parcel that passed a strategy's eligibility filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    /// The candidate parcel.
    pub parcel: &'a Parcel,
    /// Suitability score in `[0, 100]`. Higher develops sooner.
    pub score: f64,
    /// Human-readable justification for the score.
    pub reason: String,
}

/// A scored candidate with its assigned development year.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedParcel<'a> {
    /// The scored candidate this allocation was derived from.
    pub candidate: ScoredCandidate<'a>,
    /// Year by which the parcel is projected to develop, in
    /// `[BASE_YEAR, HORIZON_YEAR]`.
    pub develop_year: u16,
}

/// Caller-facing projection of one allocated parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelProjection {
    /// Parcel number, or `unknown-<index>` when the source had none.
    pub parcel_no: String,
    /// Situs address.
    pub address: String,
    /// Owner of record.
    pub owner: String,
    /// School district name.
    pub school_district: String,
    /// Area in acres, rounded to two decimals.
    pub area_acres: f64,
    /// Assessed land value.
    pub land_value: Option<f64>,
    /// Simplified polygon rings (exterior first), as `[lon, lat]` pairs.
    pub coordinates: Vec<Vec<[f64; 2]>>,
    /// Parcel centroid as `[lon, lat]`.
    pub centroid: [f64; 2],
    /// Priority score, rounded to one decimal.
    pub priority_score: f64,
    /// Assigned development year.
    pub develop_year: u16,
    /// Strategy justification.
    pub scenario_reason: String,
}

/// First and last development years present in an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    /// Earliest assigned year.
    pub first: u16,
    /// Latest assigned year.
    pub last: u16,
}

/// The dated allocation for one scenario at one growth rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAllocation {
    /// Scenario the allocation belongs to.
    pub scenario: ScenarioId,
    /// Annual growth budget in acres/year used for dating.
    pub growth_rate: f64,
    /// Number of allocated parcels.
    pub total_count: usize,
    /// Year span of the allocation, `None` when no parcel qualified.
    pub year_range: Option<YearRange>,
    /// Allocated parcels in priority order.
    pub parcels: Vec<ParcelProjection>,
}

impl ScenarioAllocation {
    /// Builds an allocation record, deriving the count and year range from
    /// `parcels`.
    #[must_use]
    pub fn new(scenario: ScenarioId, growth_rate: f64, parcels: Vec<ParcelProjection>) -> Self {
        let year_range = YearRange::spanning(parcels.iter().map(|p| p.develop_year));
        Self {
            scenario,
            growth_rate,
            total_count: parcels.len(),
            year_range,
            parcels,
        }
    }
}

impl YearRange {
    /// Returns the smallest range covering every year, or `None` for an
    /// empty iterator.
    pub fn spanning(years: impl IntoIterator<Item = u16>) -> Option<Self> {
        years.into_iter().fold(None, |range, year| {
            Some(match range {
                None => Self {
                    first: year,
                    last: year,
                },
                Some(Self { first, last }) => Self {
                    first: first.min(year),
                    last: last.max(year),
                },
            })
        })
    }
}

/// Anything with a location and a development year.
///
/// Lets the boundary estimator work on both in-process allocations and
/// projections read back from serialized output.
pub trait DevelopmentSite {
    /// Assigned development year.
    fn develop_year(&self) -> u16;

    /// Representative point as `[lon, lat]`.
    fn site(&self) -> [f64; 2];
}

impl DevelopmentSite for AllocatedParcel<'_> {
    fn develop_year(&self) -> u16 {
        self.develop_year
    }

    fn site(&self) -> [f64; 2] {
        let c = self.candidate.parcel.centroid;
        [c.x(), c.y()]
    }
}

impl DevelopmentSite for ParcelProjection {
    fn develop_year(&self) -> u16 {
        self.develop_year
    }

    fn site(&self) -> [f64; 2] {
        self.centroid
    }
}
