//! Scenario footprint estimation.

use growth_sim_parcel_models::DevelopmentSite;
use growth_sim_spatial::geometry;

/// Convex hull of the sites developed by `cutoff_year`.
///
/// Fewer than three qualifying sites are returned as-is. Otherwise the
/// result is a closed ring (first point repeated last).
#[must_use]
pub fn scenario_boundary<S: DevelopmentSite>(sites: &[S], cutoff_year: u16) -> Vec<[f64; 2]> {
    let points: Vec<[f64; 2]> = sites
        .iter()
        .filter(|s| s.develop_year() <= cutoff_year)
        .map(DevelopmentSite::site)
        .collect();

    if points.len() < 3 {
        return points;
    }

    geometry::convex_hull_ring(&points)
}
