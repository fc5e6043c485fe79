//! Conversion of allocated parcels into caller-facing records.

use growth_sim_parcel_models::{AllocatedParcel, ParcelProjection};
use growth_sim_spatial::geometry;

/// Ramer–Douglas–Peucker tolerance for output rings, in degrees.
pub const SIMPLIFY_TOLERANCE: f64 = 0.0001;

/// Projects an allocation into owned [`ParcelProjection`] records.
///
/// `index` in the `unknown-<index>` fallback identifier is the parcel's
/// position in `allocated`.
#[must_use]
pub fn project_allocation(
    allocated: &[AllocatedParcel<'_>],
    default_school_district: &str,
) -> Vec<ParcelProjection> {
    allocated
        .iter()
        .enumerate()
        .map(|(index, a)| project_parcel(index, a, default_school_district))
        .collect()
}

fn project_parcel(
    index: usize,
    allocated: &AllocatedParcel<'_>,
    default_school_district: &str,
) -> ParcelProjection {
    let parcel = allocated.candidate.parcel;

    ParcelProjection {
        parcel_no: parcel
            .parcel_no
            .clone()
            .unwrap_or_else(|| format!("unknown-{index}")),
        address: parcel
            .address
            .clone()
            .unwrap_or_else(|| "Unknown address".to_string()),
        owner: parcel.owner.clone().unwrap_or_else(|| "Unknown".to_string()),
        school_district: parcel
            .school_district
            .clone()
            .unwrap_or_else(|| default_school_district.to_string()),
        area_acres: round_to(parcel.acres, 2),
        land_value: parcel.land_value,
        coordinates: geometry::simplified_rings(&parcel.geometry, SIMPLIFY_TOLERANCE),
        centroid: [parcel.centroid.x(), parcel.centroid.y()],
        priority_score: round_to(allocated.candidate.score, 1),
        develop_year: allocated.develop_year,
        scenario_reason: allocated.candidate.reason.clone(),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, point, polygon};
    use growth_sim_parcel_models::{Parcel, ScoredCandidate};

    use super::*;

    fn parcel(parcel_no: Option<&str>) -> Parcel {
        Parcel {
            parcel_no: parcel_no.map(ToString::to_string),
            address: None,
            owner: Some("Jones Farm LLC".to_string()),
            school_district: None,
            acres: 4.567,
            land_value: Some(90_000.0),
            geometry: MultiPolygon::new(vec![polygon![
                (x: -89.5, y: 43.0),
                (x: -89.49, y: 43.0),
                (x: -89.49, y: 43.01),
                (x: -89.5, y: 43.01),
            ]]),
            centroid: point!(x: -89.495, y: 43.005),
        }
    }

    #[test]
    fn fills_defaults_and_rounds() {
        let parcels = [parcel(Some("0608-1")), parcel(None)];
        let allocated: Vec<AllocatedParcel<'_>> = parcels
            .iter()
            .map(|p| AllocatedParcel {
                candidate: ScoredCandidate {
                    parcel: p,
                    score: 87.46,
                    reason: "near rail".to_string(),
                },
                develop_year: 2027,
            })
            .collect();

        let projected = project_allocation(&allocated, "Fitchburg");

        assert_eq!(projected[0].parcel_no, "0608-1");
        assert_eq!(projected[1].parcel_no, "unknown-1");
        assert_eq!(projected[0].address, "Unknown address");
        assert_eq!(projected[0].owner, "Jones Farm LLC");
        assert_eq!(projected[0].school_district, "Fitchburg");
        assert!((projected[0].area_acres - 4.57).abs() < 1e-12);
        assert!((projected[0].priority_score - 87.5).abs() < 1e-12);
        assert_eq!(projected[0].centroid, [-89.495, 43.005]);
        assert_eq!(projected[0].develop_year, 2027);
        assert_eq!(projected[0].coordinates.len(), 1);
        assert_eq!(projected[0].coordinates[0].len(), 5);
    }
}
