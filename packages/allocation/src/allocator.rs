//! Development-year assignment under an annual acreage budget.

use growth_sim_parcel_models::{AllocatedParcel, BASE_YEAR, HORIZON_YEAR, ScoredCandidate};
use thiserror::Error;

/// Default cap on allocated parcels per scenario.
pub const DEFAULT_MAX_PARCELS: usize = 800;

/// Errors that can occur while assigning development years.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AllocationError {
    /// The growth rate is zero, negative, or not finite.
    #[error("Growth rate must be a positive number of acres per year, got {0}")]
    InvalidGrowthRate(f64),
}

/// Orders candidates by score and dates them by cumulative acreage.
///
/// Candidates are stable-sorted by descending score (ties keep input
/// order) and truncated to `max_parcels`. Each parcel's year is
/// `BASE_YEAR + ceil(cumulative_acres / growth_rate)`, capped at
/// `HORIZON_YEAR`, so years never decrease along the output.
///
/// # Errors
///
/// Returns [`AllocationError::InvalidGrowthRate`] unless `growth_rate` is
/// finite and greater than zero.
pub fn assign_development_years(
    mut candidates: Vec<ScoredCandidate<'_>>,
    growth_rate: f64,
    max_parcels: usize,
) -> Result<Vec<AllocatedParcel<'_>>, AllocationError> {
    if !growth_rate.is_finite() || growth_rate <= 0.0 {
        return Err(AllocationError::InvalidGrowthRate(growth_rate));
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(max_parcels);

    let mut cumulative_acres = 0.0;
    Ok(candidates
        .into_iter()
        .map(|candidate| {
            cumulative_acres += candidate.parcel.acres;
            let develop_year = development_year(cumulative_acres, growth_rate);
            AllocatedParcel {
                candidate,
                develop_year,
            }
        })
        .collect())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn development_year(cumulative_acres: f64, growth_rate: f64) -> u16 {
    let span = f64::from(HORIZON_YEAR - BASE_YEAR);
    let offset = (cumulative_acres / growth_rate).ceil().clamp(0.0, span);
    BASE_YEAR + offset as u16
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, point};
    use growth_sim_parcel_models::Parcel;

    use super::*;

    fn parcel(id: &str, acres: f64) -> Parcel {
        Parcel {
            parcel_no: Some(id.to_string()),
            address: None,
            owner: None,
            school_district: None,
            acres,
            land_value: None,
            geometry: MultiPolygon::new(vec![]),
            centroid: point!(x: 0.0, y: 0.0),
        }
    }

    fn candidates<'a>(parcels: &'a [Parcel], scores: &[f64]) -> Vec<ScoredCandidate<'a>> {
        parcels
            .iter()
            .zip(scores)
            .map(|(parcel, score)| ScoredCandidate {
                parcel,
                score: *score,
                reason: String::new(),
            })
            .collect()
    }

    fn ids(allocated: &[AllocatedParcel<'_>]) -> Vec<String> {
        allocated
            .iter()
            .map(|a| a.candidate.parcel.parcel_no.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn sorts_by_score_and_accumulates_years() {
        let parcels = vec![parcel("low", 50.0), parcel("high", 50.0), parcel("mid", 60.0)];
        let allocated =
            assign_development_years(candidates(&parcels, &[10.0, 90.0, 50.0]), 75.0, 800)
                .unwrap();

        assert_eq!(ids(&allocated), vec!["high", "mid", "low"]);
        // cumulative 50, 110, 160 at 75 ac/yr
        let years: Vec<u16> = allocated.iter().map(|a| a.develop_year).collect();
        assert_eq!(years, vec![2026, 2027, 2028]);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let parcels = vec![parcel("a", 1.0), parcel("b", 1.0), parcel("c", 1.0)];
        let allocated =
            assign_development_years(candidates(&parcels, &[5.0, 5.0, 5.0]), 75.0, 800).unwrap();
        assert_eq!(ids(&allocated), vec!["a", "b", "c"]);
    }

    #[test]
    fn truncates_to_cap() {
        let parcels: Vec<Parcel> = (0..10).map(|i| parcel(&i.to_string(), 1.0)).collect();
        let scores: Vec<f64> = (0..10).map(f64::from).collect();
        let allocated = assign_development_years(candidates(&parcels, &scores), 75.0, 3).unwrap();
        assert_eq!(ids(&allocated), vec!["9", "8", "7"]);
    }

    #[test]
    fn years_are_capped_at_horizon() {
        let parcels = vec![parcel("huge", 10_000.0)];
        let allocated =
            assign_development_years(candidates(&parcels, &[50.0]), 75.0, 800).unwrap();
        assert_eq!(allocated[0].develop_year, HORIZON_YEAR);
    }

    #[test]
    fn years_never_decrease() {
        let parcels: Vec<Parcel> = (0..40)
            .map(|i| parcel(&i.to_string(), f64::from(i % 7) * 3.5 + 0.2))
            .collect();
        let scores: Vec<f64> = (0..40).map(|i| f64::from((i * 37) % 100)).collect();
        let allocated =
            assign_development_years(candidates(&parcels, &scores), 20.0, 800).unwrap();

        assert!(allocated.windows(2).all(|w| w[0].develop_year <= w[1].develop_year));
        assert!(
            allocated
                .iter()
                .all(|a| (BASE_YEAR..=HORIZON_YEAR).contains(&a.develop_year))
        );
    }

    #[test]
    fn higher_growth_rate_never_delays_a_parcel() {
        let parcels: Vec<Parcel> = (0..25).map(|i| parcel(&i.to_string(), 12.5)).collect();
        let scores: Vec<f64> = (0..25).map(|i| f64::from(100 - i)).collect();

        let slow = assign_development_years(candidates(&parcels, &scores), 50.0, 800).unwrap();
        let fast = assign_development_years(candidates(&parcels, &scores), 150.0, 800).unwrap();

        assert_eq!(ids(&slow), ids(&fast));
        for (s, f) in slow.iter().zip(&fast) {
            assert!(f.develop_year <= s.develop_year);
        }
    }

    #[test]
    fn is_deterministic() {
        let parcels: Vec<Parcel> = (0..30).map(|i| parcel(&i.to_string(), 2.0)).collect();
        let scores: Vec<f64> = (0..30).map(|i| f64::from(i % 4)).collect();

        let a = assign_development_years(candidates(&parcels, &scores), 75.0, 800).unwrap();
        let b = assign_development_years(candidates(&parcels, &scores), 75.0, 800).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_growth_rates() {
        let parcels = vec![parcel("a", 1.0)];
        for rate in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    assign_development_years(candidates(&parcels, &[1.0]), rate, 800),
                    Err(AllocationError::InvalidGrowthRate(_))
                ),
                "rate {rate} should be rejected"
            );
        }
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(assign_development_years(vec![], 75.0, 800).unwrap().is_empty());
    }
}
