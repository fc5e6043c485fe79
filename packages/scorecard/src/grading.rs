//! Normalization of raw metrics to 0–100 scores.
//!
//! Every metric is mapped linearly between a "best" threshold (100) and a
//! "worst" threshold (0), then clamped. Degenerate thresholds score a
//! neutral 50.

/// Score returned when best and worst thresholds coincide.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Score for a jobs-housing ratio inside the balanced band.
pub const BALANCED_JOBS_HOUSING_SCORE: f64 = 95.0;

/// Maps `value` to 0–100 where smaller values are better.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn normalize_lower_better(value: f64, best: f64, worst: f64) -> f64 {
    if worst == best {
        return NEUTRAL_SCORE;
    }
    ((worst - value) / (worst - best) * 100.0).clamp(0.0, 100.0)
}

/// Maps `value` to 0–100 where larger values are better.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn normalize_higher_better(value: f64, best: f64, worst: f64) -> f64 {
    if best == worst {
        return NEUTRAL_SCORE;
    }
    ((value - worst) / (best - worst) * 100.0).clamp(0.0, 100.0)
}

// ── Fiscal ──────────────────────────────────────────────────────────────

/// Operating cost over tax revenue: 0.8 scores 100, 1.5 scores 0.
#[must_use]
pub fn grade_cost_to_serve(ratio: f64) -> f64 {
    normalize_lower_better(ratio, 0.8, 1.5)
}

/// Infrastructure dollars per dwelling unit: $20k scores 100, $60k
/// scores 0.
#[must_use]
pub fn grade_infra_cost_per_unit(cost: f64) -> f64 {
    normalize_lower_better(cost, 20_000.0, 60_000.0)
}

/// Tax revenue relative to the best revenue among compared scenarios.
#[must_use]
pub fn grade_tax_revenue(revenue: f64, max_revenue: f64) -> f64 {
    normalize_higher_better(revenue, max_revenue, 0.0)
}

/// Debt capacity relative to the best capacity among compared scenarios.
#[must_use]
pub fn grade_debt_capacity(capacity: f64, max_capacity: f64) -> f64 {
    normalize_higher_better(capacity, max_capacity, 0.0)
}

// ── Environmental ───────────────────────────────────────────────────────

/// Wetland acres impacted: 0 scores 100, 20 scores 0.
#[must_use]
pub fn grade_wetland_impact(acres: f64) -> f64 {
    normalize_lower_better(acres, 0.0, 20.0)
}

/// Floodplain acres encroached: 0 scores 100, 15 scores 0.
#[must_use]
pub fn grade_floodplain_impact(acres: f64) -> f64 {
    normalize_lower_better(acres, 0.0, 15.0)
}

/// Impervious share of developed area: 35% scores 100, 65% scores 0.
#[must_use]
pub fn grade_impervious_surface(pct: f64) -> f64 {
    normalize_lower_better(pct, 0.35, 0.65)
}

/// Stream buffer violations: none scores 100, five scores 0.
#[must_use]
pub fn grade_stream_buffer_violations(count: f64) -> f64 {
    normalize_lower_better(count, 0.0, 5.0)
}

// ── Social & housing ────────────────────────────────────────────────────

/// Affordable share of new units: 25% scores 100, 5% scores 0.
#[must_use]
pub fn grade_affordable_housing(pct: f64) -> f64 {
    normalize_higher_better(pct, 0.25, 0.05)
}

/// Jobs per dwelling unit.
///
/// `[0.9, 1.1]` is balanced and scores 95. Below the band the score falls
/// to 0 at 0.5; above it, to 0 at 2.0.
#[must_use]
pub fn grade_jobs_housing(ratio: f64) -> f64 {
    if (0.9..=1.1).contains(&ratio) {
        BALANCED_JOBS_HOUSING_SCORE
    } else if ratio < 0.9 {
        normalize_higher_better(ratio, 0.9, 0.5)
    } else {
        normalize_lower_better(ratio, 1.1, 2.0)
    }
}

// ── Transportation ──────────────────────────────────────────────────────

/// Share of units within half a mile of transit: 60% scores 100, 10%
/// scores 0.
#[must_use]
pub fn grade_transit_access(pct: f64) -> f64 {
    normalize_higher_better(pct, 0.60, 0.10)
}

/// Daily VMT per dwelling unit: 15 scores 100, 40 scores 0.
#[must_use]
pub fn grade_vmt(vmt_per_unit: f64) -> f64 {
    normalize_lower_better(vmt_per_unit, 15.0, 40.0)
}

/// New road miles relative to the most among compared scenarios.
#[must_use]
pub fn grade_road_miles(miles: f64, max_miles: f64) -> f64 {
    normalize_lower_better(miles, 0.0, max_miles)
}

// ── Aggregation ─────────────────────────────────────────────────────────

/// Unweighted mean of metric scores, 0 for no metrics.
#[must_use]
pub fn dimension_score(scores: &[f64]) -> f64 {
    mean(scores)
}

/// Unweighted mean of dimension scores, 0 for no dimensions.
#[must_use]
pub fn overall_score(dimension_scores: &[f64]) -> f64 {
    mean(dimension_scores)
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
