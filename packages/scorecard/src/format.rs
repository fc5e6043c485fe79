//! Display formatting for scorecard metric values.

use growth_sim_scorecard_models::MetricUnit;

/// Renders `value` the way it is shown for `unit`.
///
/// Rounding is half away from zero, so `0.5` becomes `1`.
#[must_use]
pub fn format_value(value: f64, unit: MetricUnit) -> String {
    match unit {
        MetricUnit::Dollars => format!("${}", group_thousands(value)),
        MetricUnit::MillionDollars => format!("${value:.1}M"),
        MetricUnit::Percent => format!("{:.0}%", (value * 100.0).round()),
        MetricUnit::Ratio => format!("{value:.2}"),
        MetricUnit::Miles => format!("{value:.1} mi"),
        MetricUnit::Acres => format!("{} ac", group_thousands(value)),
        MetricUnit::Units => group_thousands(value),
        MetricUnit::Vmt => format!("{} VMT", group_thousands(value)),
        MetricUnit::Count => format!("{:.0}", value.round()),
    }
}

/// Renders a unitless value with one decimal.
#[must_use]
pub fn format_plain(value: f64) -> String {
    format!("{value:.1}")
}

/// Rounds `value` to a whole number and inserts `,` between groups of
/// three digits.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.round());
    let (sign, digits) = rounded
        .strip_prefix('-')
        .map_or(("", rounded.as_str()), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if grouped == "0" {
        // `-0.4` rounds to negative zero
        return grouped;
    }
    format!("{sign}{grouped}")
}
