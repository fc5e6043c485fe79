#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Compile-time registry of built-in growth scenario definitions.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Scenario files live in `scenarios/`. Because the set of growth
//! strategies is closed, every [`ScenarioId`] variant must have exactly
//! one definition here. A test enforces this.

use growth_sim_scenario_models::{Scenario, ScenarioId};
use thiserror::Error;

/// Errors that can occur while parsing scenario definitions.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The TOML document could not be deserialized into a [`Scenario`].
    #[error("Failed to parse scenario definition '{name}': {source}")]
    Parse {
        /// File or source name the definition came from.
        name: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Embedded TOML scenario definitions.
const SCENARIO_TOMLS: &[(&str, &str)] = &[
    ("fuda_lateral", include_str!("../scenarios/fuda_lateral.toml")),
    ("concentric", include_str!("../scenarios/concentric.toml")),
    ("rail_corridor", include_str!("../scenarios/rail_corridor.toml")),
    (
        "utility_service",
        include_str!("../scenarios/utility_service.toml"),
    ),
    (
        "ag_preservation",
        include_str!("../scenarios/ag_preservation.toml"),
    ),
    ("infill", include_str!("../scenarios/infill.toml")),
    ("resource_based", include_str!("../scenarios/resource_based.toml")),
];

/// Parses a single scenario definition from TOML.
///
/// Used for the embedded definitions and for user-supplied overrides
/// (e.g. a definition carrying a precomputed spatial profile).
///
/// # Errors
///
/// Returns [`RegistryError::Parse`] if the document is not a valid
/// scenario definition.
pub fn parse_scenario(name: &str, toml_str: &str) -> Result<Scenario, RegistryError> {
    toml::de::from_str(toml_str).map_err(|source| RegistryError::Parse {
        name: name.to_string(),
        source,
    })
}

/// Returns all built-in scenarios in canonical order.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_scenarios() -> Vec<Scenario> {
    SCENARIO_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_scenario(name, toml_str).unwrap_or_else(|e| panic!("{e}"))
        })
        .collect()
}

/// Looks up a built-in scenario by identifier.
#[must_use]
pub fn scenario(id: ScenarioId) -> Option<Scenario> {
    all_scenarios().into_iter().find(|s| s.id == id)
}

/// Replaces built-in definitions with overrides that share their id.
///
/// Overrides with an id that has no built-in counterpart cannot exist
/// because [`ScenarioId`] is closed, so the result always has one entry
/// per built-in scenario.
#[must_use]
pub fn with_overrides(overrides: Vec<Scenario>) -> Vec<Scenario> {
    let mut scenarios = all_scenarios();
    for replacement in overrides {
        if let Some(slot) = scenarios.iter_mut().find(|s| s.id == replacement.id) {
            log::info!("Overriding built-in scenario {}", replacement.id);
            *slot = replacement;
        }
    }
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_one_definition_per_scenario_id() {
        let scenarios = all_scenarios();
        assert_eq!(
            scenarios.len(),
            ScenarioId::all().len(),
            "Expected {} scenario definitions, found {}. \
             Every ScenarioId needs exactly one TOML file.",
            ScenarioId::all().len(),
            scenarios.len()
        );

        let ids: BTreeSet<ScenarioId> = scenarios.iter().map(|s| s.id).collect();
        let expected: BTreeSet<ScenarioId> = ScenarioId::all().iter().copied().collect();
        assert_eq!(ids, expected, "Duplicate or missing scenario definition");
    }

    #[test]
    fn definitions_follow_canonical_order() {
        let ids: Vec<ScenarioId> = all_scenarios().iter().map(|s| s.id).collect();
        assert_eq!(ids, ScenarioId::all());
    }

    #[test]
    fn all_scenarios_have_required_fields() {
        for scenario in &all_scenarios() {
            assert!(!scenario.name.is_empty(), "{} has empty name", scenario.id);
            assert!(
                !scenario.subtitle.is_empty(),
                "{} has empty subtitle",
                scenario.id
            );
            assert!(
                !scenario.description.is_empty(),
                "{} has empty description",
                scenario.id
            );
            assert!(
                scenario.infra_mult > 0.0,
                "{} has non-positive infra multiplier",
                scenario.id
            );
            assert!(
                scenario.spatial_profile.is_none(),
                "{} ships a spatial profile; built-ins rely on overlays or the estimator",
                scenario.id
            );
        }
    }

    #[test]
    fn infra_multipliers_and_ag_acres() {
        let rail = scenario(ScenarioId::RailCorridor).unwrap();
        assert!((rail.infra_mult - 0.85).abs() < f64::EPSILON);
        assert_eq!(rail.ag_acres, 180);

        let lateral = scenario(ScenarioId::FudaLateral).unwrap();
        assert_eq!(lateral.ag_acres, 820);

        let infill = scenario(ScenarioId::Infill).unwrap();
        assert_eq!(infill.ag_acres, 0);
    }

    #[test]
    fn parse_error_names_the_source() {
        let err = parse_scenario("broken", "id = \"nowhere\"").unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn overrides_replace_matching_definition() {
        let mut custom = scenario(ScenarioId::Infill).unwrap();
        custom.name = "Custom Infill".to_string();
        let merged = with_overrides(vec![custom]);
        assert_eq!(merged.len(), ScenarioId::all().len());
        let infill = merged.iter().find(|s| s.id == ScenarioId::Infill).unwrap();
        assert_eq!(infill.name, "Custom Infill");
    }
}
