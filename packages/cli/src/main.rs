#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for growth scenario analysis.
//!
//! Runs the parcel allocation against a directory of `GeoJSON` layers,
//! prints scenario scorecards and comparison data, and derives the
//! development boundary of a saved allocation.
//!
//! Uses `indicatif-log-bridge` (via [`growth_sim_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod report;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use growth_sim_allocation::progress::null_progress;
use growth_sim_allocation::{AnalysisConfig, AnalysisError, run_spatial_analysis, scenario_boundary};
use growth_sim_parcel_models::{HORIZON_YEAR, ScenarioAllocation};
use growth_sim_scenario_models::{DensityLevel, Scenario, ScenarioId};
use growth_sim_scorecard::metrics::PROJECTION_YEAR;
use growth_sim_spatial::GeoJsonDirectory;
use serde::{Deserialize, Serialize};

/// Environment variable naming the processed GIS layer directory.
const GIS_DATA_PATH_ENV: &str = "GIS_DATA_PATH";

const DEFAULT_GIS_DIR: &str = "data/processed";

#[derive(Parser)]
#[command(name = "growth_sim", about = "Growth scenario allocation and scorecards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenarios with headline projections
    Scenarios {
        /// Annual growth in acres per year
        #[arg(long, default_value_t = 75.0)]
        growth_rate: f64,
        /// Residential density: low, med, or high
        #[arg(long, default_value = "med")]
        density: DensityLevel,
    },
    /// Allocate parcels to every scenario from GIS layers
    Allocate {
        /// Directory of processed `GeoJSON` layers [env: `GIS_DATA_PATH`]
        #[arg(long)]
        gis_dir: Option<PathBuf>,
        /// Analysis configuration TOML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Annual growth in acres per year, overriding the configuration
        #[arg(long)]
        growth_rate: Option<f64>,
        /// Write the allocation JSON here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Disable the progress bar
        #[arg(long)]
        quiet: bool,
    },
    /// Grade scenarios on fiscal, environmental, social and transportation
    /// outcomes
    Scorecard {
        /// Only this scenario (default: all)
        #[arg(long)]
        scenario: Option<ScenarioId>,
        #[arg(long, default_value_t = 75.0)]
        growth_rate: f64,
        #[arg(long, default_value = "med")]
        density: DensityLevel,
        /// Horizon year of the projection
        #[arg(long, default_value_t = PROJECTION_YEAR)]
        year: u16,
        /// Scenario definition TOML replacing the built-in with the same id
        #[arg(long = "scenario-file")]
        scenario_files: Vec<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Convex hull of a scenario's parcels developed by a year
    Boundary {
        /// Allocation JSON written by `allocate`
        #[arg(long)]
        allocation: PathBuf,
        #[arg(long)]
        scenario: ScenarioId,
        /// Include parcels developed in or before this year
        #[arg(long, default_value_t = HORIZON_YEAR)]
        year: u16,
    },
    /// Dimension scores of every scenario side by side
    Compare {
        #[arg(long, default_value_t = 75.0)]
        growth_rate: f64,
        #[arg(long, default_value = "med")]
        density: DensityLevel,
        #[arg(long = "scenario-file")]
        scenario_files: Vec<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = growth_sim_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scenarios {
            growth_rate,
            density,
        } => {
            print!(
                "{}",
                report::scenario_table(&growth_sim_scenario::all_scenarios(), growth_rate, density)
            );
        }
        Commands::Allocate {
            gis_dir,
            config,
            growth_rate,
            output,
            quiet,
        } => {
            let mut config = match config {
                Some(path) => AnalysisConfig::load(&path)?,
                None => AnalysisConfig::default(),
            };
            if let Some(rate) = growth_rate {
                config = config.with_growth_rate(rate);
            }
            allocate(&gis_directory(gis_dir), &config, output.as_deref(), quiet, &multi)?;
        }
        Commands::Scorecard {
            scenario,
            growth_rate,
            density,
            year,
            scenario_files,
            json,
        } => {
            let scenarios: Vec<Scenario> = load_scenarios(&scenario_files)?
                .into_iter()
                .filter(|s| scenario.is_none_or(|id| s.id == id))
                .collect();
            let reports = report::scenario_reports(&scenarios, growth_rate, density, year)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for scenario_report in &reports {
                    print!("{}", report::scorecard_table(scenario_report));
                }
            }
        }
        Commands::Boundary {
            allocation,
            scenario,
            year,
        } => {
            let ring = boundary(&allocation, scenario, year)?;
            println!("{}", serde_json::to_string_pretty(&ring)?);
        }
        Commands::Compare {
            growth_rate,
            density,
            scenario_files,
            json,
        } => {
            let scenarios = load_scenarios(&scenario_files)?;
            let points = growth_sim_scorecard::radar_data(&scenarios, growth_rate, density)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print!("{}", report::comparison_table(&points));
            }
        }
    }

    Ok(())
}

/// Resolves the GIS directory from the flag, then the environment.
fn gis_directory(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(GIS_DATA_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GIS_DIR))
}

/// Built-in scenarios with any definitions read from `files` swapped in.
fn load_scenarios(files: &[PathBuf]) -> Result<Vec<Scenario>, Box<dyn std::error::Error>> {
    let mut overrides = Vec::with_capacity(files.len());
    for path in files {
        let text = std::fs::read_to_string(path)?;
        overrides.push(growth_sim_scenario::parse_scenario(
            &path.display().to_string(),
            &text,
        )?);
    }
    Ok(growth_sim_scenario::with_overrides(overrides))
}

fn allocate(
    gis_dir: &Path,
    config: &AnalysisConfig,
    output: Option<&Path>,
    quiet: bool,
    multi: &growth_sim_cli_utils::MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Loading GIS layers from {}", gis_dir.display());
    let layers = GeoJsonDirectory::load(gis_dir);

    let progress = if quiet {
        null_progress()
    } else {
        growth_sim_cli_utils::IndicatifProgress::steps_bar(multi, "Allocating scenarios")
    };

    let analysis = match run_spatial_analysis(&layers, config, progress.as_ref()) {
        Ok(analysis) => analysis,
        Err(e @ AnalysisError::Unavailable { .. }) => {
            log::warn!("{e}");
            eprintln!(
                "Spatial analysis unavailable for {}. Writing scorecards from estimated spatial profiles instead.",
                gis_dir.display()
            );
            let reports = report::scenario_reports(
                &growth_sim_scenario::all_scenarios(),
                config.growth_rate,
                DensityLevel::default(),
                PROJECTION_YEAR,
            )?;
            return write_json(&reports, output);
        }
        Err(e) => return Err(e.into()),
    };

    for summary in &analysis.summaries {
        log::debug!(
            "{}: {} of {} candidates assigned",
            summary.scenario,
            summary.assigned,
            summary.candidates
        );
    }

    write_json(&analysis, output)
}

fn write_json<T: Serialize>(
    value: &T,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// The part of `allocate` output needed to rebuild boundaries.
#[derive(Deserialize)]
struct AllocationFile {
    allocations: BTreeMap<ScenarioId, ScenarioAllocation>,
}

fn boundary(
    path: &Path,
    scenario: ScenarioId,
    year: u16,
) -> Result<Vec<[f64; 2]>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let file: AllocationFile = serde_json::from_str(&text)?;
    let allocation = file
        .allocations
        .get(&scenario)
        .ok_or_else(|| format!("No allocation for {scenario} in {}", path.display()))?;

    Ok(scenario_boundary(&allocation.parcels, year))
}
