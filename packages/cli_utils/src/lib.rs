#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the growth-sim toolchain.
//!
//! Provides an `indicatif`-backed progress bar behind the allocation
//! [`ProgressCallback`] trait, plus [`init_logger`] which sets up
//! `indicatif-log-bridge` so that `log::info!` and friends are suspended
//! while progress bars redraw.

use std::sync::Arc;
use std::time::Duration;

use growth_sim_allocation::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

/// An `indicatif` [`ProgressBar`] that implements [`ProgressCallback`].
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Style to switch to once `set_total()` provides a known length.
    bar_style: ProgressStyle,
}

impl IndicatifProgress {
    /// Creates a progress bar for step-level progress (e.g. scenarios 3/7).
    /// Starts as a spinner until [`ProgressCallback::set_total()`] is
    /// called.
    #[must_use]
    pub fn steps_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        let bar_style = ProgressStyle::with_template(
            "{msg} {wide_bar:.green/dim} {pos}/{len} [{elapsed_precise}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

        Arc::new(Self { bar, bar_style })
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(self.bar_style.clone());
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// log lines and progress bars share the terminal.
///
/// Returns the [`MultiProgress`] that all progress bars must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // Already set when called twice, e.g. in tests

    log::set_max_level(level);

    multi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_bar_tracks_scenarios() {
        let multi = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        let progress = IndicatifProgress::steps_bar(&multi, "Allocating");
        progress.set_total(7);
        progress.inc(3);
        progress.set_message("Allocating infill".to_string());
        progress.finish("done".to_string());
    }

    #[test]
    fn init_logger_is_idempotent() {
        let _first = init_logger();
        let _second = init_logger();
    }
}
