//! Progress reporting for the scenario batch.
//!
//! The analysis reports one unit per scenario. Rendering is left to the
//! caller (see the `indicatif` implementation in the CLI utilities).

use std::sync::Arc;

/// Receives progress updates from [`crate::run_spatial_analysis`].
///
/// Implementations must be `Send + Sync` so a single reporter can be shared
/// across threads.
pub trait ProgressCallback: Send + Sync {
    /// Set the total expected units of work.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` units.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
