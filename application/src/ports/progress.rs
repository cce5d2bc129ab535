//! Progress notification port
//!
//! Defines the interface for reporting progress while replicas run.

/// Callback for progress updates during replica execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain log lines, etc.).
/// Calls arrive from the single task draining replica completions, so
/// `completed` only ever grows.
pub trait ProgressNotifier: Send + Sync {
    /// Called once before any replica is started
    fn on_replicas_start(&self, total: usize);

    /// Called when a replica finishes, successfully or not
    fn on_replica_complete(&self, completed: usize, total: usize, success: bool);

    /// Called after the last replica finished
    fn on_replicas_finished(&self, _succeeded: usize, _total: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_replicas_start(&self, _total: usize) {}
    fn on_replica_complete(&self, _completed: usize, _total: usize, _success: bool) {}
}
