//! The `PopulationWriter` trait implemented by all backend writers.

use hg_synth::Plan;

use crate::OutputResult;

/// Trait implemented by the CSV, MATSim, SQLite, and Parquet writers.
pub trait PopulationWriter {
    /// Append a batch of plans.  May be called several times.
    ///
    /// Fails with [`OutputError::Finished`](crate::OutputError::Finished)
    /// once [`finish`](Self::finish) has run.
    fn write_plans(&mut self, plans: &[Plan]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
