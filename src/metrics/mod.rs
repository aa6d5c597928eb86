//! Latency samples and the statistics derived from them.
mod samples;
mod summary;


pub use samples::{SampleRecorder, SampleSet};
pub use summary::{LatencySummary, RunReport};
