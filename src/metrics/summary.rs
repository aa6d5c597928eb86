use serde::Serialize;

use super::SampleSet;

/// Min/max/average over a [`SampleSet`]. The average is floor(sum / count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencySummary {
    pub count: usize,
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: u64,
}

impl LatencySummary {
    /// Returns `None` for an empty sample set.
    #[must_use]
    pub fn from_samples(samples: &SampleSet) -> Option<Self> {
        let min_ms = samples.iter().min()?;
        let max_ms = samples.iter().max()?;
        let count = samples.len();

        let sum_ms = samples
            .iter()
            .fold(0u128, |acc, value| acc.saturating_add(u128::from(value)));
        let avg_ms = u128::try_from(count)
            .ok()
            .and_then(|count| sum_ms.checked_div(count))
            .map_or(0, |avg| u64::try_from(avg).unwrap_or(u64::MAX));

        Some(Self {
            count,
            min_ms,
            max_ms,
            avg_ms,
        })
    }
}

/// Everything printed at the end of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: Option<LatencySummary>,
    pub wall_time_ms: u64,
    pub samples_ms: SampleSet,
}
