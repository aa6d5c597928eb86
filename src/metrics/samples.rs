use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

use crate::error::MetricsError;

/// Append-only latency collector shared by the dispatch workers.
///
/// Appends are serialized through a mutex; the lock is never held across an
/// `.await`. Once every writer is done the contents are moved out with
/// [`SampleRecorder::finish`].
#[derive(Debug, Default)]
pub struct SampleRecorder {
    samples_ms: Mutex<Vec<u64>>,
}

impl SampleRecorder {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples_ms: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Appends one latency measurement, truncated to whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error when a previous writer panicked while holding the lock.
    pub fn record(&self, latency: Duration) -> Result<(), MetricsError> {
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        let mut guard = self
            .samples_ms
            .lock()
            .map_err(|_poisoned| MetricsError::SamplesPoisoned)?;
        guard.push(latency_ms);
        Ok(())
    }

    /// Moves the recorded samples out into a read-only [`SampleSet`].
    ///
    /// # Errors
    ///
    /// Returns an error when the lock is poisoned.
    pub fn finish(&self) -> Result<SampleSet, MetricsError> {
        let mut guard = self
            .samples_ms
            .lock()
            .map_err(|_poisoned| MetricsError::SamplesPoisoned)?;
        Ok(SampleSet::from(std::mem::take(&mut *guard)))
    }
}

/// Latencies (ms) of one completed dispatch, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SampleSet {
    samples_ms: Vec<u64>,
}

impl SampleSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples_ms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples_ms.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.samples_ms
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.samples_ms.iter().copied()
    }
}

impl From<Vec<u64>> for SampleSet {
    fn from(samples_ms: Vec<u64>) -> Self {
        Self { samples_ms }
    }
}
