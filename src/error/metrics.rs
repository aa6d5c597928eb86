use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Sample set lock was poisoned.")]
    SamplesPoisoned,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
