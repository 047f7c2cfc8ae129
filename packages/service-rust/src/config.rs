use numcalc_core::DEFAULT_MAX_NUMBER;

/// Configuration for the calculation pipeline.
///
/// Controls the accepted input range, per-operation timeouts, and the
/// concurrency limit.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Largest number the validator accepts.
    pub max_number: i64,
    /// Timeout applied to each operation in milliseconds.
    pub default_operation_timeout_ms: u64,
    /// Maximum number of concurrently running operations before load shedding.
    pub max_concurrent_operations: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_number: DEFAULT_MAX_NUMBER,
            default_operation_timeout_ms: 30_000,
            max_concurrent_operations: 1000,
        }
    }
}
