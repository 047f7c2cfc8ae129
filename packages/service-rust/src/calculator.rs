//! Request orchestration: validate once, then run every requested operation.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures_util::future::join_all;
use numcalc_core::{
    OperationRegistry, OperationResult, ValidationError, ValidationOutcome, Validator,
};
use serde::Serialize;
use tower::ServiceExt;
use tracing::{info, warn};

use crate::classify::OperationService;
use crate::config::ServiceConfig;
use crate::middleware::{build_operation_pipeline, OperationPipeline};

/// Aggregated results for one validated request.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationReport {
    pub number: i64,
    /// One entry per distinct requested identifier, ordered by identifier.
    pub results: Vec<OperationResult>,
}

impl CalculationReport {
    /// Returns the result for `operation`, if it was requested.
    #[must_use]
    pub fn get(&self, operation: &str) -> Option<&OperationResult> {
        self.results.iter().find(|r| r.operation == operation)
    }

    /// Number of results flagged as errors.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }
}

/// Entry point for hosts: owns the registry, validator, and pipeline.
///
/// Built once at startup. All methods take `&self`, so a single instance can
/// serve concurrent requests.
pub struct Calculator {
    registry: Arc<OperationRegistry>,
    validator: Validator,
    classifier: OperationService,
    pipeline: OperationPipeline,
}

impl Calculator {
    /// Builds a calculator over the five built-in operations.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_registry(config, OperationRegistry::new())
    }

    /// Builds a calculator over a caller-assembled registry.
    #[must_use]
    pub fn with_registry(config: ServiceConfig, registry: OperationRegistry) -> Self {
        let config = Arc::new(config);
        let registry = Arc::new(registry);
        Self {
            validator: Validator::new(config.max_number),
            pipeline: build_operation_pipeline(Arc::clone(&registry), &config),
            classifier: OperationService::new(config),
            registry,
        }
    }

    /// Returns the shared registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<OperationRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn known_operation_ids(&self) -> BTreeSet<&'static str> {
        self.registry.known_operation_ids()
    }

    /// Validates raw parameters with the configured upper bound.
    pub fn validate<S: AsRef<str>>(
        &self,
        number_text: Option<&str>,
        operation_ids: &[S],
    ) -> ValidationOutcome {
        self.validator.validate(number_text, operation_ids)
    }

    /// Validates the request and runs each distinct identifier concurrently.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` when the request is rejected; in that case
    /// nothing is computed. Per-operation failures never surface here; they
    /// appear as error-flagged entries in the report.
    pub async fn calculate<S: AsRef<str>>(
        &self,
        number_text: Option<&str>,
        operation_ids: &[S],
    ) -> Result<CalculationReport, ValidationError> {
        let (number, operations) = self.validate(number_text, operation_ids).into_result()?;

        let results = join_all(operations.iter().map(|id| self.run(number, id))).await;

        let report = CalculationReport { number, results };
        info!(
            number,
            requested = report.results.len(),
            failed = report.failure_count(),
            "calculation complete"
        );
        Ok(report)
    }

    /// Runs a single identifier through the pipeline.
    ///
    /// Unknown identifiers, timeouts, load shedding, and computation faults all
    /// yield an error-flagged result naming `operation_id`.
    pub async fn run(&self, number: i64, operation_id: &str) -> OperationResult {
        let op = match self.classifier.classify(number, operation_id) {
            Ok(op) => op,
            Err(err) => return OperationResult::failure(operation_id, err),
        };

        match self.pipeline.clone().oneshot(op).await {
            Ok(resp) => OperationResult::success(resp.outcome),
            Err(err) => {
                warn!(operation = operation_id, error = %err, "operation failed");
                OperationResult::failure(operation_id, err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use numcalc_core::{MathOperation, OperationKind, Outcome, PrimeVerdict};

    use super::*;

    struct BrokenFactorial;

    impl MathOperation for BrokenFactorial {
        fn kind(&self) -> OperationKind {
            OperationKind::Factorial
        }

        fn compute(&self, _number: i64) -> Outcome {
            panic!("multiplication overflowed");
        }
    }

    struct SlowFibonacci;

    impl MathOperation for SlowFibonacci {
        fn kind(&self) -> OperationKind {
            OperationKind::Fibonacci
        }

        fn compute(&self, number: i64) -> Outcome {
            std::thread::sleep(Duration::from_millis(400));
            numcalc_core::ops::FibonacciOperation.compute(number)
        }
    }

    fn calculator() -> Calculator {
        Calculator::new(ServiceConfig::default())
    }

    #[tokio::test]
    async fn runs_every_requested_operation() {
        let report = calculator()
            .calculate(
                Some("5"),
                &["factorial", "palindrome", "fibonacci", "prime", "cubeRoot"],
            )
            .await
            .unwrap();

        assert_eq!(report.number, 5);
        assert_eq!(report.results.len(), 5);
        assert_eq!(report.failure_count(), 0);
        assert_eq!(report.get("factorial").unwrap().message, "Factorial of 5 = 120");
        assert_eq!(
            report.get("fibonacci").unwrap().message,
            "Fibonacci series with 5 terms: [0, 1, 1, 2, 3]"
        );
        assert_eq!(
            report.get("prime").unwrap().message,
            "The number 5 is a prime number."
        );
        assert_eq!(
            report.get("palindrome").unwrap().message,
            "The number 5 is a palindrome."
        );
        assert_eq!(
            report.get("cubeRoot").unwrap().message,
            "Cube root of 5 = 1.709976"
        );
    }

    #[tokio::test]
    async fn results_are_ordered_and_deduplicated() {
        let report = calculator()
            .calculate(Some("7"), &["prime", "factorial", "prime"])
            .await
            .unwrap();
        let ids: Vec<_> = report.results.iter().map(|r| r.operation.as_str()).collect();
        assert_eq!(ids, vec!["factorial", "prime"]);
    }

    #[tokio::test]
    async fn unknown_identifier_does_not_abort_batch() {
        let report = calculator()
            .calculate(Some("17"), &["prime", "bogus"])
            .await
            .unwrap();

        let prime = report.get("prime").unwrap();
        assert!(prime.success);
        assert!(matches!(
            prime.outcome,
            Some(Outcome::Prime {
                verdict: PrimeVerdict::Prime,
                ..
            })
        ));

        let bogus = report.get("bogus").unwrap();
        assert!(!bogus.success);
        assert!(bogus.message.contains("bogus"));
        assert_eq!(report.failure_count(), 1);
    }

    #[tokio::test]
    async fn validation_failure_rejects_whole_request() {
        let calc = calculator();
        let err = calc.calculate(Some("-3"), &["prime"]).await.unwrap_err();
        assert_eq!(err, ValidationError::NotPositive);

        let empty: [&str; 0] = [];
        let err = calc.calculate(Some("3"), &empty).await.unwrap_err();
        assert_eq!(err.to_string(), "At least one operation must be selected");
    }

    #[tokio::test]
    async fn configured_limit_applies() {
        let calc = Calculator::new(ServiceConfig {
            max_number: 10,
            ..ServiceConfig::default()
        });
        let err = calc.calculate(Some("11"), &["prime"]).await.unwrap_err();
        assert_eq!(err.to_string(), "Number must not exceed 10");
    }

    #[tokio::test]
    async fn timeout_is_isolated_to_one_result() {
        let calc = Calculator::new(ServiceConfig {
            default_operation_timeout_ms: 0,
            ..ServiceConfig::default()
        });
        let result = calc.run(5_000, "factorial").await;
        assert!(!result.success);
        assert_eq!(result.message, "Error: operation timed out after 0ms");
        assert_eq!(result.label, "Factorial");
    }

    #[tokio::test]
    async fn shed_operations_are_error_results() {
        let calc = Calculator::new(ServiceConfig {
            max_concurrent_operations: 0,
            ..ServiceConfig::default()
        });
        let report = calc.calculate(Some("4"), &["prime"]).await.unwrap();
        assert_eq!(report.failure_count(), 1);
        assert!(report.results[0].message.contains("overloaded"));
    }

    #[tokio::test]
    async fn abandoned_computation_keeps_capacity_until_done() {
        let calc = Calculator::with_registry(
            ServiceConfig {
                max_concurrent_operations: 1,
                default_operation_timeout_ms: 1,
                ..ServiceConfig::default()
            },
            OperationRegistry::new().with_operation(Box::new(SlowFibonacci)),
        );

        let first = calc.run(5_000, "fibonacci").await;
        assert_eq!(first.message, "Error: operation timed out after 1ms");

        let second = calc.run(5_000, "fibonacci").await;
        assert_eq!(second.message, "Error: calculator overloaded, try again later");
    }

    #[tokio::test]
    async fn panicking_operation_fails_alone() {
        let calc = Calculator::with_registry(
            ServiceConfig::default(),
            OperationRegistry::new().with_operation(Box::new(BrokenFactorial)),
        );
        let report = calc
            .calculate(Some("5"), &["factorial", "prime"])
            .await
            .unwrap();

        let factorial = report.get("factorial").unwrap();
        assert!(!factorial.success);
        assert!(factorial.message.starts_with("Error: internal error:"));
        assert_eq!(factorial.label, "Factorial");

        let prime = report.get("prime").unwrap();
        assert!(prime.success);
        assert_eq!(prime.message, "The number 5 is a prime number.");
        assert_eq!(report.failure_count(), 1);
    }

    #[tokio::test]
    async fn run_accepts_inputs_the_validator_would_reject() {
        let result = calculator().run(-8, "cubeRoot").await;
        assert!(result.success);
        assert_eq!(result.message, "Cube root of -8 = -2.000000");
    }

    #[test]
    fn exposes_known_identifiers() {
        let ids = calculator().known_operation_ids();
        assert_eq!(ids.len(), 5);
        assert!(ids.contains("cubeRoot"));
    }

    #[tokio::test]
    async fn report_serializes_to_json() {
        let report = calculator()
            .calculate(Some("25"), &["factorial"])
            .await
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["number"], 25);
        assert_eq!(json["results"][0]["operation"], "factorial");
        assert_eq!(
            json["results"][0]["outcome"]["value"],
            "15511210043330985984000000"
        );
    }
}
