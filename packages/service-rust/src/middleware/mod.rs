//! Tower middleware layers for the operation pipeline.
//!
//! - [`metrics`]: Operation timing, success and verdict via `tracing` spans
//! - [`timeout`]: Per-operation deadline
//! - [`pipeline`]: Composes the layers around the router
//!
//! Concurrency limiting lives in [`crate::router`], next to the blocking
//! tasks whose lifetime it has to track.

pub mod metrics;
pub mod pipeline;
pub mod timeout;

pub use metrics::MetricsLayer;
pub use pipeline::{build_operation_pipeline, OperationPipeline};
pub use timeout::TimeoutLayer;
