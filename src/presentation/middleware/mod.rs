//! Middleware
//!
//! Tower middleware for request processing.

pub mod cors;
pub mod metrics;
pub mod logging;

pub use cors::create_cors_layer;
pub use metrics::track_metrics;
pub use logging::{create_trace_layer, RequestSpan};
