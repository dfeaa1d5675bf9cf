//! Request logging middleware and Prometheus metrics.

mod metrics;
mod request;

pub(crate) use metrics::metrics_handler;
pub(crate) use request::request_logging;
