//! Per-request logging and metrics middleware.

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{error, info, warn};

use super::metrics;

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let started = Instant::now();
    let _in_flight = metrics::InFlightRequestGuard::track();

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();

    ctrl.call_next(req, depot, res).await;

    let duration = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);
    let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);

    metrics::observe_request(&method, &path, status.as_u16(), duration.as_secs_f64());

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms,
        "request completed"
    );

    if status.is_server_error() {
        error!(
            status = status.as_u16(),
            method = %method,
            path = %path,
            "server error response"
        );
    } else if status.is_client_error() {
        warn!(
            status = status.as_u16(),
            method = %method,
            path = %path,
            "client error response"
        );
    }
}
