//! Per-request spans, request ids and access logging.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, field, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use self::spans::RequestSpanName;

use super::{metrics, settings};

/// Scrapes are neither logged nor counted.
const UNTRACKED_PATH: &str = "/metrics";

/// Wraps each request in an `http.request` span and records its outcome.
///
/// The span carries an empty `account` field that the session middleware fills in.
#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == UNTRACKED_PATH {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let names = spans::request_span_name(&method, req.uri().path());
    let span = open_span(req, &request_id, &method, &names);

    {
        let _in_flight = metrics::InFlightRequestGuard::track();

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;
    }

    let status = request_ids::response_status_or_ok(res.status_code);

    finish(&span, &method, &names.route, status, started.elapsed());
}

fn open_span(req: &Request, request_id: &str, method: &str, names: &RequestSpanName) -> Span {
    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.route,
        remote_addr = %req.remote_addr(),
        account = field::Empty,
        status = field::Empty,
        duration_ms = field::Empty
    );

    if settings::parent_propagation()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    span
}

fn finish(span: &Span, method: &str, route: &str, status: StatusCode, elapsed: Duration) {
    let code = status.as_u16();
    let duration_ms = elapsed.as_millis();
    let threshold = settings::slow_request_threshold();

    metrics::observe_request(method, route, code, elapsed.as_secs_f64());

    span.record("status", code);
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = code, duration_ms, "request.completed");

        if status.is_server_error() {
            error!(status = code, route, "server error response");
        }

        if elapsed > threshold {
            warn!(
                route,
                duration_ms,
                threshold_ms = threshold.as_millis(),
                "slow request detected"
            );
        }
    });
}
