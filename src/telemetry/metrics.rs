//! Metric definitions and recording helpers
//!
//! Uses the `metrics` facade only; the embedding application installs
//! whichever recorder it wants.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use reqwest::{Method, StatusCode};
use std::time::Duration;

pub const API_REQUESTS_TOTAL: &str = "portal_api_requests_total";
pub const API_REQUEST_DURATION_SECONDS: &str = "portal_api_request_duration_seconds";
pub const NAVIGATION_REDIRECTS_TOTAL: &str = "portal_navigation_redirects_total";
pub const SESSION_TRANSITIONS_TOTAL: &str = "portal_session_transitions_total";

/// Register metric descriptions so recorders can emit HELP lines.
pub fn describe_metrics() {
    describe_counter!(API_REQUESTS_TOTAL, "Total number of API requests by method and status");
    describe_histogram!(
        API_REQUEST_DURATION_SECONDS,
        "API request duration in seconds"
    );
    describe_counter!(
        NAVIGATION_REDIRECTS_TOTAL,
        "Guard redirects issued during navigation, by target"
    );
    describe_counter!(
        SESSION_TRANSITIONS_TOTAL,
        "Session state changes (login, logout, resolved)"
    );
}

pub fn record_api_request(method: &Method, status: StatusCode, elapsed: Duration) {
    counter!(
        API_REQUESTS_TOTAL,
        "method" => method.as_str().to_string(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    histogram!(API_REQUEST_DURATION_SECONDS, "method" => method.as_str().to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_redirect(target: &str) {
    counter!(NAVIGATION_REDIRECTS_TOTAL, "target" => target.to_string()).increment(1);
}

pub fn record_session_transition(kind: &'static str) {
    counter!(SESSION_TRANSITIONS_TOTAL, "kind" => kind).increment(1);
}
