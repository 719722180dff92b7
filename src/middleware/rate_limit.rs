use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor, GovernorLayer,
};

use crate::config::Config;

pub type PeerRateLimitLayer = GovernorLayer<
    PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Per-IP token bucket refilled evenly over a minute, with the whole
/// minute's allowance available as a burst.
pub fn rate_limiter(config: &Config) -> PeerRateLimitLayer {
    let per_minute = u64::from(config.rate_limit_per_minute.max(1));

    let governor = GovernorConfigBuilder::default()
        .per_millisecond((60_000 / per_minute).max(1))
        .burst_size(per_minute as u32)
        .finish()
        .expect("rate limit period and burst size are non-zero");

    GovernorLayer::new(Arc::new(governor))
}

/// Log each request with the client address, outcome and latency.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            tracing::warn!(client_ip = %addr.ip(), %method, %path, "Rate limited")
        }
        s if s.is_client_error() || s.is_server_error() => tracing::warn!(
            client_ip = %addr.ip(),
            %method,
            %path,
            status = s.as_u16(),
            elapsed_ms,
            "Request failed"
        ),
        s => tracing::debug!(
            client_ip = %addr.ip(),
            %method,
            %path,
            status = s.as_u16(),
            elapsed_ms,
            "Request served"
        ),
    }

    response
}
