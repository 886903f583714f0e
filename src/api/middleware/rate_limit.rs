//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

const PER_SECOND: u64 = 10;
const BURST_SIZE: u32 = 100;

/// Applies per-client rate limiting to a router.
///
/// # Limits
///
/// - **Rate**: 10 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - `behind_proxy = false`: client IP is the socket peer address
/// - `behind_proxy = true`: client IP is read from `X-Forwarded-For`,
///   `X-Real-IP` or `Forwarded`, falling back to the peer address
///
/// The server must be started with `into_make_service_with_connect_info`
/// so the peer address is available.
///
/// # Example
///
/// ```rust,ignore
/// let api = rate_limit::apply(api_routes(), config.behind_proxy);
/// ```
pub fn apply(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(layer(SmartIpKeyExtractor))
    } else {
        router.layer(layer(PeerIpKeyExtractor))
    }
}

fn layer<K>(key_extractor: K) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
