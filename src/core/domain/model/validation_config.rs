//! Client-side configuration: credential checks, ticket lifetime and rate limiting.

use std::time::Duration;
use zxcvbn::Score;

/// Proxmox tickets are valid for two hours; refresh a little earlier.
const DEFAULT_TICKET_LIFETIME: Duration = Duration::from_secs(110 * 60);

/// Token-bucket settings for outgoing API requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained number of requests allowed per second.
    pub requests_per_second: u32,
    /// Number of requests allowed in a burst.
    pub burst_size: u32,
}

/// Validation and transport settings applied when building a client.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Minimum zxcvbn score required for the password, if any.
    pub password_min_score: Option<Score>,
    /// Reject well-known system account names as usernames.
    pub block_reserved_usernames: bool,
    /// Resolve the API host through DNS while building the client.
    pub resolve_host: bool,
    /// Timeout for the host resolution check.
    pub resolve_timeout: Duration,
    /// Age after which a ticket is considered expired and refreshed.
    pub ticket_lifetime: Duration,
    /// Optional client-side rate limit.
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            password_min_score: None,
            block_reserved_usernames: false,
            resolve_host: false,
            resolve_timeout: Duration::from_secs(5),
            ticket_lifetime: DEFAULT_TICKET_LIFETIME,
            rate_limit: None,
        }
    }
}
