use crate::core::domain::{
    error::ValidationError,
    value_object::{ProxmoxHost, ProxmoxPort},
};
use url::Url;

const MAX_URL_LENGTH: usize = 2083;
const API_ROOT: &str = "api2/json";

/// The validated base URL of a Proxmox VE API endpoint (`scheme://host:port/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUrl(String);

impl ProxmoxUrl {
    /// Creates a new URL without validation.
    #[allow(dead_code)]
    pub(crate) fn new_unchecked(url: String) -> Self {
        Self(url)
    }

    /// Composes the base URL from its parts.
    pub(crate) fn from_parts(host: &ProxmoxHost, port: ProxmoxPort, secure: bool) -> Self {
        let scheme = if secure { "https" } else { "http" };
        Self(format!("{}://{}:{}/", scheme, host.as_str(), port.get()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the full URL of an API path, e.g. `nodes/pve1/dns`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.0.trim_end_matches('/'),
            API_ROOT,
            path.trim_start_matches('/')
        )
    }
}

/// Validates a base URL: parseable, http(s), bounded length.
pub(crate) fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let parsed =
        Url::parse(url).map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::ConstraintViolation(
            "Invalid scheme. Must be one of: http, https".to_string(),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::Format("URL has no host".to_string()));
    }

    Ok(())
}
