//! Internal HTTP client that handles authentication and automatic ticket refresh.

use crate::{
    auth::application::service::login_service::LoginService,
    core::domain::{
        error::{ProxmoxError, ProxmoxResult, ValidationError},
        model::{
            proxmox_auth::ProxmoxAuth, proxmox_connection::ProxmoxConnection,
            validation_config::{RateLimitConfig, ValidationConfig},
        },
    },
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Every Proxmox API response wraps its payload in a `data` member.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    data: T,
}

/// Internal HTTP client that manages authentication and provides methods to call the Proxmox API.
///
/// This client adds the authentication headers (`PVEAuthCookie` and
/// `CSRFPreventionToken`) to each request. If a request receives a `401 Unauthorized` response,
/// it refreshes the ticket once using the stored credentials and retries the request.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<ProxmoxConnection>,
    auth: Arc<RwLock<Option<ProxmoxAuth>>>,
    ticket_lifetime: Duration,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

fn build_rate_limiter(rl: RateLimitConfig) -> ProxmoxResult<DefaultDirectRateLimiter> {
    let per_second = NonZeroU32::new(rl.requests_per_second).ok_or_else(|| {
        ValidationError::Field {
            field: "rate_limit.requests_per_second".to_string(),
            message: "Rate limit must allow at least one request per second".to_string(),
        }
    })?;
    let burst = NonZeroU32::new(rl.burst_size).ok_or_else(|| ValidationError::Field {
        field: "rate_limit.burst_size".to_string(),
        message: "Burst size must be at least 1".to_string(),
    })?;
    Ok(DefaultDirectRateLimiter::direct(
        Quota::per_second(per_second).allow_burst(burst),
    ))
}

impl ApiClient {
    /// Creates a new `ApiClient`. The client starts unauthenticated.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Connection` if the HTTP client cannot be built, or
    /// `ProxmoxError::Validation` if the rate limit is zero.
    pub fn new(connection: ProxmoxConnection, config: &ValidationConfig) -> ProxmoxResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accepts_invalid_certs())
            .build()
            .map_err(|e| ProxmoxError::Connection(e.to_string()))?;

        let rate_limiter = config
            .rate_limit
            .map(build_rate_limiter)
            .transpose()?
            .map(Arc::new);

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            auth: Arc::new(RwLock::new(None)),
            ticket_lifetime: config.ticket_lifetime,
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    #[allow(dead_code)]
    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }

    /// Sets the authentication state (used after a successful login).
    pub async fn set_auth(&self, auth: ProxmoxAuth) {
        *self.auth.write().await = Some(auth);
    }

    /// Returns the current authentication state, if any.
    pub async fn auth(&self) -> Option<ProxmoxAuth> {
        self.auth.read().await.clone()
    }

    /// Returns `true` if there is a valid (non-expired) ticket.
    pub async fn is_authenticated(&self) -> bool {
        self.auth
            .read()
            .await
            .as_ref()
            .is_some_and(|a| !a.ticket().is_expired(self.ticket_lifetime))
    }

    /// Performs an authenticated GET request and unwraps the `data` envelope.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the request fails, authentication cannot be refreshed,
    /// or the response cannot be parsed.
    pub async fn get<T>(&self, path: &str) -> ProxmoxResult<T>
    where
        T: DeserializeOwned,
    {
        self.ensure_authenticated().await?;

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.connection.url().api_url(path);
        debug!(url = %url, "GET request");

        let response = self
            .authorize(self.http_client.get(&url))
            .await
            .send()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("HTTP request failed: {}", e)))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "ticket rejected, logging in again");
            self.refresh_auth().await?;
            return self.retry_get(&url).await;
        }

        Self::parse_response(response, "").await
    }

    /// Retries a GET after a successful ticket refresh, exactly once.
    async fn retry_get<T>(&self, url: &str) -> ProxmoxResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.http_client.get(url))
            .await
            .send()
            .await
            .map_err(|e| {
                ProxmoxError::Connection(format!("HTTP request failed on retry: {}", e))
            })?;

        Self::parse_response(response, " after refresh").await
    }

    /// Adds the ticket cookie and CSRF header of the current session, if any.
    async fn authorize(&self, req_builder: RequestBuilder) -> RequestBuilder {
        let auth_guard = self.auth.read().await;
        let Some(auth) = auth_guard.as_ref() else {
            return req_builder;
        };
        let req_builder = req_builder.header("Cookie", auth.ticket().as_cookie_header());
        match auth.csrf_token() {
            Some(token) => req_builder.header("CSRFPreventionToken", token.as_str()),
            None => req_builder,
        }
    }

    async fn parse_response<T>(response: Response, context: &str) -> ProxmoxResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(ProxmoxError::Connection(format!(
                "API error{} ({}): {}",
                context, status, error_text
            )));
        }

        response
            .json::<ApiResponse<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| {
                ProxmoxError::Connection(format!("Failed to parse response{}: {}", context, e))
            })
    }

    /// Ensures that we have a valid (non-expired) ticket. If not, logs in again.
    async fn ensure_authenticated(&self) -> ProxmoxResult<()> {
        if !self.is_authenticated().await {
            self.refresh_auth().await?;
        }
        Ok(())
    }

    /// Performs a fresh login using the stored credentials to obtain a new ticket.
    pub(crate) async fn refresh_auth(&self) -> ProxmoxResult<()> {
        let auth = LoginService::new().execute(&self.connection).await?;
        self.set_auth(auth).await;
        Ok(())
    }
}
