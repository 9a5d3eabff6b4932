//! Read-only resolver for the DNS settings of Proxmox VE nodes.
//!
//! A call fetches the live settings of one node and projects them into a
//! [`ProjectedDnsConfig`]: a deterministic `"<node>_dns"` id, the search
//! domain (`""` when unset), and the configured nameservers in slot order.
//! Field assignments that the [`DnsSchema`] rejects are gathered into an
//! [`ErrorReport`] returned next to the partial record.

mod auth;
mod core;
mod dns;

#[cfg(test)]
mod tests;

pub use crate::core::domain::{
    error::{ErrorReport, FieldMappingError, ProxmoxError, ProxmoxResult, ValidationError},
    model::{
        dns_schema::{
            Attribute, AttributeKind, AttributeMode, DnsSchema, FieldValidator, FieldValue,
        },
        node_dns::NodeDnsRecord,
        projected_dns::{ProjectedDnsConfig, dns_record_id},
        validation_config::{RateLimitConfig, ValidationConfig},
    },
    value_object::{NodeName, ProxmoxCSRFToken, ProxmoxTicket},
};
pub use crate::dns::application::service::{
    node_dns_fetcher::NodeDnsSource, read_node_dns::read_node_dns,
};

use crate::dns::application::service::node_dns_fetcher::NodeDnsFetcher;

use crate::core::{
    domain::{
        model::proxmox_connection::ProxmoxConnection,
        value_object::{
            DEFAULT_PROXMOX_PORT, ProxmoxHost, ProxmoxPassword, ProxmoxPort, ProxmoxRealm,
            ProxmoxUrl, ProxmoxUsername, resolve_host, validate_host, validate_password,
            validate_port, validate_realm, validate_url, validate_username,
        },
    },
    infrastructure::api_client::ApiClient,
};
use tracing::debug;

/// A Client for reading node DNS settings from the Proxmox VE API
///
/// # Examples
///
/// ```no_run
/// use proxmox_node_dns::{ProxmoxClient, ProxmoxResult};
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let client = ProxmoxClient::builder()
///         .host("proxmox.example.com")?
///         .port(8006)?
///         .credentials("user", "password", "pve")?
///         .secure(true)
///         .build()
///         .await?;
///
///     client.login().await?;
///     let (dns, report) = client.node_dns("pve1").await?;
///     println!("{}: {:?} {:?}", dns.id, dns.domain, dns.servers);
///     for error in &report {
///         eprintln!("{}", error);
///     }
///     Ok(())
/// }
/// ```
pub struct ProxmoxClient {
    api_client: ApiClient,
    schema: DnsSchema,
}

/// Builder for ProxmoxClient configuration
#[derive(Debug, Default)]
pub struct ProxmoxClientBuilder {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    realm: Option<String>,
    secure: bool,
    accept_invalid_certs: bool,
    config: ValidationConfig,
}

fn required(value: Option<String>, field: &str) -> ProxmoxResult<String> {
    value.ok_or_else(|| {
        ValidationError::Field {
            field: field.to_string(),
            message: format!("{} is required", field),
        }
        .into()
    })
}

impl ProxmoxClientBuilder {
    pub fn host(mut self, host: impl Into<String>) -> ProxmoxResult<Self> {
        let host = host.into();
        validate_host(&host)?;
        self.host = Some(host);
        Ok(self)
    }

    pub fn port(mut self, port: u16) -> ProxmoxResult<Self> {
        validate_port(port)?;
        self.port = Some(port);
        Ok(self)
    }

    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        realm: impl Into<String>,
    ) -> ProxmoxResult<Self> {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self.realm = Some(realm.into());
        Ok(self)
    }

    /// Use HTTPS (`true`) or plain HTTP (`false`).
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Skip TLS certificate verification, for self-signed setups.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn validation_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn build(self) -> ProxmoxResult<ProxmoxClient> {
        let host = required(self.host, "host")?;
        let port = self.port.unwrap_or(DEFAULT_PROXMOX_PORT);
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;
        let realm = required(self.realm, "realm")?;

        validate_username(&username, self.config.block_reserved_usernames)?;
        validate_password(&password, self.config.password_min_score)?;
        validate_realm(&realm)?;
        if self.config.resolve_host {
            resolve_host(&host, port, self.config.resolve_timeout).await?;
        }

        let host = ProxmoxHost::new_unchecked(host);
        let port = ProxmoxPort::new_unchecked(port);
        let url = ProxmoxUrl::from_parts(&host, port, self.secure);
        validate_url(url.as_str())?;
        debug!(url = url.as_str(), "building Proxmox client");

        let connection = ProxmoxConnection::new(
            host,
            port,
            ProxmoxUsername::new_unchecked(username),
            ProxmoxPassword::new_unchecked(password),
            ProxmoxRealm::new_unchecked(realm),
            self.secure,
            self.accept_invalid_certs,
            url,
        );

        Ok(ProxmoxClient {
            api_client: ApiClient::new(connection, &self.config)?,
            schema: DnsSchema::new(),
        })
    }
}

impl ProxmoxClient {
    /// Creates a new builder for ProxmoxClient configuration
    pub fn builder() -> ProxmoxClientBuilder {
        ProxmoxClientBuilder::default()
    }

    /// Authenticates with the Proxmox server
    ///
    /// Logging in up front is optional: requests log in on demand and refresh
    /// the ticket once it expires or is rejected.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The credentials are invalid
    /// - The server is unreachable
    /// - The response format is invalid
    pub async fn login(&self) -> ProxmoxResult<()> {
        self.api_client.refresh_auth().await
    }

    /// Returns true if the client holds a non-expired ticket
    pub async fn is_authenticated(&self) -> bool {
        self.api_client.is_authenticated().await
    }

    /// Returns the current authentication ticket if authenticated
    pub async fn auth_token(&self) -> Option<ProxmoxTicket> {
        self.api_client.auth().await.map(|auth| auth.ticket().clone())
    }

    /// Returns the current CSRF token if authenticated
    pub async fn csrf_token(&self) -> Option<ProxmoxCSRFToken> {
        self.api_client
            .auth()
            .await
            .and_then(|auth| auth.csrf_token().cloned())
    }

    /// The schema the projected records are checked against.
    pub fn schema(&self) -> &DnsSchema {
        &self.schema
    }

    /// Reads the DNS settings of `node` as reported by the API, unprojected.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Validation` for an invalid node name and
    /// `ProxmoxError::RemoteQuery` when the read fails.
    pub async fn node_dns_record(&self, node: &str) -> ProxmoxResult<NodeDnsRecord> {
        let node = NodeName::new(node)?;
        NodeDnsFetcher::new(&self.api_client).fetch(&node).await
    }

    /// Reads the DNS settings of `node` and projects them.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Validation` for an invalid node name and
    /// `ProxmoxError::RemoteQuery` when the read fails. Field mapping failures
    /// are returned in the `ErrorReport` instead.
    pub async fn node_dns(&self, node: &str) -> ProxmoxResult<(ProjectedDnsConfig, ErrorReport)> {
        let node = NodeName::new(node)?;
        read_node_dns(&self.api_client, &self.schema, &node).await
    }
}
