use crate::core::{
    domain::{error::ProxmoxResult, model::node_dns::NodeDnsRecord, value_object::NodeName},
    infrastructure::api_client::ApiClient,
};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Anything able to read the DNS settings of a node.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NodeDnsSource: Send + Sync {
    /// Reads the DNS settings currently applied to `node`.
    async fn get_dns(&self, node: &NodeName) -> ProxmoxResult<NodeDnsRecord>;
}

#[async_trait]
impl NodeDnsSource for ApiClient {
    async fn get_dns(&self, node: &NodeName) -> ProxmoxResult<NodeDnsRecord> {
        self.get(&format!("nodes/{}/dns", node)).await
    }
}

/// Issues a single DNS read for a node and classifies its failure.
pub struct NodeDnsFetcher<'a, S: NodeDnsSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: NodeDnsSource + ?Sized> NodeDnsFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Returns the record exactly as reported by the source.
    ///
    /// # Errors
    /// Any failure of the source is returned as `ProxmoxError::RemoteQuery`.
    /// Nothing is retried here.
    pub async fn fetch(&self, node: &NodeName) -> ProxmoxResult<NodeDnsRecord> {
        debug!(node = %node, "fetching node DNS settings");
        self.source.get_dns(node).await.map_err(|e| {
            warn!(node = %node, error = %e, "node DNS query failed");
            e.into_remote_query(node.as_str())
        })
    }
}
