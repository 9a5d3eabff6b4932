//! The caller-facing DNS record produced by projecting a [`NodeDnsRecord`].
//!
//! [`NodeDnsRecord`]: super::node_dns::NodeDnsRecord

use crate::core::domain::value_object::NodeName;
use serde::{Deserialize, Serialize};

/// Stable, declarative view of a node's DNS settings.
///
/// `domain` and `servers` are `None` only when assigning them was rejected;
/// the matching failure is then part of the accompanying error report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedDnsConfig {
    /// Identity key, always `"<node>_dns"`.
    pub id: String,
    /// The search domain, `""` when none is configured.
    pub domain: Option<String>,
    /// Configured nameservers in priority order, without gaps.
    pub servers: Option<Vec<String>>,
}

impl ProjectedDnsConfig {
    /// Starts a record for `node` with only its identity set.
    pub fn for_node(node: &NodeName) -> Self {
        Self {
            id: dns_record_id(node),
            domain: None,
            servers: None,
        }
    }

    /// Returns `true` when every field was assigned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.domain.is_some() && self.servers.is_some()
    }
}

/// Identity key of the DNS record of `node`.
#[must_use]
pub fn dns_record_id(node: &NodeName) -> String {
    format!("{}_dns", node.as_str())
}
