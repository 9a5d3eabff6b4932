//! Domain model for node DNS settings from the `/nodes/{node}/dns` endpoint.
//!
//! Every field is optional: a key missing from the response (or `null`) means
//! the setting is not configured, which is distinct from an empty string.

use serde::{Deserialize, Serialize};

/// DNS settings of a Proxmox node as reported by the API.
///
/// Returned by the `/api2/json/nodes/{node}/dns` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeDnsRecord {
    /// DNS search domain (e.g., "example.com").
    #[serde(rename = "search", default, skip_serializing_if = "Option::is_none")]
    pub search_domain: Option<String>,
    /// First nameserver.
    #[serde(rename = "dns1", default, skip_serializing_if = "Option::is_none")]
    pub server1: Option<String>,
    /// Second nameserver.
    #[serde(rename = "dns2", default, skip_serializing_if = "Option::is_none")]
    pub server2: Option<String>,
    /// Third nameserver.
    #[serde(rename = "dns3", default, skip_serializing_if = "Option::is_none")]
    pub server3: Option<String>,
}

impl NodeDnsRecord {
    /// The three nameserver slots in priority order.
    #[must_use]
    pub fn server_slots(&self) -> [Option<&str>; 3] {
        [
            self.server1.as_deref(),
            self.server2.as_deref(),
            self.server3.as_deref(),
        ]
    }
}
