pub mod dns_schema;
pub mod node_dns;
pub mod projected_dns;
pub mod proxmox_auth;
pub mod proxmox_connection;
pub mod validation_config;
