pub mod dns_projector;
pub mod node_dns_fetcher;
pub mod read_node_dns;
