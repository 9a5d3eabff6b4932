use crate::core::domain::{
    error::ErrorReport,
    model::{
        dns_schema::{DOMAIN, FieldValidator, FieldValue, SERVERS},
        node_dns::NodeDnsRecord,
        projected_dns::ProjectedDnsConfig,
    },
    value_object::NodeName,
};
use tracing::warn;

/// Maps a sparse [`NodeDnsRecord`] into a [`ProjectedDnsConfig`].
///
/// Every field assignment is checked by the validator on its own. A rejected
/// assignment leaves that field unset and lands in the returned
/// [`ErrorReport`]; the remaining fields are still attempted.
pub struct DnsProjector<'a, V: FieldValidator + ?Sized> {
    validator: &'a V,
}

impl<'a, V: FieldValidator + ?Sized> DnsProjector<'a, V> {
    pub fn new(validator: &'a V) -> Self {
        Self { validator }
    }

    pub fn project(
        &self,
        node: &NodeName,
        record: &NodeDnsRecord,
    ) -> (ProjectedDnsConfig, ErrorReport) {
        // Identity first, so a partial record stays addressable.
        let mut config = ProjectedDnsConfig::for_node(node);
        let mut report = ErrorReport::new();

        let domain = record.search_domain.clone().unwrap_or_default();
        let outcome = self.validator.validate(DOMAIN, FieldValue::String(&domain));
        if report.record(DOMAIN, outcome) {
            config.domain = Some(domain);
        }

        let servers = collect_servers(record);
        let outcome = self
            .validator
            .validate(SERVERS, FieldValue::StringList(&servers));
        if report.record(SERVERS, outcome) {
            config.servers = Some(servers);
        }

        for entry in &report {
            warn!(node = %node, field = entry.field(), error = %entry.cause(), "field mapping failed");
        }

        (config, report)
    }
}

/// Present nameserver slots in slot order; absent slots are skipped.
fn collect_servers(record: &NodeDnsRecord) -> Vec<String> {
    record
        .server_slots()
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}
