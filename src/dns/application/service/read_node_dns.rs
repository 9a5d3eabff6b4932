use super::{
    dns_projector::DnsProjector,
    node_dns_fetcher::{NodeDnsFetcher, NodeDnsSource},
};
use crate::core::domain::{
    error::{ErrorReport, ProxmoxResult},
    model::{dns_schema::FieldValidator, projected_dns::ProjectedDnsConfig},
    value_object::NodeName,
};

/// Reads the live DNS settings of `node` and projects them.
///
/// One remote read is issued per call; nothing is cached.
///
/// # Errors
/// Returns `ProxmoxError::RemoteQuery` when the read fails. In that case no
/// record is produced. Field mapping failures never surface here; they are
/// returned in the `ErrorReport` next to the (possibly partial) record.
pub async fn read_node_dns<S, V>(
    source: &S,
    validator: &V,
    node: &NodeName,
) -> ProxmoxResult<(ProjectedDnsConfig, ErrorReport)>
where
    S: NodeDnsSource + ?Sized,
    V: FieldValidator + ?Sized,
{
    let record = NodeDnsFetcher::new(source).fetch(node).await?;
    Ok(DnsProjector::new(validator).project(node, &record))
}
