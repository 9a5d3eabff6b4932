//! Reads the DNS settings of one node and prints the projected record.
//!
//! Every field that could not be set is printed as well, all at once.

use proxmox_node_dns::{ProxmoxClient, ProxmoxResult};

#[tokio::main]
async fn main() -> ProxmoxResult<()> {
    let host = "192.168.1.182";
    let port: u16 = 8006;
    let username = "leeca";
    let password = "password";
    let realm = "pam";
    let node = "pve";

    let client = ProxmoxClient::builder()
        .host(host)?
        .port(port)?
        .credentials(username, password, realm)?
        .secure(true)
        .accept_invalid_certs(true) // Testing & self-signed certs
        .build()
        .await?;

    client.login().await?;
    println!("Authenticated successfully");

    let (dns, report) = client.node_dns(node).await?;

    println!("\nDNS settings of node '{}' ({}):", node, dns.id);
    match &dns.domain {
        Some(domain) if domain.is_empty() => println!("  Search domain: (none)"),
        Some(domain) => println!("  Search domain: {}", domain),
        None => println!("  Search domain: (not set)"),
    }
    match &dns.servers {
        Some(servers) if servers.is_empty() => println!("  Nameservers: (none)"),
        Some(servers) => {
            for (priority, server) in servers.iter().enumerate() {
                println!("  Nameserver {}: {}", priority + 1, server);
            }
        }
        None => println!("  Nameservers: (not set)"),
    }

    if !report.is_empty() {
        eprintln!("\n{}", report);
    }

    Ok(())
}
