//! Fixtures shared by the unit and mock-server tests.

use crate::core::domain::{
    model::{proxmox_auth::ProxmoxAuth, proxmox_connection::ProxmoxConnection},
    value_object::{
        ProxmoxCSRFToken, ProxmoxHost, ProxmoxPassword, ProxmoxPort, ProxmoxRealm, ProxmoxTicket,
        ProxmoxUrl, ProxmoxUsername,
    },
};

/// A connection pointing at `server_url` (e.g. a wiremock server).
pub(crate) fn create_test_connection(server_url: &str) -> ProxmoxConnection {
    let host = ProxmoxHost::new_unchecked(server_url.trim_start_matches("http://").to_string());
    let port = ProxmoxPort::new_unchecked(8006);
    let username = ProxmoxUsername::new_unchecked("testuser".to_string());
    let password = ProxmoxPassword::new_unchecked("testpass".to_string());
    let realm = ProxmoxRealm::new_unchecked("pam".to_string());
    let url = ProxmoxUrl::new_unchecked(server_url.trim_end_matches('/').to_string() + "/");
    ProxmoxConnection::new(host, port, username, password, realm, false, true, url)
}

pub(crate) fn create_test_auth() -> ProxmoxAuth {
    let ticket = ProxmoxTicket::new_unchecked("PVE:testuser@pam:4EEC61E2::sig".to_string());
    let csrf = ProxmoxCSRFToken::new_unchecked("4EEC61E2:token".to_string());
    ProxmoxAuth::new(ticket, Some(csrf))
}
