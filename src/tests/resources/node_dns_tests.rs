use crate::{
    DnsSchema, ProxmoxClient, ProxmoxError, ValidationConfig, ValidationError,
    core::infrastructure::api_client::ApiClient,
    tests::support::{create_test_auth, create_test_connection},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn create_client(mock_server: &MockServer) -> ProxmoxClient {
    let connection = create_test_connection(&mock_server.uri());
    let api_client = ApiClient::new(connection, &ValidationConfig::default()).unwrap();
    api_client.set_auth(create_test_auth()).await;
    ProxmoxClient {
        api_client,
        schema: DnsSchema::new(),
    }
}

async fn mount_dns(mock_server: &MockServer, node: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api2/json/nodes/{}/dns", node)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_node_dns_with_gap_between_servers() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server).await;
    mount_dns(
        &mock_server,
        "pve1",
        serde_json::json!({
            "search": "example.com",
            "dns1": "8.8.8.8",
            "dns3": "1.1.1.1"
        }),
    )
    .await;

    let (dns, report) = client.node_dns("pve1").await.unwrap();
    assert_eq!(dns.id, "pve1_dns");
    assert_eq!(dns.domain.as_deref(), Some("example.com"));
    assert_eq!(
        dns.servers,
        Some(vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()])
    );
    assert!(report.is_empty());
}

#[tokio::test]
async fn test_node_dns_without_any_settings() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server).await;
    mount_dns(&mock_server, "pve2", serde_json::json!({})).await;

    let (dns, report) = client.node_dns("pve2").await.unwrap();
    assert_eq!(dns.id, "pve2_dns");
    assert_eq!(dns.domain.as_deref(), Some(""));
    assert_eq!(dns.servers, Some(vec![]));
    assert!(report.is_empty());
}

#[tokio::test]
async fn test_node_dns_network_failure_is_fatal() {
    // Nothing listens on the discard port.
    let connection = create_test_connection("http://127.0.0.1:9");
    let api_client = ApiClient::new(connection, &ValidationConfig::default()).unwrap();
    api_client.set_auth(create_test_auth()).await;
    let client = ProxmoxClient {
        api_client,
        schema: DnsSchema::new(),
    };

    let result = client.node_dns("pve3").await;
    match result {
        Err(ProxmoxError::RemoteQuery { node, source }) => {
            assert_eq!(node, "pve3");
            assert!(matches!(*source, ProxmoxError::Connection(_)));
        }
        other => panic!("expected remote query error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_node_dns_unknown_node() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/ghost/dns"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such node"))
        .mount(&mock_server)
        .await;

    let result = client.node_dns("ghost").await;
    assert!(matches!(result, Err(ProxmoxError::RemoteQuery { .. })));
}

#[tokio::test]
async fn test_node_dns_malformed_payload() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server).await;
    mount_dns(&mock_server, "pve1", serde_json::json!({ "dns1": 8 })).await;

    let result = client.node_dns("pve1").await;
    assert!(matches!(
        result,
        Err(ProxmoxError::RemoteQuery { source, .. }) if matches!(*source, ProxmoxError::Connection(_))
    ));
}

#[tokio::test]
async fn test_node_dns_rejects_invalid_node_name_without_request() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    assert!(matches!(
        client.node_dns("").await,
        Err(ProxmoxError::Validation(ValidationError::Field { .. }))
    ));
    assert!(matches!(
        client.node_dns("pve1/../cluster").await,
        Err(ProxmoxError::Validation(_))
    ));
}

#[tokio::test]
async fn test_node_dns_is_read_fresh_and_stable() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/dns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "search": "lan", "dns2": "192.168.1.1" }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let (first, _) = client.node_dns("pve1").await.unwrap();
    let (second, _) = client.node_dns("pve1").await.unwrap();
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn test_node_dns_record_keeps_sparse_fields() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server).await;
    mount_dns(
        &mock_server,
        "pve1",
        serde_json::json!({ "search": "", "dns2": "9.9.9.9" }),
    )
    .await;

    let record = client.node_dns_record("pve1").await.unwrap();
    assert_eq!(record.search_domain.as_deref(), Some(""));
    assert_eq!(record.server1, None);
    assert_eq!(record.server2.as_deref(), Some("9.9.9.9"));
    assert_eq!(record.server3, None);
}

#[tokio::test]
async fn test_node_dns_unauthorized_triggers_refresh() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/dns"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api2/json/access/ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "ticket": "PVE:testuser@pam:4EEC61E2::refreshed",
                "CSRFPreventionToken": "4EEC61E2:newtoken"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_dns(
        &mock_server,
        "pve1",
        serde_json::json!({ "search": "example.com", "dns1": "8.8.8.8" }),
    )
    .await;

    let (dns, report) = client.node_dns("pve1").await.unwrap();
    assert_eq!(dns.domain.as_deref(), Some("example.com"));
    assert_eq!(dns.servers, Some(vec!["8.8.8.8".to_string()]));
    assert!(report.is_empty());
    assert_eq!(
        client.auth_token().await.unwrap().as_str(),
        "PVE:testuser@pam:4EEC61E2::refreshed"
    );
}
