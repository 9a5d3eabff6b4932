use crate::{
    auth::application::{
        request::login_request::LoginRequest, response::login_response::LoginResponse,
    },
    core::domain::{
        error::{ProxmoxError, ProxmoxResult, ValidationError},
        model::{proxmox_auth::ProxmoxAuth, proxmox_connection::ProxmoxConnection},
        value_object::{ProxmoxCSRFToken, ProxmoxTicket, validate_csrf_token, validate_ticket},
    },
};

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::{debug, info};

/// Obtains a ticket and CSRF token from `POST /access/ticket`.
pub struct LoginService {
    default_headers: HeaderMap,
}

impl LoginService {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self { default_headers }
    }

    pub async fn execute(&self, connection: &ProxmoxConnection) -> ProxmoxResult<ProxmoxAuth> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accepts_invalid_certs())
            .build()
            .map_err(|e| ProxmoxError::Connection(e.to_string()))?;
        let url = connection.url().api_url("access/ticket");
        let request = LoginRequest {
            username: connection.username().as_str(),
            password: connection.password().as_str(),
            realm: connection.realm().as_str(),
        };

        debug!(url = %url, username = request.username, realm = request.realm, "logging in");
        let response = self.send_request(&http_client, &url, &request).await?;

        match response.status() {
            StatusCode::OK => self.handle_successful_login(response).await,
            StatusCode::UNAUTHORIZED => Err(ProxmoxError::Authentication(
                "Invalid credentials provided".to_string(),
            )),
            StatusCode::BAD_REQUEST => Err(ValidationError::Field {
                field: "request".to_string(),
                message: "Invalid request format".to_string(),
            }
            .into()),
            StatusCode::NOT_FOUND => Err(ProxmoxError::Connection(
                "Login endpoint not found".to_string(),
            )),
            StatusCode::SERVICE_UNAVAILABLE => Err(ProxmoxError::Connection(
                "Proxmox service is currently unavailable".to_string(),
            )),
            status => Err(ProxmoxError::Connection(format!(
                "Unexpected response status: {}",
                status
            ))),
        }
    }

    async fn send_request(
        &self,
        client: &Client,
        url: &str,
        request: &LoginRequest<'_>,
    ) -> ProxmoxResult<reqwest::Response> {
        client
            .post(url)
            .headers(self.default_headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ProxmoxError::Connection(e.to_string()))
    }

    async fn handle_successful_login(
        &self,
        response: reqwest::Response,
    ) -> ProxmoxResult<ProxmoxAuth> {
        let login_response = response.json::<LoginResponse>().await.map_err(|e| {
            ProxmoxError::Connection(format!("Failed to parse login response: {}", e))
        })?;

        validate_ticket(&login_response.data.ticket)?;
        validate_csrf_token(&login_response.data.csrf_token)?;
        info!("login succeeded");

        Ok(ProxmoxAuth::new(
            ProxmoxTicket::new_unchecked(login_response.data.ticket),
            Some(ProxmoxCSRFToken::new_unchecked(
                login_response.data.csrf_token,
            )),
        ))
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::create_test_connection;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    #[tokio::test]
    async fn test_login_success() {
        let mock_server = MockServer::start().await;
        let connection = create_test_connection(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .and(body_json(serde_json::json!({
                "username": "testuser",
                "password": "testpass",
                "realm": "pam"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "ticket": "PVE:testuser@pam:4EEC61E2::sig",
                    "CSRFPreventionToken": "4EEC61E2:token"
                }
            })))
            .mount(&mock_server)
            .await;

        let auth = LoginService::new().execute(&connection).await.unwrap();
        assert_eq!(auth.ticket().as_str(), "PVE:testuser@pam:4EEC61E2::sig");
        assert_eq!(auth.csrf_token().unwrap().as_str(), "4EEC61E2:token");
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let mock_server = MockServer::start().await;
        let connection = create_test_connection(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let result = LoginService::new().execute(&connection).await;
        assert!(matches!(result, Err(ProxmoxError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_login_bad_request_is_validation_error() {
        let mock_server = MockServer::start().await;
        let connection = create_test_connection(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&mock_server)
            .await;

        let result = LoginService::new().execute(&connection).await;
        assert!(matches!(result, Err(ProxmoxError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_malformed_ticket_is_rejected() {
        let mock_server = MockServer::start().await;
        let connection = create_test_connection(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/api2/json/access/ticket"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "ticket": "garbage",
                    "CSRFPreventionToken": "4EEC61E2:token"
                }
            })))
            .mount(&mock_server)
            .await;

        let result = LoginService::new().execute(&connection).await;
        assert!(matches!(
            result,
            Err(ProxmoxError::Validation(ValidationError::Format(_)))
        ));
    }

    #[tokio::test]
    async fn test_login_unreachable_endpoint() {
        // Nothing listens on the discard port.
        let connection = create_test_connection("http://127.0.0.1:9");
        let result = LoginService::new().execute(&connection).await;
        assert!(matches!(result, Err(ProxmoxError::Connection(_))));
    }
}
