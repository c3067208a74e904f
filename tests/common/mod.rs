use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use omada_client::OmadaClient;

pub const CONTROLLER_ID: &str = "c0ffee42";
pub const TOKEN: &str = "test-token";

/// Mounts the controller info endpoint.
#[allow(dead_code)]
pub async fn setup_info(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": 0,
            "result": {
                "omadacId": CONTROLLER_ID,
                "type": "Omada Controller",
                "controllerVer": "5.9.31"
            }
        })))
        .mount(mock_server)
        .await;
}

/// Mounts the login handshake: credentials post, login-status probe and the
/// current-user endpoint resolving the given `(name, key)` sites.
#[allow(dead_code)]
pub async fn setup_login(mock_server: &MockServer, sites: &[(&str, &str)]) {
    Mock::given(method("POST"))
        .and(path("/api/v2/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": 0,
            "result": { "token": TOKEN }
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/{CONTROLLER_ID}/api/v2/loginStatus")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": 0,
            "result": { "login": true }
        })))
        .mount(mock_server)
        .await;

    let site_entries: Vec<_> = sites
        .iter()
        .map(|(name, key)| json!({ "name": name, "key": key }))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/{CONTROLLER_ID}/api/v2/users/current")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": 0,
            "result": { "privilege": { "sites": site_entries } }
        })))
        .mount(mock_server)
        .await;
}

/// Mounts the active-clients endpoint for one site key.
#[allow(dead_code)]
pub async fn setup_clients(mock_server: &MockServer, site_key: &str, clients: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/{CONTROLLER_ID}/api/v2/sites/{site_key}/clients"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": 0,
            "result": { "totalRows": clients.as_array().map_or(0, Vec::len), "data": clients }
        })))
        .mount(mock_server)
        .await;
}

/// Builds a client against the mock server without logging in.
#[allow(dead_code)]
pub fn build_test_client(mock_server_uri: &str) -> OmadaClient {
    OmadaClient::builder()
        .controller_url(mock_server_uri)
        .username("test-user")
        .password("test-password")
        .build()
        .expect("Failed to build OmadaClient")
}

/// Builds a client against the mock server and logs it in.
#[allow(dead_code)]
pub async fn setup_test_client(mock_server_uri: &str) -> OmadaClient {
    let mut client = build_test_client(mock_server_uri);
    client.login().await.expect("Failed to log in");
    client
}
