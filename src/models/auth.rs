use serde::{Deserialize, Serialize};

/// Request to log in to the Omada controller.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    /// The username to authenticate with.
    pub username: String,

    /// The password to authenticate with.
    pub password: String,
}

/// Payload of a successful login response.
#[derive(Debug, Deserialize)]
pub struct LoginResult {
    /// Session token, echoed back as the `Csrf-Token` header and `token`
    /// query parameter on every subsequent request.
    pub token: String,
}

/// Payload of the current-user endpoint.
#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    /// Privileges granted to the logged-in account.
    pub privilege: Privilege,
}

/// Site privileges of an account.
#[derive(Debug, Deserialize)]
pub struct Privilege {
    /// The sites this account may manage.
    pub sites: Vec<SiteEntry>,
}

/// One site accessible to the logged-in account.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Human-facing site name.
    pub name: String,

    /// Opaque site key, used as a URL path segment in site-scoped requests.
    pub key: String,
}
