use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use log::{debug, error};
use reqwest::Client as ReqwestClient;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::api::clients::ClientsApi;
use crate::models::{ApiResponse, ControllerInfo, CurrentUser, LoginRequest, LoginResult};
use crate::{OmadaError, OmadaResult};

/// Builder for the Omada client.
///
/// This builder provides a fluent API for creating Omada clients
/// with validation at build time.
#[derive(Default)]
pub struct OmadaClientBuilder {
    controller_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    verify_ssl: bool,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    detection_time: Option<Duration>,
}

impl OmadaClientBuilder {
    /// Sets the controller URL.
    pub fn controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = Some(url.into());
        self
    }

    /// Sets the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password for authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Sets whether to verify the controller's TLS certificate.
    ///
    /// Defaults to `false`; self-hosted controllers almost universally run
    /// with a self-signed certificate.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Sets the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the detection time: how long after a client's last sighting the
    /// host should consider it away.
    ///
    /// The client only carries this value for the host; it never interprets
    /// staleness itself. Defaults to 300 seconds.
    pub fn detection_time(mut self, detection_time: Duration) -> Self {
        self.detection_time = Some(detection_time);
        self
    }

    /// Validates the configuration and builds an unauthenticated client.
    ///
    /// Call [`OmadaClient::login`] before issuing any site-scoped request.
    pub fn build(self) -> OmadaResult<OmadaClient> {
        let username = self
            .username
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| OmadaError::ConfigurationError("Username is required".into()))?;

        let password = self
            .password
            .filter(|p| !p.expose_secret().trim().is_empty())
            .ok_or_else(|| OmadaError::ConfigurationError("Password is required".into()))?;

        let base_url = self
            .controller_url
            .ok_or_else(|| OmadaError::ConfigurationError("Controller URL is required".into()))
            .and_then(|url_str| {
                Url::parse(&url_str).map_err(|e| {
                    OmadaError::ConfigurationError(format!("Invalid controller URL: {e}"))
                })
            })?;

        let timeout = self.timeout.unwrap_or(Duration::from_secs(30));

        let user_agent = self
            .user_agent
            .as_deref()
            .unwrap_or(concat!("omada-client/", env!("CARGO_PKG_VERSION")));

        let http_client = ReqwestClient::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!self.verify_ssl)
            .cookie_store(true)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                OmadaError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(OmadaClient {
            base_url,
            username,
            password,
            verify_ssl: self.verify_ssl,
            detection_time: self.detection_time.unwrap_or(Duration::from_secs(300)),
            http_client,
            token: None,
            controller_id: None,
            sites: BTreeMap::new(),
            info: None,
        })
    }
}

/// Client for the TP-Link Omada Controller API.
///
/// Owns the HTTP session, the CSRF token and the site map resolved at login.
/// Every state-mutating operation takes `&mut self`: the session is a
/// single-owner object with no internal locking, and it is not safe to run
/// overlapping refreshes against it. The host's poll scheduler is expected
/// to guarantee at most one in-flight refresh per controller instance.
pub struct OmadaClient {
    base_url: Url,
    username: String,
    password: SecretString,
    verify_ssl: bool,
    detection_time: Duration,
    http_client: ReqwestClient,
    token: Option<String>,
    controller_id: Option<String>,
    sites: BTreeMap<String, String>,
    info: Option<ControllerInfo>,
}

impl fmt::Debug for OmadaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmadaClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("verify_ssl", &self.verify_ssl)
            .field("controller_id", &self.controller_id)
            .field("sites", &self.sites)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl OmadaClient {
    /// Returns a builder for configuring a new client.
    pub fn builder() -> OmadaClientBuilder {
        OmadaClientBuilder::default()
    }

    /// Fetches controller metadata and records the controller instance id.
    ///
    /// The id is a path segment of every site-scoped URL, so this runs once
    /// before the rest of the login handshake. [`login`] calls it implicitly
    /// when the id is not yet known.
    ///
    /// # Errors
    ///
    /// Returns [`OmadaError::CannotConnect`] on any transport or decoding
    /// failure.
    ///
    /// [`login`]: OmadaClient::login
    pub async fn fetch_info(&mut self) -> OmadaResult<ControllerInfo> {
        let url = self.endpoint("/api/info");
        let response: ApiResponse<ControllerInfo> = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connect_err(e))?
            .json()
            .await
            .map_err(|e| self.connect_err(e))?;

        let info = response.into_result().map_err(|msg| self.connect_err(msg))?;
        debug!(
            "Omada controller {} is a {} running {}",
            self.base_url, info.controller_type, info.controller_version
        );
        self.controller_id = Some(info.omadac_id.clone());
        self.info = Some(info.clone());
        Ok(info)
    }

    /// Logs in to the controller and resolves the accessible sites.
    ///
    /// Posts the credentials, verifies the issued token against the
    /// login-status probe, then enumerates the sites the account may manage.
    /// The token and site map are committed only once every step has
    /// succeeded; a failure at any point leaves the previous session state
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`OmadaError::CannotConnect`] on transport or decoding
    /// failures and [`OmadaError::LoginError`] when the controller rejects
    /// the credentials (non-zero `errorCode`) or rejects the freshly issued
    /// token. A `LoginError` is not worth retrying with the same
    /// credentials.
    pub async fn login(&mut self) -> OmadaResult<()> {
        let controller_id = if let Some(id) = self.controller_id.clone() {
            id
        } else {
            self.fetch_info().await?.omadac_id
        };

        let login_url = self.endpoint("/api/v2/login");
        let login_data = LoginRequest {
            username: self.username.clone(),
            password: self.password.expose_secret().to_string(),
        };
        let response: ApiResponse<LoginResult> = self
            .http_client
            .post(&login_url)
            .json(&login_data)
            .send()
            .await
            .map_err(|e| self.connect_err(e))?
            .json()
            .await
            .map_err(|e| self.connect_err(e))?;

        if response.error_code != 0 {
            error!(
                "Omada controller {} login error - errorCode: {}",
                self.base_url, response.error_code
            );
            return Err(OmadaError::LoginError(format!(
                "errorCode {}",
                response.error_code
            )));
        }
        let token = response
            .result
            .map(|r| r.token)
            .ok_or_else(|| self.connect_err("login response has no token"))?;

        // Probe the token right away. A response that is not structured data
        // means the controller already rejected it, which is an auth failure
        // rather than a transient connection problem.
        let status_url = self.endpoint(&format!("/{controller_id}/api/v2/loginStatus"));
        let response = self
            .http_client
            .get(&status_url)
            .header("Csrf-Token", &token)
            .query(&[("token", token.as_str())])
            .send()
            .await
            .map_err(|e| self.connect_err(e))?;
        if response.json::<serde_json::Value>().await.is_err() {
            error!("Omada controller {} login error", self.base_url);
            return Err(OmadaError::LoginError(
                "session token rejected by controller".into(),
            ));
        }

        let users_url = self.endpoint(&format!("/{controller_id}/api/v2/users/current"));
        let response: ApiResponse<CurrentUser> = self
            .http_client
            .get(&users_url)
            .header("Csrf-Token", &token)
            .query(&[
                ("token", token.as_str()),
                ("currentPage", "1"),
                ("currentPageSize", "1000"),
            ])
            .send()
            .await
            .map_err(|e| self.connect_err(e))?
            .json()
            .await
            .map_err(|e| self.connect_err(e))?;
        let user = response.into_result().map_err(|msg| self.connect_err(msg))?;

        let sites: BTreeMap<String, String> = user
            .privilege
            .sites
            .into_iter()
            .map(|site| (site.name, site.key))
            .collect();
        debug!(
            "Omada controller {} login ok, {} site(s) accessible",
            self.base_url,
            sites.len()
        );

        // Commit only after the whole handshake succeeded.
        self.token = Some(token);
        self.sites = sites;
        Ok(())
    }

    /// Whether a session token and controller id are both present.
    ///
    /// Both are required before any site-scoped request; when this returns
    /// `false` the host must call [`login`](OmadaClient::login) again.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.controller_id.is_some()
    }

    /// The sites resolved at login, as a site-name to site-key map.
    pub fn sites(&self) -> &BTreeMap<String, String> {
        &self.sites
    }

    /// Controller metadata, if [`fetch_info`](OmadaClient::fetch_info) has
    /// succeeded.
    pub fn controller_info(&self) -> Option<&ControllerInfo> {
        self.info.as_ref()
    }

    /// Controller model/type string.
    pub fn model(&self) -> Option<&str> {
        self.info.as_ref().map(|i| i.controller_type.as_str())
    }

    /// Controller firmware version string.
    pub fn firmware(&self) -> Option<&str> {
        self.info.as_ref().map(|i| i.controller_version.as_str())
    }

    /// Serial number reported to the host's device registry; the controller
    /// instance id is the closest thing the API exposes.
    pub fn serial_number(&self) -> Option<&str> {
        self.controller_id.as_deref()
    }

    /// Host and port of the controller URL.
    pub fn hostname(&self) -> String {
        match (self.base_url.host_str(), self.base_url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            _ => String::new(),
        }
    }

    /// Seconds from a client's last sighting until the host should consider
    /// it away. Carried for the host; never interpreted here.
    pub fn detection_time(&self) -> Duration {
        self.detection_time
    }

    /// Gets the clients API interface.
    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi::new(self)
    }

    pub(crate) fn http(&self) -> &ReqwestClient {
        &self.http_client
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Token and controller id, or a `LoginError` telling the host to
    /// re-authenticate.
    pub(crate) fn require_session(&self) -> OmadaResult<(&str, &str)> {
        match (self.token.as_deref(), self.controller_id.as_deref()) {
            (Some(token), Some(controller_id)) => Ok((token, controller_id)),
            _ => Err(OmadaError::LoginError("not authenticated".into())),
        }
    }

    pub(crate) fn connect_err(&self, error: impl fmt::Display) -> OmadaError {
        error!("Omada controller {} error: {}", self.base_url, error);
        OmadaError::CannotConnect(error.to_string())
    }
}
