use log::debug;

use crate::models::{ApiResponse, ClientRecord, ClientsPage};
use crate::{OmadaClient, OmadaResult};

/// Provides methods for listing the active network clients at the sites
/// managed by the controller.
#[derive(Debug)]
pub struct ClientsApi<'a> {
    client: &'a OmadaClient,
}

impl<'a> ClientsApi<'a> {
    /// Creates a new clients API instance.
    ///
    /// This method is intended for internal use by the Omada client.
    pub(crate) fn new(client: &'a OmadaClient) -> Self {
        Self { client }
    }

    /// Lists the active clients at one site.
    ///
    /// Fetches a single page of up to 1000 active clients. Sites with more
    /// concurrent clients than that will silently miss the overflow; the
    /// controller's pagination is not walked.
    ///
    /// # Panics
    ///
    /// Panics if `site_name` is not one of the sites resolved at login.
    /// Passing an unresolved site name is a caller bug, not a recoverable
    /// condition.
    ///
    /// # Errors
    ///
    /// Returns [`OmadaError::LoginError`] when no session is established and
    /// [`OmadaError::CannotConnect`] on transport or decoding failures.
    ///
    /// [`OmadaError::LoginError`]: crate::OmadaError::LoginError
    /// [`OmadaError::CannotConnect`]: crate::OmadaError::CannotConnect
    pub async fn list_at_site(&self, site_name: &str) -> OmadaResult<Vec<ClientRecord>> {
        let (token, controller_id) = self.client.require_session()?;
        let site_key = self
            .client
            .sites()
            .get(site_name)
            .unwrap_or_else(|| panic!("unknown site {site_name:?}; sites are resolved at login"));

        let url = self
            .client
            .endpoint(&format!("/{controller_id}/api/v2/sites/{site_key}/clients"));
        let response: ApiResponse<ClientsPage> = self
            .client
            .http()
            .get(&url)
            .header("Csrf-Token", token)
            .query(&[
                ("token", token),
                ("currentPage", "1"),
                ("currentPageSize", "1000"),
                ("filters.active", "true"),
            ])
            .send()
            .await
            .map_err(|e| self.client.connect_err(e))?
            .json()
            .await
            .map_err(|e| self.client.connect_err(e))?;

        let page = response
            .into_result()
            .map_err(|msg| self.client.connect_err(msg))?;
        debug!(
            "site {site_name:?} reports {} active client(s)",
            page.data.len()
        );
        Ok(page.data)
    }

    /// Lists the active clients across every resolved site.
    ///
    /// Sites are fetched in order and the results concatenated. Any site
    /// failing aborts the whole call with that site's error; no partial
    /// list is ever returned.
    pub async fn list_all(&self) -> OmadaResult<Vec<ClientRecord>> {
        self.client.require_session()?;
        let mut clients = Vec::new();
        for site_name in self.client.sites().keys() {
            clients.extend(self.list_at_site(site_name).await?);
        }
        Ok(clients)
    }
}
