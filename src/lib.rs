//! # omada-client
//!
//! A Rust client library for the TP-Link Omada Controller API.
//!
//! This crate is the polling core of a device-tracker integration: it
//! authenticates against an Omada controller, enumerates the sites the
//! account may manage, fetches the active network clients at each site and
//! diffs successive fetches into an in-memory presence model keyed by MAC
//! address. The host platform drives the poll cadence and decides what to
//! do with the two failure kinds ([`OmadaError::CannotConnect`]: retry next
//! poll; [`OmadaError::LoginError`]: prompt for re-authentication).
//!
//! ## Example
//!
//! ```rust,no_run
//! use omada_client::{DeviceTracker, OmadaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = OmadaClient::builder()
//!         .controller_url("https://omada.example.com:8043")
//!         .username("admin")
//!         .password("hunter2")
//!         .verify_ssl(false)
//!         .build()?;
//!
//!     // Resolve the controller id, the session token and the site map.
//!     client.login().await?;
//!
//!     let mut tracker = DeviceTracker::new();
//!     tracker.update_devices(&client).await?;
//!
//!     for device in tracker.devices().values() {
//!         println!(
//!             "{} ({}) connected={}",
//!             device.name(),
//!             device.mac(),
//!             device.connected()
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
mod models;
mod tracker;

pub use api::clients::ClientsApi;
pub use client::{OmadaClient, OmadaClientBuilder};
pub use error::{OmadaError, OmadaResult};
pub use models::api_response::ApiResponse;
pub use models::auth::LoginRequest;
pub use models::clients::{ClientRecord, ClientsPage};
pub use models::info::ControllerInfo;
pub use tracker::{Device, DeviceTracker};
