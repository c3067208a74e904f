//! Data models for the Omada API.
//!
//! This module contains the various data structures used in the Omada API.

// Export submodules
pub mod api_response;
pub mod auth;
pub mod clients;
pub mod info;

pub use api_response::ApiResponse;
pub use auth::{CurrentUser, LoginRequest, LoginResult, Privilege, SiteEntry};
pub use clients::{ClientRecord, ClientsPage};
pub use info::ControllerInfo;
