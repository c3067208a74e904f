use serde::Deserialize;

/// Controller metadata returned by the info endpoint.
///
/// The instance identifier doubles as a path segment in every site-scoped
/// URL, so this must be fetched before any site-scoped request is made.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControllerInfo {
    /// Controller instance identifier.
    #[serde(rename = "omadacId")]
    pub omadac_id: String,

    /// Controller model/type string.
    #[serde(rename = "type")]
    pub controller_type: String,

    /// Firmware version string.
    #[serde(rename = "controllerVer")]
    pub controller_version: String,
}
