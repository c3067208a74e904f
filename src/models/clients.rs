use serde::Deserialize;

/// One page of the site-scoped clients endpoint.
#[derive(Debug, Deserialize)]
pub struct ClientsPage {
    /// The client records on this page.
    #[serde(default)]
    pub data: Vec<ClientRecord>,
}

/// A network client as reported by the controller.
///
/// Only the fields the tracker cares about are modeled; whatever else the
/// controller sends alongside them is ignored, not an error. Everything but
/// the MAC address is optional: wired clients carry no wireless telemetry,
/// and older controller firmwares omit fields freely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// MAC address, the stable identifier for the client.
    pub mac: String,

    /// Display name, when the controller knows one.
    pub name: Option<String>,

    /// Primary IP address.
    pub ip: Option<String>,

    /// Last-seen timestamp in epoch milliseconds.
    pub last_seen: Option<i64>,

    /// Name of the access point the client is associated with.
    pub ap_name: Option<String>,

    /// SSID the client is associated with.
    pub ssid: Option<String>,

    /// Signal level in percent.
    pub signal_level: Option<i64>,

    /// Signal-to-noise ratio in dB.
    pub snr: Option<i64>,

    /// Receive rate in Kbps.
    pub rx_rate: Option<i64>,

    /// Transmit rate in Kbps.
    pub tx_rate: Option<i64>,

    /// Connection uptime in seconds.
    pub uptime: Option<i64>,
}
