use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use log::debug;

use crate::models::ClientRecord;
use crate::{OmadaClient, OmadaResult};

/// A tracked network client.
///
/// Holds the latest record the controller reported for this MAC address,
/// plus the presence flag maintained by the [`DeviceTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    mac: String,
    record: ClientRecord,
    last_seen: Option<DateTime<Utc>>,
    connected: bool,
}

impl Device {
    fn new(record: ClientRecord) -> Self {
        let mut device = Device {
            mac: record.mac.clone(),
            record,
            last_seen: None,
            connected: true,
        };
        device.refresh_last_seen();
        device
    }

    fn update(&mut self, record: ClientRecord) {
        self.record = record;
        self.refresh_last_seen();
        self.connected = true;
    }

    // Records without a lastSeen field, or with the zero placeholder some
    // firmwares send, keep the previously derived timestamp.
    fn refresh_last_seen(&mut self) {
        if let Some(millis) = self.record.last_seen.filter(|&m| m != 0) {
            self.last_seen = Utc.timestamp_millis_opt(millis).single();
        }
    }

    /// Device MAC address, the stable identifier.
    pub fn mac(&self) -> &str {
        &self.mac
    }

    /// Display name, falling back to the MAC address when the controller
    /// reports none.
    pub fn name(&self) -> &str {
        self.record.name.as_deref().unwrap_or(&self.mac)
    }

    /// Primary IP address.
    pub fn ip_address(&self) -> Option<&str> {
        self.record.ip.as_deref()
    }

    /// When the controller last saw this device.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_seen
    }

    /// Whether the device appeared in the most recent successful poll.
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// The latest raw record for this device, including the wireless
    /// telemetry fields (AP name, SSID, signal level, SNR, rates, uptime).
    pub fn record(&self) -> &ClientRecord {
        &self.record
    }
}

/// In-memory presence model for the clients seen across polls.
///
/// Keyed by MAC address. A device once seen is never removed: absence from
/// a poll only means "not currently connected", so the record is kept with
/// its connectivity flag cleared. Like [`OmadaClient`], the tracker is a
/// single-owner object; the host must not run overlapping refreshes.
#[derive(Debug, Default)]
pub struct DeviceTracker {
    devices: HashMap<String, Device>,
}

impl DeviceTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// All tracked devices, keyed by MAC address.
    pub fn devices(&self) -> &HashMap<String, Device> {
        &self.devices
    }

    /// Looks up a tracked device by MAC address.
    pub fn get(&self, mac: &str) -> Option<&Device> {
        self.devices.get(mac)
    }

    /// Polls the controller and updates presence for every tracked device.
    ///
    /// Devices in the fetched list are upserted and marked connected;
    /// tracked devices absent from it are marked disconnected but retained.
    ///
    /// # Errors
    ///
    /// [`OmadaError::CannotConnect`] asks the host to retry on its next
    /// scheduled poll; [`OmadaError::LoginError`] asks it to re-authenticate
    /// first. Either way the device map is left exactly as it was, so a
    /// transient outage never erases valid presence state.
    ///
    /// [`OmadaError::CannotConnect`]: crate::OmadaError::CannotConnect
    /// [`OmadaError::LoginError`]: crate::OmadaError::LoginError
    pub async fn update_devices(&mut self, api: &OmadaClient) -> OmadaResult<()> {
        // Fetch before touching any state.
        let clients = api.clients().list_all().await?;
        debug!("poll returned {} client(s)", clients.len());

        for device in self.devices.values_mut() {
            device.connected = false;
        }
        for record in clients {
            match self.devices.get_mut(&record.mac) {
                Some(device) => device.update(record),
                None => {
                    self.devices.insert(record.mac.clone(), Device::new(record));
                }
            }
        }
        Ok(())
    }
}
