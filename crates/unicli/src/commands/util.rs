//! Shared helpers for command handlers.

use std::collections::HashMap;

use unicli_api::{LegacyClientEntry, LegacyDevice};

/// Map each device MAC to the name it is known by.
pub fn device_hostnames(devices: &[LegacyDevice]) -> HashMap<&str, &str> {
    devices
        .iter()
        .map(|d| (d.mac.as_str(), d.display_hostname()))
        .collect()
}

/// Label for the access point a client is associated with.
///
/// Known APs show their hostname, unknown ones their raw MAC, and wired
/// clients (no `ap_mac`) a dash.
pub fn ap_label<'a>(client: &'a LegacyClientEntry, hostnames: &HashMap<&str, &'a str>) -> &'a str {
    match client.ap_mac.as_deref() {
        Some(ap_mac) => hostnames.get(ap_mac).copied().unwrap_or(ap_mac),
        None => "-",
    }
}

/// Display an optional value, or a dash when it is absent.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}
