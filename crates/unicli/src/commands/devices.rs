//! Device command handler.

use tabled::Tabled;
use unicli_api::{LegacyClient, LegacyDevice};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

use super::util::or_dash;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Users")]
    users: i32,
    #[tabled(rename = "Guests")]
    guests: i32,
}

impl From<&LegacyDevice> for DeviceRow {
    fn from(d: &LegacyDevice) -> Self {
        Self {
            name: device_name(d).to_owned(),
            model: or_dash(d.model.as_deref()),
            dtype: or_dash(d.device_type.as_deref()),
            ip: device_ip(d).to_owned(),
            mac: d.mac.clone(),
            users: d.num_sta.unwrap_or_default(),
            guests: d.guest_num_sta.unwrap_or_default(),
        }
    }
}

/// Configured name, else whatever the device reports about itself.
fn device_name(d: &LegacyDevice) -> &str {
    d.name.as_deref().unwrap_or_else(|| d.display_hostname())
}

fn device_ip(d: &LegacyDevice) -> &str {
    d.adopt_ip.as_deref().or(d.ip.as_deref()).unwrap_or("-")
}

/// `{name} {adopt_ip} ({num_sta} users, {guest-num_sta} guests)`
fn device_line(d: &LegacyDevice) -> String {
    format!(
        "{} {} ({} users, {} guests)",
        device_name(d),
        device_ip(d),
        d.num_sta.unwrap_or_default(),
        d.guest_num_sta.unwrap_or_default()
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &LegacyClient, format: OutputFormat) -> Result<String, CliError> {
    let devices = client.list_devices().await?;
    output::render_list(format, &devices, |d| DeviceRow::from(d), device_line)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn device(value: serde_json::Value) -> LegacyDevice {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn plain_line_reports_station_counts() {
        let d = device(json!({
            "_id": "d1",
            "mac": "f0:9f:c2:00:00:01",
            "name": "Lobby AP",
            "adopt_ip": "192.168.1.20",
            "ip": "192.168.1.21",
            "num_sta": 7,
            "user-num_sta": 5,
            "guest-num_sta": 2
        }));
        assert_eq!(device_line(&d), "Lobby AP 192.168.1.20 (7 users, 2 guests)");
    }

    #[test]
    fn plain_line_tolerates_sparse_devices() {
        let d = device(json!({
            "_id": "d2",
            "mac": "f0:9f:c2:00:00:02",
            "hostname": "usw-core",
            "ip": "192.168.1.2"
        }));
        assert_eq!(device_line(&d), "usw-core 192.168.1.2 (0 users, 0 guests)");

        let bare = device(json!({"_id": "d3", "mac": "f0:9f:c2:00:00:03"}));
        assert_eq!(device_line(&bare), "f0:9f:c2:00:00:03 - (0 users, 0 guests)");
    }

    #[test]
    fn table_row_uses_reported_fields() {
        let d = device(json!({
            "_id": "d1",
            "mac": "f0:9f:c2:00:00:01",
            "type": "uap",
            "model": "U7PG2",
            "name": "Lobby AP",
            "adopt_ip": "192.168.1.20",
            "num_sta": 3
        }));
        let row = DeviceRow::from(&d);
        assert_eq!(row.name, "Lobby AP");
        assert_eq!(row.model, "U7PG2");
        assert_eq!(row.dtype, "uap");
        assert_eq!(row.ip, "192.168.1.20");
        assert_eq!(row.users, 3);
        assert_eq!(row.guests, 0);
    }
}
