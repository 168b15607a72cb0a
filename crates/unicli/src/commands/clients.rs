//! Client (station) command handlers: listing, block, unblock, reconnect.

use std::collections::HashMap;

use tabled::Tabled;
use unicli_api::{LegacyClient, LegacyClientEntry, MacAddress};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

use super::util::{self, or_dash};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Vendor")]
    oui: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "AP")]
    ap: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Guest")]
    guest: String,
}

impl ClientRow {
    fn new(c: &LegacyClientEntry, hostnames: &HashMap<&str, &str>) -> Self {
        Self {
            hostname: c.display_name().to_owned(),
            mac: c.mac.clone(),
            oui: c.oui.clone().unwrap_or_default(),
            ip: or_dash(c.ip.as_deref()),
            ap: util::ap_label(c, hostnames).to_owned(),
            channel: or_dash(c.channel),
            signal: c.signal.map_or_else(|| "-".into(), |s| format!("{s} dBm")),
            guest: if c.is_guest() { "yes" } else { "" }.into(),
        }
    }
}

/// `{hostname} ({mac} {oui}) AP: {ap}, CH: {channel}, SG: {signal}dBm`, plus ` guest`.
fn client_line(c: &LegacyClientEntry, hostnames: &HashMap<&str, &str>) -> String {
    let mut line = format!(
        "{} ({} {}) AP: {}, CH: {}, SG: {}dBm",
        c.display_name(),
        c.mac,
        c.oui.as_deref().unwrap_or_default(),
        util::ap_label(c, hostnames),
        or_dash(c.channel),
        or_dash(c.signal),
    );
    if c.is_guest() {
        line.push_str(" guest");
    }
    line
}

// ── Handlers ────────────────────────────────────────────────────────

/// List active clients, naming each one's AP from the device list.
pub async fn list(client: &LegacyClient, format: OutputFormat) -> Result<String, CliError> {
    let devices = client.list_devices().await?;
    let stations = client.list_clients().await?;
    let hostnames = util::device_hostnames(&devices);
    output::render_list(
        format,
        &stations,
        |c| ClientRow::new(c, &hostnames),
        |c| client_line(c, &hostnames),
    )
}

/// Station manager actions on a single client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationAction {
    Block,
    Unblock,
    Reconnect,
}

/// Run a station action and render the controller's reply.
pub async fn station(
    client: &LegacyClient,
    action: StationAction,
    mac: &MacAddress,
    format: OutputFormat,
) -> Result<String, CliError> {
    let reply = match action {
        StationAction::Block => client.block_client(mac).await?,
        StationAction::Unblock => client.unblock_client(mac).await?,
        StationAction::Reconnect => client.kick_client(mac).await?,
    };
    output::render_reply(format, &reply)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use unicli_api::LegacyDevice;

    use super::*;

    fn fixtures() -> (Vec<LegacyDevice>, Vec<LegacyClientEntry>) {
        let devices = serde_json::from_value(json!([
            {"_id": "d1", "mac": "f0:9f:c2:00:00:01", "hostname": "ap-lobby"}
        ]))
        .unwrap();
        let clients = serde_json::from_value(json!([
            {
                "_id": "c1",
                "mac": "00:11:22:33:44:55",
                "hostname": "laptop",
                "oui": "Apple",
                "ap_mac": "f0:9f:c2:00:00:01",
                "channel": 36,
                "signal": -58,
                "is_guest": false
            },
            {
                "_id": "c2",
                "mac": "66:77:88:99:aa:bb",
                "name": "visitor phone",
                "oui": "Samsung",
                "ap_mac": "f0:9f:c2:00:00:09",
                "channel": 6,
                "signal": -71,
                "is_guest": true
            },
            {
                "_id": "c3",
                "mac": "cc:dd:ee:ff:00:11",
                "is_wired": true
            }
        ]))
        .unwrap();
        (devices, clients)
    }

    #[test]
    fn plain_lines_match_classic_format() {
        let (devices, clients) = fixtures();
        let hostnames = util::device_hostnames(&devices);
        let lines: Vec<_> = clients.iter().map(|c| client_line(c, &hostnames)).collect();
        assert_eq!(
            lines,
            vec![
                "laptop (00:11:22:33:44:55 Apple) AP: ap-lobby, CH: 36, SG: -58dBm",
                "visitor phone (66:77:88:99:aa:bb Samsung) AP: f0:9f:c2:00:00:09, CH: 6, SG: -71dBm guest",
                "No hostname (cc:dd:ee:ff:00:11 ) AP: -, CH: -, SG: -dBm",
            ]
        );
    }

    #[test]
    fn table_row_formats_signal_and_guest() {
        let (devices, clients) = fixtures();
        let hostnames = util::device_hostnames(&devices);

        let row = ClientRow::new(&clients[1], &hostnames);
        assert_eq!(row.hostname, "visitor phone");
        assert_eq!(row.signal, "-71 dBm");
        assert_eq!(row.guest, "yes");

        let wired = ClientRow::new(&clients[2], &hostnames);
        assert_eq!(wired.ap, "-");
        assert_eq!(wired.signal, "-");
        assert_eq!(wired.guest, "");
    }
}
