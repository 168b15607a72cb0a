// Legacy API client (station) endpoints
//
// Client listing via stat/sta and station manager commands via cmd/stamgr:
// block, unblock, and kick (forces the client to reconnect).

use serde_json::json;
use tracing::{debug, info};

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::LegacyClientEntry;
use crate::mac::MacAddress;

/// Station manager commands accepted by `cmd/stamgr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationCommand {
    Block,
    Unblock,
    Kick,
}

impl StationCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block-sta",
            Self::Unblock => "unblock-sta",
            Self::Kick => "kick-sta",
        }
    }
}

impl LegacyClient {
    /// List all currently connected clients (stations).
    ///
    /// `GET /api/s/{site}/stat/sta`
    pub async fn list_clients(&self) -> Result<Vec<LegacyClientEntry>, Error> {
        let url = self.site_url("stat/sta")?;
        info!("Listing the active clients...");
        self.get(url).await
    }

    /// Block a client by MAC address. Returns the controller's reply verbatim.
    ///
    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "block-sta", "mac": "..."}`
    pub async fn block_client(&self, mac: &MacAddress) -> Result<String, Error> {
        info!("Blocking {mac}...");
        self.station_command(StationCommand::Block, mac).await
    }

    /// Unblock a client by MAC address. Returns the controller's reply verbatim.
    ///
    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "unblock-sta", "mac": "..."}`
    pub async fn unblock_client(&self, mac: &MacAddress) -> Result<String, Error> {
        info!("Unblocking {mac}...");
        self.station_command(StationCommand::Unblock, mac).await
    }

    /// Disconnect a client so it reconnects. Returns the controller's reply verbatim.
    ///
    /// `POST /api/s/{site}/cmd/stamgr` with `{"cmd": "kick-sta", "mac": "..."}`
    pub async fn kick_client(&self, mac: &MacAddress) -> Result<String, Error> {
        info!("Reconnecting {mac}...");
        self.station_command(StationCommand::Kick, mac).await
    }

    async fn station_command(&self, cmd: StationCommand, mac: &MacAddress) -> Result<String, Error> {
        let url = self.site_url("cmd/stamgr")?;
        debug!(mac = mac.as_str(), cmd = cmd.as_str(), "sending station command");
        self.post_raw(
            url,
            &json!({
                "cmd": cmd.as_str(),
                "mac": mac.as_str(),
            }),
        )
        .await
    }
}
