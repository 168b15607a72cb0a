// Legacy API device endpoint
//
// Adopted devices (access points, switches, gateways) via stat/device.

use tracing::{debug, info};

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::LegacyDevice;

impl LegacyClient {
    /// List all devices with their station counts.
    ///
    /// `GET /api/s/{site}/stat/device`
    pub async fn list_devices(&self) -> Result<Vec<LegacyDevice>, Error> {
        let url = self.site_url("stat/device")?;
        info!("Getting devices data...");
        debug!(site = self.site(), "listing devices");
        self.get(url).await
    }
}
