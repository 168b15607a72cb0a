// ── Authenticated session ──
//
// A `Session` is one login against the controller plus the client that
// carries its cookies. Every CLI command opens one, runs a handful of
// requests through it, and closes it again.

use secrecy::SecretString;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{ControllerPlatform, PlatformSelection};
use crate::error::Error;
use crate::legacy::LegacyClient;
use crate::transport::TransportConfig;

/// Everything needed to open a session against a single controller.
///
/// Built by the CLI from flags and profiles; this crate never reads
/// configuration files.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Controller root URL (e.g., `https://127.0.0.1:8443`).
    pub url: Url,
    /// Site to operate on (defaults to "default").
    pub site: String,
    pub username: String,
    pub password: SecretString,
    /// Controller platform, or `Auto` to probe before logging in.
    pub platform: PlatformSelection,
    /// TLS, timeout, and cookie settings.
    pub transport: TransportConfig,
}

/// A logged-in connection to the controller.
pub struct Session {
    client: LegacyClient,
}

impl Session {
    /// Resolve the platform, build a cookie-carrying client, and log in.
    pub async fn connect(config: &SessionConfig) -> Result<Self, Error> {
        let platform = match config.platform.fixed() {
            Some(platform) => platform,
            None => LegacyClient::detect_platform(&config.url, &config.transport).await?,
        };
        debug!(?platform, url = %config.url, site = %config.site, "opening session");

        let client = LegacyClient::new(
            config.url.clone(),
            config.site.clone(),
            platform,
            &config.transport,
        )?;
        client.login(&config.username, &config.password).await?;

        Ok(Self { client })
    }

    /// The authenticated client.
    pub fn client(&self) -> &LegacyClient {
        &self.client
    }

    pub fn platform(&self) -> ControllerPlatform {
        self.client.platform()
    }

    /// Log out. Failures are logged and otherwise ignored: the command
    /// that used the session has already produced its output.
    pub async fn close(self) {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "logout failed (non-fatal)");
        }
    }
}
