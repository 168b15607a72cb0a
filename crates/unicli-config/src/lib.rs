//! Configuration for unicli.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and the small conversions from profile strings to `unicli_api` types.
//! The CLI layers its flag overrides on top of these.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use unicli_api::{PlatformSelection, TlsMode};

/// Service name under which passwords are kept in the system keyring.
pub const KEYRING_SERVICE: &str = "unicli";

/// Environment variable consulted before the keyring and the config file.
pub const PASSWORD_ENV: &str = "UNICLI_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "plain".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named controller profile.
///
/// Every field has a default, so an empty `[profiles.x]` table describes
/// a classic controller on `127.0.0.1:8443`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Controller host name or IP address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Controller HTTPS port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Site ID used by the controller.
    #[serde(default = "default_site")]
    pub site: String,

    /// Account used to log in.
    #[serde(default = "default_username")]
    pub username: String,

    /// Plaintext password; the keyring or `UNICLI_PASSWORD` take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// "classic", "unifi-os", or "auto".
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Verify the controller's TLS certificate.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            site: default_site(),
            username: default_username(),
            password: None,
            platform: default_platform(),
            verify_tls: default_verify_tls(),
            ca_cert: None,
            timeout: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8443
}
fn default_site() -> String {
    "default".into()
}
fn default_username() -> String {
    "ubnt".into()
}
fn default_platform() -> String {
    "classic".into()
}
fn default_verify_tls() -> bool {
    true
}

impl Profile {
    /// TLS mode implied by this profile alone (no CLI overrides).
    pub fn tls_mode(&self) -> TlsMode {
        if self.verify_tls {
            self.ca_cert
                .as_ref()
                .map_or(TlsMode::System, |ca_path| TlsMode::CustomCa(ca_path.clone()))
        } else {
            TlsMode::DangerAcceptInvalid
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unicli", "unicli").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("unicli");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// `UNICLI_`-prefixed variables override file values; nested keys are
/// separated by a double underscore (`UNICLI_DEFAULTS__TIMEOUT=60`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let config: Config = file_figment(path)
        .merge(Env::prefixed("UNICLI_").split("__"))
        .extract()?;
    Ok(config)
}

/// Load the canonical config file without the environment layer.
pub fn load_file_config() -> Result<Config, ConfigError> {
    load_file_config_from(&config_path())
}

/// Load `path` without the environment layer.
///
/// Commands that write the file back start from this, so values set only
/// through `UNICLI_` variables never reach the disk. A missing file yields
/// defaults; a malformed one is an error.
pub fn load_file_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config file");

    let config: Config = file_figment(path).extract()?;
    Ok(config)
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

/// Load config, returning a default if the file doesn't exist or is unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Conversions ─────────────────────────────────────────────────────

/// Build the controller root URL, `https://{host}:{port}/`.
pub fn controller_url(host: &str, port: u16) -> Result<Url, ConfigError> {
    let host = host.trim();
    let invalid = |reason: String| ConfigError::Validation {
        field: "host".into(),
        reason,
    };

    if host.is_empty() {
        return Err(invalid("host cannot be empty".into()));
    }
    if host.contains("://") || host.contains('/') {
        return Err(invalid(format!(
            "expected a host name or address, got '{host}'"
        )));
    }

    // Bare IPv6 addresses need brackets inside a URL authority.
    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };

    Url::parse(&format!("https://{authority}:{port}/"))
        .map_err(|e| invalid(format!("'{host}': {e}")))
}

/// Parse a profile or flag platform string.
pub fn parse_platform(raw: &str) -> Result<PlatformSelection, ConfigError> {
    raw.parse().map_err(|reason| ConfigError::Validation {
        field: "platform".into(),
        reason,
    })
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
}

/// Resolve the login password for a profile.
///
/// Order: `UNICLI_PASSWORD` → system keyring → plaintext in config.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            debug!(profile = profile_name, "password found in keyring");
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}
