//! CLI error types with miette diagnostics.
//!
//! Maps `unicli_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text and a distinct process exit code.

use miette::Diagnostic;
use thiserror::Error;

use unicli_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(unicli::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Set the address with --host / --port or in your profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: unicli_api::Error,
    },

    #[error("TLS setup or certificate verification failed: {reason}")]
    #[diagnostic(
        code(unicli::tls_error),
        help(
            "Controllers usually ship a self-signed certificate.\n\
             Use --no-verify (-k) to accept it, or set ca_cert in your profile."
        )
    )]
    TlsError { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(unicli::auth_failed),
        help(
            "Verify the account given with --user and its password.\n\
             Run: unicli config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(unicli::no_credentials),
        help(
            "Pass --password, set UNICLI_PASSWORD, or store one with:\n\
             unicli config set-password --profile {profile}"
        )
    )]
    NoCredentials { profile: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Controller error: {message}")]
    #[diagnostic(code(unicli::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unicli::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(unicli::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: unicli config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(unicli::config))]
    Config(ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request to the controller timed out")]
    #[diagnostic(
        code(unicli::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(unicli::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    #[diagnostic(code(unicli::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

/// True when any error in the chain complains about a certificate.
fn mentions_certificate(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.to_string().to_lowercase().contains("certificate") {
            return true;
        }
        current = e.source();
    }
    false
}

// ── unicli_api::Error → CliError ─────────────────────────────────────

impl From<unicli_api::Error> for CliError {
    fn from(err: unicli_api::Error) -> Self {
        use unicli_api::Error as Api;

        if err.is_timeout() {
            return Self::Timeout;
        }
        match err {
            Api::Authentication { message } => Self::AuthFailed { message },
            Api::Tls(reason) => Self::TlsError { reason },
            Api::Transport(ref e) if mentions_certificate(e) => Self::TlsError {
                reason: e.to_string(),
            },
            Api::Transport(ref e) if err.is_connect() => {
                let url = e
                    .url()
                    .map_or_else(|| "(unknown)".into(), |u| u.origin().ascii_serialization());
                Self::ConnectionFailed { url, source: err }
            }
            Api::Transport(e) => Self::ApiError {
                message: format!("request failed: {e}"),
            },
            Api::InvalidUrl(e) => Self::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },
            Api::InvalidMac(raw) => Self::Validation {
                field: "mac".into(),
                reason: format!("'{raw}' is not a MAC address"),
            },
            Api::LegacyApi { message } => Self::ApiError { message },
            Api::Deserialization { message, .. } => Self::ApiError {
                message: format!("unexpected response: {message}"),
            },
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}
