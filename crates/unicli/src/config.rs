//! CLI configuration: thin layer over `unicli_config`.
//!
//! Re-exports the shared types and resolves `GlobalOpts` flag overrides
//! on top of the selected profile into a `SessionConfig`.

use std::io::IsTerminal;
use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;
use tracing::debug;

use unicli_api::{PlatformSelection, SessionConfig, TlsMode, TransportConfig};
use unicli_config::ConfigError;

use crate::cli::{GlobalOpts, OutputFormat, Platform};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use unicli_config::{
    Config, Profile, config_path, load_config, load_config_or_default, load_file_config,
    save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names, for "not found" diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// The selected profile.
///
/// An explicitly requested profile must exist. Otherwise a missing entry
/// falls back to the built-in defaults so a bare `unicli --host ...` works
/// without any config file.
fn select_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    match config.profiles.get(&name) {
        Some(profile) => Ok((name, profile.clone())),
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            available: available_profiles(config),
            name,
        }),
        None => {
            debug!(profile = %name, "profile not configured, using defaults");
            Ok((name, Profile::default()))
        }
    }
}

/// Output format: flag/env, else `defaults.output` from the config file.
pub fn output_format(global: &GlobalOpts, config: &Config) -> Result<OutputFormat, CliError> {
    match global.output {
        Some(format) => Ok(format),
        None => OutputFormat::from_str(&config.defaults.output, true).map_err(|reason| {
            CliError::Validation {
                field: "defaults.output".into(),
                reason,
            }
        }),
    }
}

fn platform_selection(platform: Platform) -> PlatformSelection {
    match platform {
        Platform::Classic => PlatformSelection::Classic,
        Platform::UnifiOs => PlatformSelection::UnifiOs,
        Platform::Auto => PlatformSelection::Auto,
    }
}

/// Translate the selected profile + global flags into a `SessionConfig`.
///
/// CLI flag overrides take priority over profile values, which take
/// priority over built-in defaults.
pub fn resolve_session(global: &GlobalOpts, config: &Config) -> Result<SessionConfig, CliError> {
    let (profile_name, profile) = select_profile(global, config)?;

    // 1. Controller URL
    let host = global.host.as_deref().unwrap_or(&profile.host);
    let port = global.port.unwrap_or(profile.port);
    let url = unicli_config::controller_url(host, port)?;

    // 2. Platform
    let platform = match global.platform {
        Some(platform) => platform_selection(platform),
        None => unicli_config::parse_platform(&profile.platform)?,
    };

    // 3. TLS verification
    let tls = if global.verify {
        profile
            .ca_cert
            .clone()
            .map_or(TlsMode::System, TlsMode::CustomCa)
    } else if global.no_verify {
        TlsMode::DangerAcceptInvalid
    } else {
        profile.tls_mode()
    };

    // 4. Timeout
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);
    if timeout == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }

    // 5. Credentials
    let username = global.user.clone().unwrap_or_else(|| profile.username.clone());
    let password = resolve_password(global, &profile, &profile_name)?;

    Ok(SessionConfig {
        url,
        site: global.site.clone().unwrap_or(profile.site),
        username,
        password,
        platform,
        transport: TransportConfig {
            tls,
            timeout: Duration::from_secs(timeout),
            cookie_jar: None,
        },
    })
}

/// Password: flag/env → keyring → profile plaintext → interactive prompt.
fn resolve_password(
    global: &GlobalOpts,
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    if let Some(ref pw) = global.password {
        return Ok(SecretString::from(pw.clone()));
    }
    match unicli_config::resolve_password(profile, profile_name) {
        Err(ConfigError::NoCredentials { .. }) if std::io::stdin().is_terminal() => {
            let pw = rpassword::prompt_password("Password: ")?;
            Ok(SecretString::from(pw))
        }
        other => other.map_err(CliError::from),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["unicli"];
        argv.extend_from_slice(args);
        argv.push("devices");
        Cli::parse_from(argv).global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut config = Config::default();
        config.profiles.insert(name.into(), profile);
        config
    }

    #[test]
    fn flags_override_profile() {
        let config = config_with(
            "default",
            Profile {
                host: "unifi.lan".into(),
                site: "office".into(),
                password: Some("from-file".into()),
                ..Profile::default()
            },
        );
        let opts = global(&[
            "--host",
            "10.0.0.2",
            "--port",
            "443",
            "--platform",
            "unifi-os",
            "-k",
            "--password",
            "from-flag",
        ]);

        let session = resolve_session(&opts, &config).unwrap();
        assert_eq!(session.url.as_str(), "https://10.0.0.2/");
        assert_eq!(session.site, "office");
        assert_eq!(session.username, "ubnt");
        assert_eq!(session.password.expose_secret(), "from-flag");
        assert_eq!(session.platform, PlatformSelection::UnifiOs);
        assert_eq!(session.transport.tls, TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn missing_default_profile_uses_builtin_defaults() {
        let opts = global(&["--password", "pw", "--timeout", "5"]);
        let session = resolve_session(&opts, &Config::default()).unwrap();
        assert_eq!(session.url.as_str(), "https://127.0.0.1:8443/");
        assert_eq!(session.site, "default");
        assert_eq!(session.platform, PlatformSelection::Classic);
        assert_eq!(session.transport.tls, TlsMode::System);
        assert_eq!(session.transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_explicit_profile_is_an_error() {
        let config = config_with("home", Profile::default());
        let opts = global(&["--profile", "office", "--password", "pw"]);
        let err = resolve_session(&opts, &config).unwrap_err();
        assert!(
            matches!(err, CliError::ProfileNotFound { ref name, ref available } if name == "office" && available == "home")
        );
    }

    #[test]
    fn profile_timeout_beats_global_default() {
        let config = config_with(
            "default",
            Profile {
                timeout: Some(90),
                ..Profile::default()
            },
        );
        let session = resolve_session(&global(&["--password", "pw"]), &config).unwrap();
        assert_eq!(session.transport.timeout, Duration::from_secs(90));
    }

    #[test]
    fn verify_flag_overrides_profile() {
        let config = config_with(
            "default",
            Profile {
                verify_tls: false,
                ..Profile::default()
            },
        );
        let tls = |args: &[&str]| resolve_session(&global(args), &config).unwrap().transport.tls;

        assert_eq!(tls(&["--password", "pw"]), TlsMode::DangerAcceptInvalid);
        assert_eq!(tls(&["--password", "pw", "--verify"]), TlsMode::System);
        assert_eq!(
            tls(&["--password", "pw", "--verify", "-k"]),
            TlsMode::DangerAcceptInvalid
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = resolve_session(&global(&["--password", "pw", "--timeout", "0"]), &Config::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "timeout"));

        let config = config_with(
            "default",
            Profile {
                timeout: Some(0),
                ..Profile::default()
            },
        );
        assert!(resolve_session(&global(&["--password", "pw"]), &config).is_err());
    }

    #[test]
    fn output_falls_back_to_config_default() {
        let mut config = Config::default();
        assert_eq!(
            output_format(&global(&[]), &config).unwrap(),
            OutputFormat::Plain
        );

        config.defaults.output = "json-compact".into();
        assert_eq!(
            output_format(&global(&[]), &config).unwrap(),
            OutputFormat::JsonCompact
        );
        assert_eq!(
            output_format(&global(&["-o", "yaml"]), &config).unwrap(),
            OutputFormat::Yaml
        );

        config.defaults.output = "xml".into();
        assert!(output_format(&global(&[]), &config).is_err());
    }
}
