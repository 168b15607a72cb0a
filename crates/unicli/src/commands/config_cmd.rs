//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config as TOML-like text, masking passwords.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "host = \"{}\"", p.host);
        let _ = writeln!(out, "port = {}", p.port);
        let _ = writeln!(out, "site = \"{}\"", p.site);
        let _ = writeln!(out, "username = \"{}\"", p.username);
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"{REDACTED}\"");
        }
        let _ = writeln!(out, "platform = \"{}\"", p.platform);
        let _ = writeln!(out, "verify_tls = {}", p.verify_tls);
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Render the config in the chosen format, masking passwords.
fn render_config(format: OutputFormat, mut cfg: Config) -> Result<String, CliError> {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
    match format {
        OutputFormat::Plain | OutputFormat::Table => Ok(format_config_redacted(&cfg)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&cfg)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(&cfg)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&cfg)?),
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_password() -> Result<String, CliError> {
    let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(pass)
}

/// Ask where to keep the password.
///
/// Returns `Some(password)` for plaintext storage, `None` when it went to
/// the keyring or is not stored at all.
fn prompt_password_storage(profile_name: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Don't store (prompt on every run)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 => {
            unicli_config::store_password(profile_name, &prompt_password()?)?;
            eprintln!("   ✓ Password stored in system keyring");
            Ok(None)
        }
        1 => Ok(Some(prompt_password()?)),
        _ => Ok(None),
    }
}

fn profile_not_found(name: String, cfg: &Config) -> CliError {
    CliError::ProfileNotFound {
        available: config::available_profiles(cfg),
        name,
    }
}

// ── Init ────────────────────────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("unicli configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_file_config()?;
    let defaults = Profile::default();

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    if cfg.profiles.contains_key(&profile_name) {
        let overwrite = Confirm::new()
            .with_prompt(format!("Profile '{profile_name}' exists. Replace it?"))
            .default(false)
            .interact()
            .map_err(prompt_err)?;
        if !overwrite {
            eprintln!("Aborted; nothing written.");
            return Ok(());
        }
    }

    // 2. Controller address
    let host: String = Input::new()
        .with_prompt("Controller host")
        .default(defaults.host.clone())
        .interact_text()
        .map_err(prompt_err)?;
    let port: u16 = Input::new()
        .with_prompt("Controller port")
        .default(defaults.port)
        .interact_text()
        .map_err(prompt_err)?;
    unicli_config::controller_url(&host, port)?;

    // 3. Platform
    let platforms = &["classic", "unifi-os", "auto"];
    let platform = Select::new()
        .with_prompt("Controller platform")
        .items(platforms)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let verify_tls = Confirm::new()
        .with_prompt("Verify the controller's TLS certificate?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;

    // 4. Site and account
    let site: String = Input::new()
        .with_prompt("Site name")
        .default(defaults.site.clone())
        .interact_text()
        .map_err(prompt_err)?;
    let username: String = Input::new()
        .with_prompt("Username")
        .default(defaults.username.clone())
        .interact_text()
        .map_err(prompt_err)?;
    let password = prompt_password_storage(&profile_name)?;

    // 5. Write config
    let profile = Profile {
        host,
        port,
        site,
        username,
        password,
        platform: platforms[platform].into(),
        verify_tls,
        ..defaults
    };
    cfg.profiles.insert(profile_name.clone(), profile);
    if cfg.profiles.len() == 1 {
        cfg.default_profile = Some(profile_name.clone());
    }
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Profile: {profile_name}");
    eprintln!("\n  Test it: unicli --profile {profile_name} devices");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = config::output_format(global, &cfg)?;
            let out = render_config(format, cfg)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: unicli config init");
                return Ok(());
            }
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            let mut names: Vec<_> = cfg.profiles.keys().collect();
            names.sort();
            let out = names
                .into_iter()
                .map(|name| {
                    let marker = if name == default { " *" } else { "" };
                    format!("{name}{marker}")
                })
                .collect::<Vec<_>>()
                .join("\n");
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_file_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(name, &cfg));
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(profile_name, &cfg));
            }

            unicli_config::store_password(&profile_name, &prompt_password()?)?;
            eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}
