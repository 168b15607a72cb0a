//! Clap derive structures for the `unicli` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.
//! Also compiled by `build.rs` for man page generation, so this module
//! may only depend on `clap` and `clap_complete`.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unicli -- command line utility for the UniFi controller API
#[derive(Debug, Parser)]
#[command(
    name = "unicli",
    version,
    about = "Query and control a UniFi controller from the command line",
    long_about = "Lists recent events, devices, and active clients of a UniFi\n\
        controller site, and blocks, unblocks, or reconnects clients by MAC.\n\n\
        Connection settings come from flags, UNICLI_* environment variables,\n\
        or a named profile in the config file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "UNICLI_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Hostname of the UniFi controller [default: 127.0.0.1]
    #[arg(long, env = "UNICLI_HOST", global = true)]
    pub host: Option<String>,

    /// Port of the UniFi controller [default: 8443]
    #[arg(long, env = "UNICLI_PORT", global = true)]
    pub port: Option<u16>,

    /// Site ID used by the controller [default: default]
    #[arg(long, short = 's', env = "UNICLI_SITE", global = true)]
    pub site: Option<String>,

    /// Account used to authenticate [default: ubnt]
    #[arg(long, short = 'u', env = "UNICLI_USER", global = true)]
    pub user: Option<String>,

    /// Password used to authenticate (prompted for when not configured)
    #[arg(long, env = "UNICLI_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(
        long,
        short = 'k',
        visible_alias = "insecure",
        env = "UNICLI_NO_VERIFY",
        global = true,
        overrides_with = "verify"
    )]
    pub no_verify: bool,

    /// Verify the TLS certificate even if the profile turns it off
    #[arg(long, global = true, overrides_with = "no_verify")]
    pub verify: bool,

    /// Controller platform
    #[arg(long, env = "UNICLI_PLATFORM", global = true)]
    pub platform: Option<Platform>,

    /// Output format [default: plain]
    #[arg(long, short = 'o', env = "UNICLI_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "UNICLI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per record, as the controller's classic tooling prints it
    Plain,
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    /// Standalone Network Application (`/api/login`)
    Classic,
    /// UniFi OS console (`/api/auth/login`, `/proxy/network` prefix)
    #[value(alias = "unifios")]
    UnifiOs,
    /// Probe the controller before logging in
    Auto,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display recent events
    #[command(alias = "ev")]
    Events(EventsArgs),

    /// List devices (access points, switches, gateways)
    #[command(alias = "dev")]
    Devices,

    /// List active clients
    #[command(alias = "sta")]
    Clients,

    /// Block a client using its MAC address
    Block(MacArg),

    /// Unblock a client using its MAC address
    Unblock(MacArg),

    /// Force a client to reconnect using its MAC address
    #[command(alias = "kick")]
    Reconnect(MacArg),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Maximum number of events
    #[arg(long, short = 'l', default_value_t = 200)]
    pub limit: u32,

    /// Offset into the event list
    #[arg(long, default_value_t = 0)]
    pub start: u32,

    /// Hours of history to include
    #[arg(long, short = 'w', default_value_t = 1)]
    pub within: u32,
}

#[derive(Debug, Args)]
pub struct MacArg {
    /// Client MAC address (aa:bb:cc:dd:ee:ff, aa-bb-..., or aabbccddeeff)
    pub mac: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a profile's password in the system keyring
    SetPassword {
        /// Profile to update (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
