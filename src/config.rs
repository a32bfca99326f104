//! Command-line and environment configuration.
//!
//! Values come from the command line first, then from `IPHELPER_*`
//! environment variables (a `.env` file is loaded into the environment by
//! `main` before parsing).

use crate::dispatch::Action;
use clap::{Parser, ValueEnum};

/// Default log4rs configuration file.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse, convert and introspect IPv4/IPv6 addresses, CIDR networks and
/// MAC-derived interface ids.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Config {
    /// Address, CIDR network or MAC address to convert.
    #[arg(required_unless_present = "batch", conflicts_with = "batch")]
    pub input: Option<String>,

    /// Conversion to run: auto, v4_to_v6_mapped, v4_to_6to4, v6_mapped_to_v4,
    /// expand_v6, compress_v6, subnet_info, reverse_dns, eui64 or bin_hex.
    #[arg(short, long, default_value_t = Action::Auto, env = "IPHELPER_ACTION")]
    pub action: Action,

    /// Extra argument; the IPv6 /64 prefix for `eui64`.
    #[arg(short, long, env = "IPHELPER_EXTRA")]
    pub extra: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "IPHELPER_FORMAT")]
    pub format: OutputFormat,

    /// JSON file with a list of {action, input, extra} requests.
    #[arg(short, long)]
    pub batch: Option<String>,

    /// log4rs YAML configuration file.
    #[arg(long, default_value = DEFAULT_LOG_CONFIG, env = "IPHELPER_LOG_CONFIG")]
    pub log_config: String,
}
