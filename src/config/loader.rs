//! Configuration loading from the command line and environment.
//!
//! Resolution order for each input:
//! - port: first positional argument, then `PORT`, then `9000`
//! - path: second positional argument, then `API_PATH`, then empty
//! - debug: `--debug`, or `DEBUG` present with any value
//!
//! Positionals are taken literally, so a leading `-` reaches validation
//! instead of being read as a flag. Arguments after the path are ignored.

use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;

use crate::config::schema::{
    ProbeConfig, DEFAULT_PORT, DEFAULT_RESPONSE_CAPACITY, MAX_RESPONSE_CAPACITY, MIN_RESPONSE_CAPACITY,
};

/// Environment variable that switches diagnostics on when present.
pub const DEBUG_ENV: &str = "DEBUG";

#[derive(Debug, Parser)]
#[command(name = "healthcheck")]
#[command(version, about = "Liveness probe for a service listening on 127.0.0.1", long_about = None)]
pub struct Cli {
    /// Port of the local service
    #[arg(env = "PORT", allow_hyphen_values = true, allow_negative_numbers = true)]
    pub port: Option<String>,

    /// Path to request, without the leading '/'
    #[arg(env = "API_PATH", allow_hyphen_values = true)]
    pub path: Option<String>,

    #[arg(hide = true)]
    pub ignored: Vec<String>,

    /// Connection timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub connect_timeout: u64,

    /// Per-read and per-write timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub io_timeout: u64,

    /// Response buffer size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_RESPONSE_CAPACITY, value_parser = parse_buffer_size)]
    pub buffer_size: usize,

    /// Print diagnostics to stdout (same as setting DEBUG)
    #[arg(long)]
    pub debug: bool,

    /// Print a one-line JSON report of the outcome
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Fold parsed arguments into a probe configuration.
    ///
    /// `debug_env` is whether `DEBUG` is present in the environment; it is
    /// passed in rather than read here so the result depends only on inputs.
    pub fn into_config(self, debug_env: bool) -> ProbeConfig {
        ProbeConfig {
            port: self.port.unwrap_or_else(|| DEFAULT_PORT.to_string()),
            path: self.path.unwrap_or_default(),
            connect_timeout: Duration::from_secs(self.connect_timeout),
            io_timeout: Duration::from_secs(self.io_timeout),
            response_capacity: self.buffer_size,
            debug: self.debug || debug_env,
            json: self.json,
            ..ProbeConfig::default()
        }
    }
}

/// Load the configuration for this process.
pub fn load_config() -> Result<ProbeConfig, clap::Error> {
    load_config_from(std::env::args_os())
}

/// Load the configuration from an explicit argument list.
pub fn load_config_from<I, T>(args: I) -> Result<ProbeConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    Ok(cli.into_config(std::env::var_os(DEBUG_ENV).is_some()))
}

fn parse_buffer_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    if !(MIN_RESPONSE_CAPACITY..=MAX_RESPONSE_CAPACITY).contains(&size) {
        return Err(format!(
            "must be between {MIN_RESPONSE_CAPACITY} and {MAX_RESPONSE_CAPACITY}"
        ));
    }
    Ok(size)
}
