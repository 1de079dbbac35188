//! Command line options and the settings derived from them

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::color_scheme::ColorSchemeId;
use crate::peers::fetcher::DEFAULT_CLI;

pub const DEFAULT_INTERVAL_SECS: u64 = 15;
const MIN_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Parser)]
#[command(name = "peertop")]
#[command(about = "Live table of a Bitcoin node's peers (bitcoin-cli getpeerinfo)", version)]
pub struct Cli {
    /// Seconds between refreshes
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: u64,

    /// Node client to run `getpeerinfo` with
    #[arg(long, default_value = DEFAULT_CLI)]
    pub cli: PathBuf,

    /// Print a single table to stdout and exit
    #[arg(long)]
    pub once: bool,

    /// Disable colors (limited peers are shown in reverse video)
    #[arg(long)]
    pub monochrome: bool,

    /// Write diagnostics to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runtime settings
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub refresh_interval: Duration,
    pub cli: PathBuf,
    pub once: bool,
    pub color_scheme_id: ColorSchemeId,
    pub log_file: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            cli: PathBuf::from(DEFAULT_CLI),
            once: false,
            color_scheme_id: ColorSchemeId::Default,
            log_file: None,
        }
    }
}

impl MonitorConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let secs = cli.interval.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS);
        Self {
            refresh_interval: Duration::from_secs(secs),
            cli: cli.cli,
            once: cli.once,
            color_scheme_id: if cli.monochrome {
                ColorSchemeId::Monochrome
            } else {
                ColorSchemeId::Default
            },
            log_file: cli.log_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> MonitorConfig {
        let cli = Cli::try_parse_from(std::iter::once("peertop").chain(args.iter().copied())).unwrap();
        MonitorConfig::from_cli(cli)
    }

    #[test]
    fn defaults() {
        let cfg = parse(&[]);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(15));
        assert_eq!(cfg.cli, PathBuf::from("bitcoin-cli"));
        assert!(!cfg.once);
        assert_eq!(cfg.color_scheme_id, ColorSchemeId::Default);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn interval_is_clamped() {
        assert_eq!(parse(&["--interval", "0"]).refresh_interval, Duration::from_secs(1));
        assert_eq!(parse(&["-i", "5"]).refresh_interval, Duration::from_secs(5));
        assert_eq!(parse(&["-i", "99999"]).refresh_interval, Duration::from_secs(3600));
    }

    #[test]
    fn flags() {
        let cfg = parse(&["--cli", "/opt/bitcoin/bin/bitcoin-cli", "--once", "--monochrome", "--log-file", "peertop.log"]);
        assert_eq!(cfg.cli, PathBuf::from("/opt/bitcoin/bin/bitcoin-cli"));
        assert!(cfg.once);
        assert_eq!(cfg.color_scheme_id, ColorSchemeId::Monochrome);
        assert_eq!(cfg.log_file, Some(PathBuf::from("peertop.log")));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["peertop", "--ban"]).is_err());
    }
}
