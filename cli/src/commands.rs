pub mod scan;

use std::time::Duration;

use clap::{ArgAction, Parser};
use portscan_common::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_WORKERS, ScanConfig};

const EXAMPLES: &str = "\
Examples:
  portscan -h 10.0.0.0/24 -p 21-23,389,3389
  portscan -h vcenter01.dbg.local -p 443
  portscan -h hosts.txt -p 135,139,445 -t 16";

#[derive(Parser)]
#[command(name = "portscan")]
#[command(version, about = "A concurrent TCP connect port scanner.")]
#[command(disable_help_flag = true, after_help = EXAMPLES)]
pub struct CommandLine {
    /// Host specification: a hostname or IP, a CIDR block, or a file with one host per line
    #[arg(short = 'h', long = "hosts", value_name = "HOSTSPEC")]
    pub hosts: String,

    /// Port specification: comma-separated ports and inclusive ranges (e.g. 21-23,389)
    #[arg(short = 'p', long = "ports", value_name = "PORTSPEC")]
    pub ports: String,

    /// Number of worker threads
    #[arg(
        short = 't',
        long = "threads",
        default_value_t = DEFAULT_WORKERS as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub threads: u32,

    /// Connect timeout in milliseconds
    #[arg(
        long = "timeout",
        value_name = "MS",
        default_value_t = DEFAULT_CONNECT_TIMEOUT.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the report only
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> ScanConfig {
        ScanConfig::new(&self.hosts, &self.ports)
            .with_workers(self.threads as usize)
            .with_connect_timeout(Duration::from_millis(self.timeout_ms))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
