use std::time::Instant;

use anyhow::Context;
use portscan_common::ScanConfig;
use portscan_core::cancel;
use portscan_core::probe::Probe;
use portscan_core::scanner::{self, Scanner};
use tracing::{Instrument, info, info_span, warn};

use crate::terminal::{print, progress};

pub async fn scan(cfg: ScanConfig, quiet: bool) -> anyhow::Result<()> {
    let probes: Vec<Probe> = load(&cfg)?;
    let total: usize = probes.len();

    let span = info_span!("scan", indicatif.pb_show = true);
    if !quiet {
        progress::attach(&span, total)?;
    }

    let (cancel_handle, cancel_signal) = cancel::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping scan");
            cancel_handle.cancel();
        }
    });

    let progress_span = span.clone();
    let start_time = Instant::now();
    let report: String = Scanner::new(cfg)
        .with_cancel(cancel_signal)
        .on_progress(move |_| progress::advance(&progress_span))
        .run_probes(probes)
        .instrument(span)
        .await?;

    info!(
        "Scanned {total} host/port pairs in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    print::report(&report);
    Ok(())
}

fn load(cfg: &ScanConfig) -> anyhow::Result<Vec<Probe>> {
    scanner::load_probes(cfg).with_context(|| {
        format!(
            "failed to load targets from hosts '{}' and ports '{}'",
            cfg.host_spec, cfg.port_spec
        )
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_names_both_specs() {
        let err = load(&ScanConfig::new("127.0.0.1", "22,ssh")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'127.0.0.1'"), "{message}");
        assert!(message.contains("'22,ssh'"), "{message}");
        assert!(format!("{err:#}").contains("ssh"));
    }

    #[test]
    fn load_expands_valid_specs() {
        let probes = load(&ScanConfig::new("127.0.0.1", "80-82")).unwrap();
        assert_eq!(probes.len(), 3);
    }
}
