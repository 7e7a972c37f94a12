//! The scan engine.
//!
//! A scan runs in three stages connected by channels:
//!
//! 1. The **driver** expands the config into probes and feeds them, in order,
//!    into a bounded input channel sized to the worker count. This is the only
//!    backpressure in the system: no more than `workers` unexecuted probes are
//!    ever queued.
//! 2. **Workers** (see [`worker`]) pull probes, connect, and push the finished
//!    probe onto an unbounded results channel.
//! 3. A single **aggregator** (see [`aggregator`]) owns the report buffer and
//!    appends a line for each open probe in completion order.
//!
//! Closing the input channel drains the workers; once every worker has exited
//! the results channel closes and the aggregator hands back the report.

use std::sync::Arc;

use portscan_common::{ScanConfig, ScanError, spec};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cancel::CancelSignal;
use crate::probe::{Probe, Prober, TcpConnectProber};

mod aggregator;
mod worker;

use aggregator::Tally;
use worker::Worker;

/// Report returned by a scan that found nothing open.
pub const NO_OPEN_PORTS: &str = "No open ports were found";

/// Invoked with the number of probes completed so far.
pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Runs `config` with the default TCP connect prober.
pub async fn scan(config: &ScanConfig) -> Result<String, ScanError> {
    Scanner::new(config.clone()).run().await
}

/// Expands the host and port specs into the probe list, host outer, port inner.
pub fn load_probes(config: &ScanConfig) -> Result<Vec<Probe>, ScanError> {
    let hosts: Vec<String> = spec::host::expand(&config.host_spec)?;
    let ports: Vec<u16> = spec::port::expand(&config.port_spec)?;

    let probes: Vec<Probe> = hosts
        .iter()
        .flat_map(|host| ports.iter().map(move |&port| Probe::new(host.as_str(), port)))
        .collect();

    debug!(
        "Loaded {} probes from {} hosts and {} ports",
        probes.len(),
        hosts.len(),
        ports.len()
    );
    Ok(probes)
}

pub struct Scanner {
    config: ScanConfig,
    prober: Arc<dyn Prober>,
    cancel: CancelSignal,
    on_progress: Option<ProgressCallback>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            prober: Arc::new(TcpConnectProber),
            cancel: CancelSignal::never(),
            on_progress: None,
        }
    }

    pub fn with_prober(mut self, prober: Arc<dyn Prober>) -> Self {
        self.prober = prober;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Expands the config and scans every resulting probe.
    pub async fn run(self) -> Result<String, ScanError> {
        let probes: Vec<Probe> = load_probes(&self.config)?;
        self.run_probes(probes).await
    }

    /// Scans an already expanded probe list.
    ///
    /// Probes are pulled from `probes` only as fast as the workers free up
    /// room in the input channel.
    pub async fn run_probes<I>(self, probes: I) -> Result<String, ScanError>
    where
        I: IntoIterator<Item = Probe>,
        I::IntoIter: Send,
    {
        let mut probes = probes.into_iter().peekable();
        if probes.peek().is_none() {
            return Err(ScanError::EmptyProbeSet);
        }

        let workers: usize = self.config.effective_workers();
        if workers != self.config.workers {
            warn!(
                "Worker count {} is invalid, running with {workers}",
                self.config.workers
            );
        }
        info!("Scanning with {workers} workers");

        let (input_tx, input_rx) = mpsc::channel::<Probe>(workers);
        let input_rx = Arc::new(Mutex::new(input_rx));
        let (results_tx, results_rx) = mpsc::unbounded_channel::<Probe>();

        let worker_handles: Vec<JoinHandle<()>> = (0..workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    input: input_rx.clone(),
                    results: results_tx.clone(),
                    prober: self.prober.clone(),
                    connect_timeout: self.config.connect_timeout,
                    cancel: self.cancel.clone(),
                };
                tokio::spawn(worker.run())
            })
            .collect();

        // Workers hold the only remaining senders, so the channel closes when they exit.
        drop(results_tx);
        drop(input_rx);

        let aggregator: JoinHandle<Tally> =
            tokio::spawn(aggregator::collect(results_rx, self.on_progress.clone()));

        let mut cancel: CancelSignal = self.cancel.clone();
        let mut fed: usize = 0;
        let mut fed_all: bool = true;
        for probe in probes {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    fed_all = false;
                    break;
                }
                sent = input_tx.send(probe) => {
                    if sent.is_err() {
                        fed_all = false;
                        break;
                    }
                    fed += 1;
                }
            }
        }
        drop(input_tx);

        let mut failure: Option<ScanError> = None;
        for handle in worker_handles {
            if let Err(e) = handle.await {
                failure.get_or_insert(ScanError::WorkerFailed(e.to_string()));
            }
        }

        let tally: Tally = match aggregator.await {
            Ok(tally) => tally,
            Err(e) => {
                failure.get_or_insert(ScanError::WorkerFailed(e.to_string()));
                Tally::default()
            }
        };

        if let Some(e) = failure {
            return Err(e);
        }

        // A cancel that lands after the last result is in changes nothing.
        if !fed_all || tally.completed < fed {
            warn!(
                "Scan cancelled after {} of {fed} probes completed",
                tally.completed
            );
            return Err(ScanError::Cancelled);
        }

        if tally.report.is_empty() {
            info!("Scan complete, no open ports");
            return Ok(NO_OPEN_PORTS.to_string());
        }

        info!("Scan complete, {} open ports", tally.report.lines().count());
        Ok(tally.report)
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
