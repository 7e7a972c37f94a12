use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use super::ProgressCallback;
use crate::probe::Probe;

/// What the aggregator hands back once the results channel closes.
#[derive(Debug, Default)]
pub(super) struct Tally {
    /// One `report() + "\n"` per open probe, in completion order.
    pub report: String,
    /// Probes that made it back from a worker, open or not.
    pub completed: usize,
}

/// Drains finished probes until every worker has hung up.
pub(super) async fn collect(
    mut results: UnboundedReceiver<Probe>,
    on_progress: Option<ProgressCallback>,
) -> Tally {
    let mut report = String::new();
    let mut completed: usize = 0;

    while let Some(probe) = results.recv().await {
        completed += 1;

        if let Some(line) = probe.report() {
            debug!("{line}");
            report.push_str(&line);
            report.push('\n');
        }

        if let Some(callback) = &on_progress {
            callback(completed);
        }
    }

    Tally { report, completed }
}
