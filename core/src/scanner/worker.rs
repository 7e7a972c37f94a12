//! One member of the scan worker pool.
//!
//! ```text
//! Idle ──recv──▶ Probing ──▶ Reporting ──send──▶ Idle
//!   │
//!   └──input closed and empty──▶ Drained
//! ```
//!
//! `Idle -> Drained` is the only way out of the loop, apart from cancellation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{Receiver, UnboundedSender};
use tokio::sync::Mutex;
use tracing::trace;

use crate::cancel::CancelSignal;
use crate::probe::{Probe, Prober};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WorkerState {
    Idle,
    Probing,
    Reporting,
    Drained,
}

pub(super) struct Worker {
    pub id: usize,
    pub input: Arc<Mutex<Receiver<Probe>>>,
    pub results: UnboundedSender<Probe>,
    pub prober: Arc<dyn Prober>,
    pub connect_timeout: Duration,
    pub cancel: CancelSignal,
}

impl Worker {
    pub async fn run(mut self) {
        loop {
            self.transition(WorkerState::Idle);
            let Some(mut probe) = self.next_probe().await else {
                break;
            };

            self.transition(WorkerState::Probing);
            probe
                .probe(self.prober.as_ref(), self.connect_timeout, &mut self.cancel)
                .await;

            if self.cancel.is_cancelled() {
                break;
            }

            self.transition(WorkerState::Reporting);
            if self.results.send(probe).is_err() {
                break;
            }
        }
        self.transition(WorkerState::Drained);
    }

    /// Waits for the next probe; `None` once the input is closed and empty
    /// or the scan is cancelled.
    async fn next_probe(&mut self) -> Option<Probe> {
        let mut input = self.input.lock().await;
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            probe = input.recv() => probe,
        }
    }

    fn transition(&self, state: WorkerState) {
        trace!(worker = self.id, ?state);
    }
}
