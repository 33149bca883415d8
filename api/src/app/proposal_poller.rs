//! Proposal poller
//!
//! Keeps a subgroup's proposal board fresh while someone is watching it.
//! The task fetches once on start and then once per tick. A tick is only
//! taken after the previous fetch returned, so runs never overlap, and
//! ticks missed during a slow fetch are skipped rather than queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::app::governance_service::{GovernanceService, ProposalBoard};
use crate::domain::entities::SubgroupId;
use crate::domain::ports::DataProvider;

/// Handle to a running poll task. Dropping it cancels the task.
pub struct ProposalPoller {
    board: watch::Receiver<Option<ProposalBoard>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ProposalPoller {
    pub fn start<DP>(
        service: Arc<GovernanceService<DP>>,
        subgroup: SubgroupId,
        period: Duration,
    ) -> Self
    where
        DP: DataProvider + 'static,
    {
        let (tx, rx) = watch::channel(None);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {}
                }

                let result = tokio::select! {
                    _ = token.cancelled() => break,
                    result = service.board(subgroup) => result,
                };

                match result {
                    Ok(board) => {
                        tx.send_replace(Some(board));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, subgroup_id = %subgroup, "Proposal poll failed");
                    }
                }
            }

            tracing::debug!(subgroup_id = %subgroup, "Proposal poller stopped");
        });

        tracing::debug!(subgroup_id = %subgroup, period_secs = period.as_secs(), "Proposal poller started");

        Self {
            board: rx,
            cancel,
            handle: Some(handle),
        }
    }

    /// Receiver that observes every published board
    pub fn subscribe(&self) -> watch::Receiver<Option<ProposalBoard>> {
        self.board.clone()
    }

    /// Most recent board, `None` until the first fetch succeeded
    pub fn latest(&self) -> Option<ProposalBoard> {
        self.board.borrow().clone()
    }

    /// Cancel the task and wait for it to finish
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Proposal poller task panicked");
            }
        }
    }
}

impl Drop for ProposalPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
