//! Governance service
//!
//! Subgroup polls: listing, creation and voting.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{Proposal, ProposalId, SubgroupId, Viewer};
use crate::domain::ports::DataProvider;
use crate::error::{AppError, DomainError};

/// Proposals of one subgroup, split by state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProposalBoard {
    pub active: Vec<Proposal>,
    pub executed: Vec<Proposal>,
}

pub struct GovernanceService<DP>
where
    DP: DataProvider,
{
    provider: Arc<DP>,
}

impl<DP> GovernanceService<DP>
where
    DP: DataProvider,
{
    pub fn new(provider: Arc<DP>) -> Self {
        Self { provider }
    }

    pub async fn board(&self, subgroup: SubgroupId) -> Result<ProposalBoard, AppError> {
        let count = self
            .provider
            .proposal_count()
            .await
            .map_err(AppError::fetch_failed)?;

        let mut board = ProposalBoard::default();
        for id in (1..=count).map(ProposalId) {
            let proposal = self
                .provider
                .get_proposal(id)
                .await
                .map_err(AppError::fetch_failed)?;
            if proposal.subgroup_id != subgroup {
                continue;
            }
            if proposal.executed {
                board.executed.push(proposal);
            } else if proposal.is_active() {
                board.active.push(proposal);
            }
        }

        Ok(board)
    }

    /// Open a poll whose threshold is the subgroup's current subscriber count
    pub async fn create_proposal(
        &self,
        viewer: &Viewer,
        subgroup: SubgroupId,
        description: &str,
    ) -> Result<(), AppError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(
                DomainError::Validation("Proposal description is required".to_string()).into(),
            );
        }

        let group = self
            .provider
            .get_subgroup(subgroup)
            .await
            .map_err(AppError::fetch_failed)?;
        if group.is_placeholder() {
            return Err(DomainError::NotFound(format!("Subgroup {} not found", subgroup)).into());
        }

        self.provider
            .create_proposal(
                &viewer.account,
                description,
                group.subscriber_count,
                subgroup,
            )
            .await?;
        tracing::info!(
            account = %viewer.account,
            subgroup_id = %subgroup,
            threshold = group.subscriber_count,
            "Proposal created"
        );
        Ok(())
    }

    pub async fn vote(
        &self,
        viewer: &Viewer,
        proposal: ProposalId,
        support: bool,
    ) -> Result<(), AppError> {
        self.provider
            .vote(&viewer.account, proposal, support)
            .await?;
        tracing::info!(account = %viewer.account, proposal_id = %proposal, support, "Vote cast");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_proposal, test_subgroup, test_viewer, InMemoryDataProvider};

    fn ids(proposals: &[Proposal]) -> Vec<u64> {
        proposals.iter().map(|p| p.id.0).collect()
    }

    #[tokio::test]
    async fn board_splits_by_state_for_one_subgroup() {
        let provider = InMemoryDataProvider::new()
            .with_proposal(test_proposal(1, 1, false, 1_900_000_000))
            .with_proposal(test_proposal(2, 1, true, 1_800_000_000))
            .with_proposal(test_proposal(3, 2, false, 1_900_000_000))
            .with_proposal(test_proposal(4, 1, false, 0))
            .with_proposal(test_proposal(5, 1, false, 1_950_000_000));
        let service = GovernanceService::new(Arc::new(provider));

        let board = service.board(SubgroupId(1)).await.unwrap();

        assert_eq!(ids(&board.active), vec![1, 5]);
        assert_eq!(ids(&board.executed), vec![2]);
    }

    #[tokio::test]
    async fn board_read_failure_is_fetch_failed() {
        let service = GovernanceService::new(Arc::new(InMemoryDataProvider::new().failing_reads()));

        let result = service.board(SubgroupId(1)).await;

        assert!(matches!(result, Err(AppError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn create_proposal_uses_subscriber_count_as_threshold() {
        let mut chess = test_subgroup(1, "Chess", &[]);
        chess.subscriber_count = 3;
        let provider = Arc::new(InMemoryDataProvider::new().with_subgroup(chess));
        let service = GovernanceService::new(provider.clone());
        let viewer = test_viewer();

        service
            .create_proposal(&viewer, SubgroupId(1), " Ban spoilers ")
            .await
            .unwrap();

        let proposal = provider.proposal(ProposalId(1)).unwrap();
        assert_eq!(proposal.description, "Ban spoilers");
        assert_eq!(proposal.vote_threshold, 3);
        assert!(proposal.is_active());
    }

    #[tokio::test]
    async fn blank_description_is_rejected() {
        let provider = Arc::new(
            InMemoryDataProvider::new().with_subgroup(test_subgroup(1, "Chess", &[])),
        );
        let service = GovernanceService::new(provider.clone());

        let result = service
            .create_proposal(&test_viewer(), SubgroupId(1), "  ")
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
        assert!(provider.write_log().is_empty());
    }

    #[tokio::test]
    async fn votes_are_tallied() {
        let provider = Arc::new(
            InMemoryDataProvider::new().with_proposal(test_proposal(1, 1, false, 1_900_000_000)),
        );
        let service = GovernanceService::new(provider.clone());
        let viewer = test_viewer();

        service.vote(&viewer, ProposalId(1), true).await.unwrap();
        service.vote(&viewer, ProposalId(1), false).await.unwrap();
        service.vote(&viewer, ProposalId(1), true).await.unwrap();

        let proposal = provider.proposal(ProposalId(1)).unwrap();
        assert_eq!(proposal.votes_for, 2);
        assert_eq!(proposal.votes_against, 1);
    }
}
