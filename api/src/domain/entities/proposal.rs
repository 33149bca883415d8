//! Governance proposal entity
//!
//! Proposals are subgroup polls managed by the governance contract.

use serde::{Deserialize, Serialize};

use super::{Address, SubgroupId};

/// Governance proposal identifier (ids start at 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub u64);

impl From<u64> for ProposalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub subgroup_id: SubgroupId,
    pub proposer: Address,
    pub description: String,
    pub votes_for: u64,
    pub votes_against: u64,
    pub vote_threshold: u64,
    pub executed: bool,
    /// Unix seconds; zero means no voting window was opened
    pub deadline: u64,
}

impl Proposal {
    /// Open for votes: not executed and carrying a deadline
    pub fn is_active(&self) -> bool {
        !self.executed && self.deadline != 0
    }
}
