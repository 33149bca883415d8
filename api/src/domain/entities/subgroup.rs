//! Subgroup domain entity
//!
//! Subgroups are topic communities. Posts are attached to subgroups when they
//! are published and accounts subscribe by joining.

use serde::{Deserialize, Serialize};

use super::PostId;

/// On-chain subgroup identifier (ids start at 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubgroupId(pub u64);

impl From<u64> for SubgroupId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubgroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subgroup {
    pub id: SubgroupId,
    pub name: String,
    pub subscriber_count: u64,
    /// Member post ids in the order the contract lists them
    pub post_ids: Vec<PostId>,
}

impl Subgroup {
    /// The contract answers unknown ids with a zeroed struct
    pub fn is_placeholder(&self) -> bool {
        self.name.trim().is_empty()
    }
}
