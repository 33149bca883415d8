//! Comment domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, PostId};

/// On-chain comment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl From<u64> for CommentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment as stored by the contract
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: Address,
    pub content: String,
    pub post_id: PostId,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}
