//! Post domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, CommentId, SubgroupId};

/// On-chain post identifier (ids start at 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A post as stored by the contract
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub author: Address,
    pub title: String,
    pub description: String,
    /// Content-addressed reference of the attached image, if any
    pub image_hash: Option<String>,
    /// Comment ids in insertion order
    pub comment_ids: Vec<CommentId>,
    pub like_count: u64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Data needed to publish a new post
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub subgroup_ids: Vec<SubgroupId>,
    pub image_hash: Option<String>,
}
