//! User domain entity
//!
//! Users are identified by their wallet address. The record mirrors what the
//! contract stores per account.

use serde::{Deserialize, Serialize};

use super::{CommentId, PostId, SubgroupId};

/// A wallet address
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checksummed and lower-case hex refer to the same account
    pub fn eq_ignore_case(&self, other: &Address) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Address must not be empty".to_string());
        }
        if s.chars().any(char::is_whitespace) {
            return Err(format!("Invalid address: {}", s));
        }
        Ok(Self(s.to_string()))
    }
}

/// An account record as returned by the Data Provider.
///
/// Unknown accounts come back with `exists == false` and empty lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct User {
    pub address: Address,
    pub exists: bool,
    /// Content-addressed reference of the profile image
    pub image_hash: String,
    pub followers: Vec<Address>,
    pub saved_posts: Vec<PostId>,
    pub authored_posts: Vec<PostId>,
    pub authored_comments: Vec<CommentId>,
    pub joined_subgroups: Vec<SubgroupId>,
}

impl User {
    /// Whether `account` appears in this user's follower set
    pub fn is_followed_by(&self, account: &Address) -> bool {
        self.followers.iter().any(|f| f.eq_ignore_case(account))
    }

    pub fn has_saved(&self, post: PostId) -> bool {
        self.saved_posts.contains(&post)
    }
}
