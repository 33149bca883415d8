//! Wire records of the contract gateway
//!
//! The gateway relays contract structs as JSON using the contract's field
//! names. Integers arrive either as JSON numbers or as decimal strings
//! (uint256 values are stringified). Every record is converted into a domain
//! entity here; a record that fails validation is a read failure.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Address, Comment, CommentId, Post, PostId, Proposal, ProposalId, Subgroup, SubgroupId, User,
};
use crate::error::ProviderError;

/// An unsigned integer as the gateway encodes it
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Uint {
    Number(u64),
    Text(String),
}

impl Uint {
    pub fn value(&self, field: &str) -> Result<u64, ProviderError> {
        match self {
            Uint::Number(n) => Ok(*n),
            Uint::Text(s) => s.trim().parse().map_err(|_| {
                ProviderError::InvalidRecord(format!("{} is not an unsigned integer: {:?}", field, s))
            }),
        }
    }
}

impl Default for Uint {
    fn default() -> Self {
        Uint::Number(0)
    }
}

fn uints(values: &[Uint], field: &str) -> Result<Vec<u64>, ProviderError> {
    values.iter().map(|v| v.value(field)).collect()
}

fn address(raw: String, field: &str) -> Result<Address, ProviderError> {
    raw.parse::<Address>()
        .map_err(|e| ProviderError::InvalidRecord(format!("{}: {}", field, e)))
}

fn timestamp(raw: &Uint) -> Result<DateTime<Utc>, ProviderError> {
    let secs = raw.value("timestamp")?;
    i64::try_from(secs)
        .ok()
        .and_then(|s| Utc.timestamp_opt(s, 0).single())
        .ok_or_else(|| ProviderError::InvalidRecord(format!("timestamp out of range: {}", secs)))
}

#[derive(Debug, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_exists", default)]
    exists: bool,
    #[serde(rename = "_imageHash", default)]
    image_hash: String,
    #[serde(rename = "_followers", default)]
    followers: Vec<String>,
    #[serde(rename = "_savedPosts", default)]
    saved_posts: Vec<Uint>,
    #[serde(rename = "_userPosts", default)]
    user_posts: Vec<Uint>,
    #[serde(rename = "_userComments", default)]
    user_comments: Vec<Uint>,
    #[serde(rename = "_subgroupsJoined", default)]
    subgroups_joined: Vec<Uint>,
}

impl UserRecord {
    pub fn into_user(self, account: &Address) -> Result<User, ProviderError> {
        let followers = self
            .followers
            .into_iter()
            .map(|f| address(f, "follower"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(User {
            address: account.clone(),
            exists: self.exists,
            image_hash: self.image_hash,
            followers,
            saved_posts: uints(&self.saved_posts, "savedPosts")?
                .into_iter()
                .map(PostId)
                .collect(),
            authored_posts: uints(&self.user_posts, "userPosts")?
                .into_iter()
                .map(PostId)
                .collect(),
            authored_comments: uints(&self.user_comments, "userComments")?
                .into_iter()
                .map(CommentId)
                .collect(),
            joined_subgroups: uints(&self.subgroups_joined, "subgroupsJoined")?
                .into_iter()
                .map(SubgroupId)
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "_author")]
    author: String,
    #[serde(rename = "_title", default)]
    title: String,
    #[serde(rename = "_description", default)]
    description: String,
    #[serde(rename = "_imageHash", default)]
    image_hash: String,
    #[serde(rename = "_comments", default)]
    comments: Vec<Uint>,
    #[serde(rename = "_likeCount", default)]
    like_count: Uint,
    #[serde(rename = "_isDeleted", default)]
    is_deleted: bool,
    #[serde(rename = "_timestamp", default)]
    timestamp: Uint,
}

impl PostRecord {
    pub fn into_post(self, id: PostId) -> Result<Post, ProviderError> {
        let image_hash = Some(self.image_hash).filter(|h| !h.trim().is_empty());
        Ok(Post {
            id,
            author: address(self.author, "post author")?,
            title: self.title,
            description: self.description,
            image_hash,
            comment_ids: uints(&self.comments, "comments")?
                .into_iter()
                .map(CommentId)
                .collect(),
            like_count: self.like_count.value("likeCount")?,
            is_deleted: self.is_deleted,
            created_at: timestamp(&self.timestamp)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "_author")]
    author: String,
    #[serde(rename = "_content", default)]
    content: String,
    #[serde(rename = "_postId", default)]
    post_id: Uint,
    #[serde(rename = "_isDeleted", default)]
    is_deleted: bool,
    #[serde(rename = "_timestamp", default)]
    timestamp: Uint,
}

impl CommentRecord {
    pub fn into_comment(self, id: CommentId) -> Result<Comment, ProviderError> {
        Ok(Comment {
            id,
            author: address(self.author, "comment author")?,
            content: self.content,
            post_id: PostId(self.post_id.value("postId")?),
            is_deleted: self.is_deleted,
            created_at: timestamp(&self.timestamp)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SubgroupRecord {
    #[serde(rename = "_name", default)]
    name: String,
    #[serde(rename = "_subscriberCount", default)]
    subscriber_count: Uint,
    #[serde(rename = "_posts", default)]
    posts: Vec<Uint>,
}

impl SubgroupRecord {
    pub fn into_subgroup(self, id: SubgroupId) -> Result<Subgroup, ProviderError> {
        Ok(Subgroup {
            id,
            name: self.name,
            subscriber_count: self.subscriber_count.value("subscriberCount")?,
            post_ids: uints(&self.posts, "posts")?.into_iter().map(PostId).collect(),
        })
    }
}

/// Governance proposals use the contract's plain field names
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    subgroup_id: Uint,
    proposer: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    votes_for: Uint,
    #[serde(default)]
    votes_against: Uint,
    #[serde(default)]
    vote_threshold: Uint,
    #[serde(default)]
    executed: bool,
    #[serde(default)]
    deadline: Uint,
}

impl ProposalRecord {
    pub fn into_proposal(self, id: ProposalId) -> Result<Proposal, ProviderError> {
        Ok(Proposal {
            id,
            subgroup_id: SubgroupId(self.subgroup_id.value("subgroupId")?),
            proposer: address(self.proposer, "proposer")?,
            description: self.description,
            votes_for: self.votes_for.value("votesFor")?,
            votes_against: self.votes_against.value("votesAgainst")?,
            vote_threshold: self.vote_threshold.value("voteThreshold")?,
            executed: self.executed,
            deadline: self.deadline.value("deadline")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CountResponse {
    pub count: Uint,
}

#[derive(Debug, Deserialize)]
pub struct LikedResponse {
    pub liked: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubscribedResponse {
    pub subscribed: bool,
}

/// Body of a state-changing submission
#[derive(Debug, Serialize)]
pub struct TxRequest<'a> {
    pub from: &'a str,
    pub args: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    #[serde(default)]
    pub transaction_hash: Option<String>,
}
