//! Data Provider port trait
//!
//! Defines the read and write surface of the social contract and the
//! governance contract. Writes are submitted on behalf of `from` and resolve
//! once the provider accepted or rejected the transaction.

use async_trait::async_trait;

use crate::domain::entities::{
    Address, Comment, CommentId, NewPost, Post, PostId, Proposal, ProposalId, Subgroup,
    SubgroupId, User,
};
use crate::error::ProviderError;

#[async_trait]
pub trait DataProvider: Send + Sync {
    // Reads

    /// Get an account record; unknown accounts return `exists == false`
    async fn get_user(&self, address: &Address) -> Result<User, ProviderError>;

    /// Highest post id issued so far
    async fn post_count(&self) -> Result<u64, ProviderError>;

    async fn get_post(&self, id: PostId) -> Result<Post, ProviderError>;

    async fn get_comment(&self, id: CommentId) -> Result<Comment, ProviderError>;

    /// Whether `account` currently likes the post
    async fn has_liked(&self, post: PostId, account: &Address) -> Result<bool, ProviderError>;

    async fn subgroup_count(&self) -> Result<u64, ProviderError>;

    async fn get_subgroup(&self, id: SubgroupId) -> Result<Subgroup, ProviderError>;

    async fn is_subscribed(
        &self,
        subgroup: SubgroupId,
        account: &Address,
    ) -> Result<bool, ProviderError>;

    async fn proposal_count(&self) -> Result<u64, ProviderError>;

    async fn get_proposal(&self, id: ProposalId) -> Result<Proposal, ProviderError>;

    // Writes

    /// Register the sender with a profile image reference
    async fn create_user(&self, from: &Address, image_hash: &str) -> Result<(), ProviderError>;

    async fn create_post(&self, from: &Address, post: &NewPost) -> Result<(), ProviderError>;

    async fn add_comment(
        &self,
        from: &Address,
        post: PostId,
        content: &str,
    ) -> Result<(), ProviderError>;

    async fn create_subgroup(&self, from: &Address, name: &str) -> Result<(), ProviderError>;

    async fn like_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError>;

    async fn unlike_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError>;

    async fn save_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError>;

    async fn unsave_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError>;

    async fn follow_user(&self, from: &Address, target: &Address) -> Result<(), ProviderError>;

    async fn unfollow_user(&self, from: &Address, target: &Address)
        -> Result<(), ProviderError>;

    async fn join_subgroup(&self, from: &Address, subgroup: SubgroupId)
        -> Result<(), ProviderError>;

    async fn leave_subgroup(
        &self,
        from: &Address,
        subgroup: SubgroupId,
    ) -> Result<(), ProviderError>;

    async fn create_proposal(
        &self,
        from: &Address,
        description: &str,
        vote_threshold: u64,
        subgroup: SubgroupId,
    ) -> Result<(), ProviderError>;

    async fn vote(
        &self,
        from: &Address,
        proposal: ProposalId,
        support: bool,
    ) -> Result<(), ProviderError>;
}
