//! Feed aggregation
//!
//! Joins post, author and comment records from the Data Provider into
//! display-ready views. A pass is all-or-nothing: the first failed lookup
//! aborts it and no partial list is returned.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::app::sensitivity::is_sensitive;
use crate::domain::entities::{Address, CommentId, Post, PostId, User, Viewer};
use crate::domain::ports::{DataProvider, SentimentLabel};
use crate::error::ProviderError;

/// Builds public URLs for content-addressed references
#[derive(Debug, Clone)]
pub struct MediaGateway {
    base_url: String,
}

impl MediaGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, hash: &str) -> String {
        format!("{}/ipfs/{}", self.base_url, hash)
    }
}

/// A comment as shown under a post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub author: Address,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SentimentLabel>,
}

/// A post joined with its author and comments
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub author: Address,
    /// Author profile image reference
    pub author_avatar: String,
    pub author_avatar_url: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    /// Insertion order from the provider
    pub comments: Vec<CommentView>,
    pub is_following_author: bool,
    /// Fixed at aggregation time from title and description
    pub is_blurred: bool,
}

pub struct FeedAggregator<DP>
where
    DP: DataProvider,
{
    provider: Arc<DP>,
    media: MediaGateway,
}

impl<DP> FeedAggregator<DP>
where
    DP: DataProvider,
{
    pub fn new(provider: Arc<DP>, media: MediaGateway) -> Self {
        Self { provider, media }
    }

    pub fn media(&self) -> &MediaGateway {
        &self.media
    }

    /// Every live post, ascending by id
    pub async fn collect_all(&self, viewer: &Viewer) -> Result<Vec<PostView>, ProviderError> {
        let count = self.provider.post_count().await?;
        tracing::debug!(post_count = count, "Aggregating feed");
        let ids: Vec<PostId> = (1..=count).map(PostId).collect();
        self.collect(viewer, &ids).await
    }

    /// Live posts among `ids`, in the given order. Deleted posts are skipped.
    pub async fn collect(
        &self,
        viewer: &Viewer,
        ids: &[PostId],
    ) -> Result<Vec<PostView>, ProviderError> {
        let mut authors: HashMap<String, User> = HashMap::new();
        let mut views = Vec::with_capacity(ids.len());

        for &id in ids {
            let post = self.provider.get_post(id).await?;
            if post.is_deleted {
                tracing::debug!(post_id = %id, "Skipping deleted post");
                continue;
            }
            views.push(self.build(viewer, post, &mut authors).await?);
        }

        Ok(views)
    }

    /// View of a single post record
    pub async fn view_of(&self, viewer: &Viewer, post: Post) -> Result<PostView, ProviderError> {
        self.build(viewer, post, &mut HashMap::new()).await
    }

    async fn build(
        &self,
        viewer: &Viewer,
        post: Post,
        authors: &mut HashMap<String, User>,
    ) -> Result<PostView, ProviderError> {
        let author_key = post.author.as_str().to_lowercase();
        let author = match authors.get(&author_key) {
            Some(author) => author.clone(),
            None => {
                let author = self.provider.get_user(&post.author).await?;
                authors.insert(author_key, author.clone());
                author
            }
        };

        let comments = self.resolve_comments(&post.comment_ids).await?;
        let is_blurred = is_sensitive(&post.title, &post.description);

        Ok(PostView {
            id: post.id,
            author_avatar_url: self.media.url_for(&author.image_hash),
            author_avatar: author.image_hash.clone(),
            is_following_author: author.is_followed_by(&viewer.account),
            author: post.author,
            title: post.title,
            description: post.description,
            image_url: post.image_hash.as_deref().map(|h| self.media.url_for(h)),
            image: post.image_hash,
            comments,
            is_blurred,
        })
    }

    /// Live comments in insertion order
    pub async fn resolve_comments(
        &self,
        ids: &[CommentId],
    ) -> Result<Vec<CommentView>, ProviderError> {
        let mut comments = Vec::with_capacity(ids.len());
        for &id in ids {
            let comment = self.provider.get_comment(id).await?;
            if comment.is_deleted {
                continue;
            }
            comments.push(CommentView {
                author: comment.author,
                content: comment.content,
                label: None,
            });
        }
        Ok(comments)
    }
}
