//! Feed service
//!
//! Produces the home feed for a viewer, and an alternate feed whose comments
//! carry a sentiment label.

use std::sync::Arc;

use serde::Serialize;

use crate::app::aggregator::{FeedAggregator, PostView};
use crate::app::search::search_posts;
use crate::domain::entities::Viewer;
use crate::domain::ports::{DataProvider, SentimentClassifier};
use crate::error::AppError;

/// One fetch cycle of the feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    /// Whether the viewer has a profile (interactions need one)
    pub viewer_registered: bool,
    pub posts: Vec<PostView>,
}

impl FeedPage {
    /// What a visitor without a connected wallet sees
    pub fn disconnected() -> Self {
        Self {
            viewer_registered: false,
            posts: Vec::new(),
        }
    }

    /// Narrow the page to posts matching `query`
    pub fn filtered(mut self, query: &str) -> Self {
        self.posts = search_posts(&self.posts, query);
        self
    }
}

/// Service for generating viewer feeds
pub struct FeedService<DP, SC>
where
    DP: DataProvider,
    SC: SentimentClassifier,
{
    provider: Arc<DP>,
    aggregator: Arc<FeedAggregator<DP>>,
    classifier: Arc<SC>,
}

impl<DP, SC> FeedService<DP, SC>
where
    DP: DataProvider,
    SC: SentimentClassifier,
{
    pub fn new(provider: Arc<DP>, aggregator: Arc<FeedAggregator<DP>>, classifier: Arc<SC>) -> Self {
        Self {
            provider,
            aggregator,
            classifier,
        }
    }

    /// Every live post, ascending by id
    pub async fn home_feed(&self, viewer: &Viewer) -> Result<FeedPage, AppError> {
        let me = self
            .provider
            .get_user(&viewer.account)
            .await
            .map_err(AppError::fetch_failed)?;

        let posts = self
            .aggregator
            .collect_all(viewer)
            .await
            .map_err(AppError::fetch_failed)?;

        tracing::debug!(account = %viewer.account, posts = posts.len(), "Feed generated");

        Ok(FeedPage {
            viewer_registered: me.exists,
            posts,
        })
    }

    /// The home feed with every comment labeled by the classifier.
    ///
    /// A comment the classifier cannot label is shown without one.
    pub async fn labeled_feed(&self, viewer: &Viewer) -> Result<FeedPage, AppError> {
        let mut page = self.home_feed(viewer).await?;

        for post in &mut page.posts {
            for comment in &mut post.comments {
                match self.classifier.classify(&comment.content).await {
                    Ok(label) => comment.label = Some(label),
                    Err(e) => {
                        tracing::warn!(error = %e, post_id = %post.id, "Failed to classify comment");
                    }
                }
            }
        }

        Ok(page)
    }
}
