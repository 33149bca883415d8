//! Interaction service
//!
//! Per-post, per-viewer interaction state. A `PostCard` only changes after
//! the matching write was accepted by the Data Provider; a rejected write
//! leaves it exactly as it was.

use std::sync::Arc;

use serde::Serialize;

use crate::app::aggregator::{CommentView, FeedAggregator, PostView};
use crate::domain::entities::{Address, PostId, Viewer};
use crate::domain::ports::DataProvider;
use crate::error::{AppError, DomainError};

/// Interaction state of one post for one viewer
#[derive(Debug, Clone)]
pub struct PostCard {
    pub post: PostView,
    pub like_count: u64,
    pub liked: bool,
    pub saved: bool,
    /// Viewer chose to show a blurred post
    pub revealed: bool,
    pub viewer_registered: bool,
}

impl PostCard {
    pub fn is_obscured(&self) -> bool {
        self.post.is_blurred && !self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    fn record_like(&mut self) {
        if !self.liked {
            self.liked = true;
            self.like_count += 1;
        }
    }

    fn record_unlike(&mut self) {
        if self.liked {
            self.liked = false;
            self.like_count = self.like_count.saturating_sub(1);
        }
    }

    fn record_comment(&mut self, author: Address, content: String) {
        self.post.comments.push(CommentView {
            author,
            content,
            label: None,
        });
    }

    pub fn to_view(&self) -> CardView {
        let obscured = self.is_obscured();
        CardView {
            id: self.post.id,
            obscured,
            post: (!obscured).then(|| self.post.clone()),
            like_count: self.like_count,
            liked: self.liked,
            saved: self.saved,
            comment_count: self.post.comments.len(),
        }
    }
}

/// What a client receives for a card. Obscured cards carry no post content.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub id: PostId,
    pub obscured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostView>,
    pub like_count: u64,
    pub liked: bool,
    pub saved: bool,
    pub comment_count: usize,
}

pub struct InteractionService<DP>
where
    DP: DataProvider,
{
    provider: Arc<DP>,
    aggregator: Arc<FeedAggregator<DP>>,
}

impl<DP> InteractionService<DP>
where
    DP: DataProvider,
{
    pub fn new(provider: Arc<DP>, aggregator: Arc<FeedAggregator<DP>>) -> Self {
        Self {
            provider,
            aggregator,
        }
    }

    /// Initial interaction state of a post
    pub async fn load_card(&self, viewer: &Viewer, id: PostId) -> Result<PostCard, AppError> {
        let post = self
            .provider
            .get_post(id)
            .await
            .map_err(AppError::fetch_failed)?;
        if post.is_deleted {
            return Err(DomainError::NotFound(format!("Post {} was deleted", id)).into());
        }

        let me = self
            .provider
            .get_user(&viewer.account)
            .await
            .map_err(AppError::fetch_failed)?;
        let liked = self
            .provider
            .has_liked(id, &viewer.account)
            .await
            .map_err(AppError::fetch_failed)?;
        let like_count = post.like_count;
        let post = self
            .aggregator
            .view_of(viewer, post)
            .await
            .map_err(AppError::fetch_failed)?;

        Ok(PostCard {
            post,
            like_count,
            liked,
            saved: me.has_saved(id),
            revealed: false,
            viewer_registered: me.exists,
        })
    }

    /// Like or unlike, depending on the current state
    pub async fn toggle_like(&self, viewer: &Viewer, card: &mut PostCard) -> Result<(), AppError> {
        require_registered(card, "like posts")?;
        let id = card.post.id;

        let result = if card.liked {
            self.provider.unlike_post(&viewer.account, id).await
        } else {
            self.provider.like_post(&viewer.account, id).await
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, post_id = %id, liked = card.liked, "Like toggle rejected");
            return Err(e.into());
        }

        if card.liked {
            card.record_unlike();
        } else {
            card.record_like();
        }
        tracing::debug!(post_id = %id, liked = card.liked, likes = card.like_count, "Like toggled");
        Ok(())
    }

    /// Save or unsave, depending on the current state
    pub async fn toggle_save(&self, viewer: &Viewer, card: &mut PostCard) -> Result<(), AppError> {
        require_registered(card, "save posts")?;
        let id = card.post.id;

        let result = if card.saved {
            self.provider.unsave_post(&viewer.account, id).await
        } else {
            self.provider.save_post(&viewer.account, id).await
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, post_id = %id, saved = card.saved, "Save toggle rejected");
            return Err(e.into());
        }

        card.saved = !card.saved;
        Ok(())
    }

    /// Submit a comment and append it locally once accepted
    pub async fn add_comment(
        &self,
        viewer: &Viewer,
        card: &mut PostCard,
        content: &str,
    ) -> Result<(), AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("Comment must not be empty".to_string()).into());
        }
        require_registered(card, "comment")?;

        let id = card.post.id;
        if let Err(e) = self
            .provider
            .add_comment(&viewer.account, id, content)
            .await
        {
            tracing::warn!(error = %e, post_id = %id, "Comment rejected");
            return Err(e.into());
        }

        card.record_comment(viewer.account.clone(), content.to_string());
        Ok(())
    }

    pub async fn follow(&self, viewer: &Viewer, target: &Address) -> Result<(), AppError> {
        if viewer.is(target) {
            return Err(DomainError::Validation("You cannot follow yourself".to_string()).into());
        }
        self.provider.follow_user(&viewer.account, target).await?;
        tracing::info!(account = %viewer.account, target = %target, "Followed user");
        Ok(())
    }

    pub async fn unfollow(&self, viewer: &Viewer, target: &Address) -> Result<(), AppError> {
        if viewer.is(target) {
            return Err(DomainError::Validation("You cannot unfollow yourself".to_string()).into());
        }
        self.provider.unfollow_user(&viewer.account, target).await?;
        tracing::info!(account = %viewer.account, target = %target, "Unfollowed user");
        Ok(())
    }

    /// Follow or unfollow the card's author
    pub async fn toggle_follow_author(
        &self,
        viewer: &Viewer,
        card: &mut PostCard,
    ) -> Result<(), AppError> {
        let author = card.post.author.clone();
        if card.post.is_following_author {
            self.unfollow(viewer, &author).await?;
        } else {
            self.follow(viewer, &author).await?;
        }
        card.post.is_following_author = !card.post.is_following_author;
        Ok(())
    }
}

fn require_registered(card: &PostCard, action: &str) -> Result<(), DomainError> {
    if card.viewer_registered {
        Ok(())
    } else {
        Err(DomainError::NotRegistered(action.to_string()))
    }
}
