//! Profile service
//!
//! The viewer's own profile: authored posts, comment activity and saved
//! posts. Creating a profile requires an avatar upload.

use std::sync::Arc;

use serde::Serialize;

use crate::app::aggregator::{FeedAggregator, PostView};
use crate::domain::entities::{Address, PostId, Viewer};
use crate::domain::ports::{DataProvider, FileStore, ImageUpload};
use crate::error::{AppError, DomainError};

/// A comment the viewer wrote, joined with the post it belongs to
#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub content: String,
    pub post_id: PostId,
    pub post_title: String,
    pub post_author: Address,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub address: Address,
    pub exists: bool,
    pub avatar: String,
    pub avatar_url: Option<String>,
    pub posts: Vec<PostView>,
    pub activity: Vec<ActivityItem>,
    pub saved: Vec<PostView>,
}

pub struct ProfileService<DP, FS>
where
    DP: DataProvider,
    FS: FileStore,
{
    provider: Arc<DP>,
    aggregator: Arc<FeedAggregator<DP>>,
    files: Arc<FS>,
}

impl<DP, FS> ProfileService<DP, FS>
where
    DP: DataProvider,
    FS: FileStore,
{
    pub fn new(provider: Arc<DP>, aggregator: Arc<FeedAggregator<DP>>, files: Arc<FS>) -> Self {
        Self {
            provider,
            aggregator,
            files,
        }
    }

    pub async fn profile(&self, viewer: &Viewer) -> Result<ProfileView, AppError> {
        let me = self
            .provider
            .get_user(&viewer.account)
            .await
            .map_err(AppError::fetch_failed)?;

        if !me.exists {
            return Ok(ProfileView {
                address: viewer.account.clone(),
                exists: false,
                avatar: String::new(),
                avatar_url: None,
                posts: Vec::new(),
                activity: Vec::new(),
                saved: Vec::new(),
            });
        }

        let posts = self
            .aggregator
            .collect(viewer, &me.authored_posts)
            .await
            .map_err(AppError::fetch_failed)?;
        let saved = self
            .aggregator
            .collect(viewer, &me.saved_posts)
            .await
            .map_err(AppError::fetch_failed)?;

        let mut activity = Vec::with_capacity(me.authored_comments.len());
        for &id in &me.authored_comments {
            let comment = self
                .provider
                .get_comment(id)
                .await
                .map_err(AppError::fetch_failed)?;
            if comment.is_deleted {
                continue;
            }
            let post = self
                .provider
                .get_post(comment.post_id)
                .await
                .map_err(AppError::fetch_failed)?;
            activity.push(ActivityItem {
                content: comment.content,
                post_id: post.id,
                post_title: post.title,
                post_author: post.author,
            });
        }

        let avatar_url = (!me.image_hash.is_empty())
            .then(|| self.aggregator.media().url_for(&me.image_hash));

        Ok(ProfileView {
            address: me.address,
            exists: true,
            avatar: me.image_hash,
            avatar_url,
            posts,
            activity,
            saved,
        })
    }

    /// Upload the avatar, then register the account with it
    pub async fn create_profile(
        &self,
        viewer: &Viewer,
        avatar: ImageUpload,
    ) -> Result<String, AppError> {
        let me = self.provider.get_user(&viewer.account).await?;
        if me.exists {
            return Err(DomainError::Validation("Profile already exists".to_string()).into());
        }
        if avatar.bytes.is_empty() {
            return Err(
                DomainError::Validation("A profile image is required".to_string()).into(),
            );
        }

        let hash = self.files.pin_file(&avatar).await.map_err(|e| {
            tracing::warn!(error = %e, account = %viewer.account, "Avatar upload failed");
            e
        })?;

        self.provider.create_user(&viewer.account, &hash).await?;
        tracing::info!(account = %viewer.account, image = %hash, "Profile created");

        Ok(hash)
    }
}
