//! Post publishing
//!
//! Validates a draft, pins the optional image and submits the post.

use std::sync::Arc;

use crate::domain::entities::{NewPost, SubgroupId, Viewer};
use crate::domain::ports::{DataProvider, FileStore, ImageUpload};
use crate::error::{AppError, DomainError};

/// A post as submitted by the client
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    /// Comma-separated subgroup ids, e.g. "1, 4"
    pub subgroups: String,
    pub image: Option<ImageUpload>,
}

/// Parse a comma-separated id list. Entries that are not integers are dropped.
pub fn parse_subgroup_ids(raw: &str) -> Vec<SubgroupId> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .map(SubgroupId)
        .collect()
}

pub struct PublishService<DP, FS>
where
    DP: DataProvider,
    FS: FileStore,
{
    provider: Arc<DP>,
    files: Arc<FS>,
}

impl<DP, FS> PublishService<DP, FS>
where
    DP: DataProvider,
    FS: FileStore,
{
    pub fn new(provider: Arc<DP>, files: Arc<FS>) -> Self {
        Self { provider, files }
    }

    /// Publish a draft. A failed image upload publishes the post without one.
    pub async fn publish_post(&self, viewer: &Viewer, draft: PostDraft) -> Result<NewPost, AppError> {
        let title = draft.title.trim();
        let description = draft.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(DomainError::Validation(
                "Title and description are required".to_string(),
            )
            .into());
        }

        let image_hash = match &draft.image {
            Some(image) if !image.bytes.is_empty() => match self.files.pin_file(image).await {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::warn!(error = %e, account = %viewer.account, "Image upload failed, publishing without image");
                    None
                }
            },
            _ => None,
        };

        let post = NewPost {
            title: title.to_string(),
            description: description.to_string(),
            subgroup_ids: parse_subgroup_ids(&draft.subgroups),
            image_hash,
        };

        self.provider.create_post(&viewer.account, &post).await?;
        tracing::info!(
            account = %viewer.account,
            subgroups = post.subgroup_ids.len(),
            has_image = post.image_hash.is_some(),
            "Post published"
        );

        Ok(post)
    }
}
