//! Subgroup service
//!
//! Directory of topic communities, per-subgroup feeds and membership.

use std::sync::Arc;

use serde::Serialize;

use crate::app::aggregator::{FeedAggregator, PostView};
use crate::app::search::{search_posts, search_subgroups};
use crate::domain::entities::{Subgroup, SubgroupId, Viewer};
use crate::domain::ports::DataProvider;
use crate::error::{AppError, DomainError};

#[derive(Debug, Clone, Serialize)]
pub struct SubgroupDirectory {
    pub all: Vec<Subgroup>,
    /// Subgroups the viewer joined, in the order they were joined
    pub joined: Vec<Subgroup>,
}

impl SubgroupDirectory {
    pub fn empty() -> Self {
        Self {
            all: Vec::new(),
            joined: Vec::new(),
        }
    }
}

/// A subgroup's member posts as seen by one viewer
#[derive(Debug, Clone, Serialize)]
pub struct SubgroupFeed {
    pub subgroup: Subgroup,
    pub is_joined: bool,
    pub viewer_registered: bool,
    pub posts: Vec<PostView>,
}

pub struct SubgroupService<DP>
where
    DP: DataProvider,
{
    provider: Arc<DP>,
    aggregator: Arc<FeedAggregator<DP>>,
}

impl<DP> SubgroupService<DP>
where
    DP: DataProvider,
{
    pub fn new(provider: Arc<DP>, aggregator: Arc<FeedAggregator<DP>>) -> Self {
        Self {
            provider,
            aggregator,
        }
    }

    /// All subgroups and the viewer's joined ones, narrowed by name
    pub async fn directory(
        &self,
        viewer: &Viewer,
        query: &str,
    ) -> Result<SubgroupDirectory, AppError> {
        let count = self
            .provider
            .subgroup_count()
            .await
            .map_err(AppError::fetch_failed)?;

        let mut all = Vec::with_capacity(count as usize);
        for id in (1..=count).map(SubgroupId) {
            let subgroup = self
                .provider
                .get_subgroup(id)
                .await
                .map_err(AppError::fetch_failed)?;
            if !subgroup.is_placeholder() {
                all.push(subgroup);
            }
        }

        let me = self
            .provider
            .get_user(&viewer.account)
            .await
            .map_err(AppError::fetch_failed)?;
        let joined: Vec<Subgroup> = me
            .joined_subgroups
            .iter()
            .filter_map(|id| all.iter().find(|s| s.id == *id).cloned())
            .collect();

        Ok(SubgroupDirectory {
            all: search_subgroups(&all, query),
            joined: search_subgroups(&joined, query),
        })
    }

    /// Member posts in member-list order. Without a viewer only the subgroup
    /// itself is returned and the page stays empty.
    pub async fn subgroup_feed(
        &self,
        viewer: Option<&Viewer>,
        id: SubgroupId,
        query: &str,
    ) -> Result<SubgroupFeed, AppError> {
        let subgroup = self.load(id).await?;

        let Some(viewer) = viewer else {
            return Ok(SubgroupFeed {
                subgroup,
                is_joined: false,
                viewer_registered: false,
                posts: Vec::new(),
            });
        };

        let me = self
            .provider
            .get_user(&viewer.account)
            .await
            .map_err(AppError::fetch_failed)?;
        let is_joined = self
            .provider
            .is_subscribed(id, &viewer.account)
            .await
            .map_err(AppError::fetch_failed)?;
        let posts = self
            .aggregator
            .collect(viewer, &subgroup.post_ids)
            .await
            .map_err(AppError::fetch_failed)?;

        Ok(SubgroupFeed {
            subgroup,
            is_joined,
            viewer_registered: me.exists,
            posts: search_posts(&posts, query),
        })
    }

    /// Load a subgroup, treating the zeroed placeholder as missing
    pub async fn load(&self, id: SubgroupId) -> Result<Subgroup, AppError> {
        let subgroup = self
            .provider
            .get_subgroup(id)
            .await
            .map_err(AppError::fetch_failed)?;
        if subgroup.is_placeholder() {
            return Err(DomainError::NotFound(format!("Subgroup {} not found", id)).into());
        }
        Ok(subgroup)
    }

    pub async fn create_subgroup(&self, viewer: &Viewer, name: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(
                DomainError::Validation("Subgroup name must not be empty".to_string()).into(),
            );
        }

        self.provider.create_subgroup(&viewer.account, name).await?;
        tracing::info!(account = %viewer.account, name = %name, "Subgroup created");
        Ok(())
    }

    pub async fn join(&self, viewer: &Viewer, id: SubgroupId) -> Result<(), AppError> {
        self.load(id).await?;
        self.provider.join_subgroup(&viewer.account, id).await?;
        tracing::info!(account = %viewer.account, subgroup_id = %id, "Joined subgroup");
        Ok(())
    }

    pub async fn leave(&self, viewer: &Viewer, id: SubgroupId) -> Result<(), AppError> {
        self.load(id).await?;
        self.provider.leave_subgroup(&viewer.account, id).await?;
        tracing::info!(account = %viewer.account, subgroup_id = %id, "Left subgroup");
        Ok(())
    }
}
