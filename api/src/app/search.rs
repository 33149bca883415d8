//! In-memory search over already aggregated lists
//!
//! Both filters keep the relative order of the input and return everything
//! for an empty query.

use crate::app::PostView;
use crate::domain::entities::Subgroup;

/// Posts whose title or description contains `query`, ignoring case
pub fn search_posts(posts: &[PostView], query: &str) -> Vec<PostView> {
    if query.is_empty() {
        return posts.to_vec();
    }
    let query = query.to_lowercase();
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&query)
                || post.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Subgroups whose name contains `query`, ignoring case
pub fn search_subgroups(subgroups: &[Subgroup], query: &str) -> Vec<Subgroup> {
    if query.is_empty() {
        return subgroups.to_vec();
    }
    let query = query.to_lowercase();
    subgroups
        .iter()
        .filter(|subgroup| subgroup.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
