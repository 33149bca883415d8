//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod feed;
pub mod governance;
pub mod posts;
pub mod profile;
pub mod subgroups;
pub mod upload;

pub use feed::{get_feed, get_labeled_feed};
pub use governance::{create_proposal, get_proposals, stream_proposals, vote};
pub use posts::{
    add_comment, create_post, follow_user, get_card, like_post, save_post, unfollow_user,
};
pub use profile::{create_profile, get_profile};
pub use subgroups::{
    create_subgroup, get_subgroup_feed, join_subgroup, leave_subgroup, list_subgroups,
};
