//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{TimeZone, Utc};

use crate::app::{CommentView, MediaGateway, PostView};
use crate::domain::entities::{
    Address, Comment, CommentId, Post, PostId, Proposal, ProposalId, Subgroup, SubgroupId, User,
    Viewer,
};

pub const VIEWER_ADDRESS: &str = "0xViewer000000000000000000000000000000001";
pub const AUTHOR_ADDRESS: &str = "0xAuthor000000000000000000000000000000002";

pub fn test_viewer() -> Viewer {
    Viewer::new(Address::new(VIEWER_ADDRESS))
}

pub fn test_media() -> MediaGateway {
    MediaGateway::new("https://gateway.test")
}

/// A registered account with no activity
pub fn test_user(address: &str) -> User {
    User {
        address: Address::new(address),
        exists: true,
        image_hash: format!(
            "QmAvatar{}",
            address.trim_start_matches("0x").chars().take(6).collect::<String>()
        ),
        ..Default::default()
    }
}

/// A live post with no comments and no image
pub fn test_post(id: u64, author: &str, title: &str, description: &str) -> Post {
    Post {
        id: PostId(id),
        author: Address::new(author),
        title: title.to_string(),
        description: description.to_string(),
        image_hash: None,
        comment_ids: Vec::new(),
        like_count: 0,
        is_deleted: false,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

pub fn test_deleted_post(id: u64, author: &str) -> Post {
    Post {
        is_deleted: true,
        ..test_post(id, author, "removed", "removed")
    }
}

pub fn test_comment(id: u64, post: u64, author: &str, content: &str) -> Comment {
    Comment {
        id: CommentId(id),
        author: Address::new(author),
        content: content.to_string(),
        post_id: PostId(post),
        is_deleted: false,
        created_at: Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap(),
    }
}

pub fn test_subgroup(id: u64, name: &str, posts: &[u64]) -> Subgroup {
    Subgroup {
        id: SubgroupId(id),
        name: name.to_string(),
        subscriber_count: 0,
        post_ids: posts.iter().copied().map(PostId).collect(),
    }
}

pub fn test_proposal(id: u64, subgroup: u64, executed: bool, deadline: u64) -> Proposal {
    Proposal {
        id: ProposalId(id),
        subgroup_id: SubgroupId(subgroup),
        proposer: Address::new(AUTHOR_ADDRESS),
        description: format!("Proposal {}", id),
        votes_for: 0,
        votes_against: 0,
        vote_threshold: 2,
        executed,
        deadline,
    }
}

/// A bare view model for the pure search/filter tests
pub fn test_post_view(id: u64, title: &str, description: &str) -> PostView {
    PostView {
        id: PostId(id),
        author: Address::new(AUTHOR_ADDRESS),
        author_avatar: "QmAvatar".to_string(),
        author_avatar_url: "https://gateway.test/ipfs/QmAvatar".to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image: None,
        image_url: None,
        comments: Vec::<CommentView>::new(),
        is_following_author: false,
        is_blurred: false,
    }
}
