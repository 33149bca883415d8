//! Domain entities
//!
//! Typed records for everything the Data Provider returns. Wire formats are
//! converted into these at the adapter boundary.

pub mod comment;
pub mod post;
pub mod proposal;
pub mod subgroup;
pub mod user;
pub mod viewer;

pub use comment::{Comment, CommentId};
pub use post::{NewPost, Post, PostId};
pub use proposal::{Proposal, ProposalId};
pub use subgroup::{Subgroup, SubgroupId};
pub use user::{Address, User};
pub use viewer::Viewer;
