//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod aggregator;
pub mod feed_service;
pub mod governance_service;
pub mod interaction_service;
pub mod profile_service;
pub mod proposal_poller;
pub mod publish_service;
pub mod search;
pub mod sensitivity;
pub mod subgroup_service;

#[allow(unused_imports)]
pub use aggregator::{CommentView, FeedAggregator, MediaGateway, PostView};
pub use feed_service::{FeedPage, FeedService};
pub use governance_service::{GovernanceService, ProposalBoard};
#[allow(unused_imports)]
pub use interaction_service::{CardView, InteractionService, PostCard};
#[allow(unused_imports)]
pub use profile_service::{ActivityItem, ProfileService, ProfileView};
pub use proposal_poller::ProposalPoller;
#[allow(unused_imports)]
pub use publish_service::{parse_subgroup_ids, PostDraft, PublishService};
#[allow(unused_imports)]
pub use search::{search_posts, search_subgroups};
#[allow(unused_imports)]
pub use sensitivity::{is_sensitive, SENSITIVE_KEYWORDS};
pub use subgroup_service::{SubgroupDirectory, SubgroupFeed, SubgroupService};
