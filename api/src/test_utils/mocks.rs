//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Address, Comment, CommentId, NewPost, Post, PostId, Proposal, ProposalId, Subgroup,
    SubgroupId, User,
};
use crate::domain::ports::{
    DataProvider, FileStore, ImageUpload, SentimentClassifier, SentimentLabel,
};
use crate::error::{ClassifierError, ProviderError, UploadError};

fn key(address: &Address) -> String {
    address.as_str().to_lowercase()
}

fn mock_failure(what: &str) -> ProviderError {
    ProviderError::Api {
        status: 503,
        message: format!("Mock failure: {}", what),
    }
}

fn revert(reason: &str) -> ProviderError {
    ProviderError::Api {
        status: 500,
        message: format!("execution reverted: {}", reason),
    }
}

// ============================================================================
// In-Memory Data Provider
// ============================================================================

#[derive(Default)]
pub struct InMemoryDataProvider {
    users: Arc<RwLock<HashMap<String, User>>>,
    posts: Arc<RwLock<BTreeMap<PostId, Post>>>,
    comments: Arc<RwLock<BTreeMap<CommentId, Comment>>>,
    likes: Arc<RwLock<HashSet<(PostId, String)>>>,
    subgroups: Arc<RwLock<BTreeMap<SubgroupId, Subgroup>>>,
    subscriptions: Arc<RwLock<HashSet<(SubgroupId, String)>>>,
    proposals: Arc<RwLock<BTreeMap<ProposalId, Proposal>>>,
    failing_posts: Arc<RwLock<HashSet<PostId>>>,
    should_fail_reads: Arc<RwLock<bool>>,
    should_fail_writes: Arc<RwLock<bool>>,
    /// Log of accepted writes, e.g. "like_post 3"
    pub writes: Arc<RwLock<Vec<String>>>,
    proposal_count_calls: Arc<AtomicUsize>,
}

impl InMemoryDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(key(&user.address), user);
        self
    }

    pub fn with_post(self, post: Post) -> Self {
        self.posts.write().unwrap().insert(post.id, post);
        self
    }

    /// Add a comment and attach it to its post (post must be added first)
    pub fn with_comment(self, comment: Comment) -> Self {
        if let Some(post) = self.posts.write().unwrap().get_mut(&comment.post_id) {
            post.comment_ids.push(comment.id);
        }
        self.comments.write().unwrap().insert(comment.id, comment);
        self
    }

    pub fn with_like(self, post: PostId, account: &str) -> Self {
        self.likes
            .write()
            .unwrap()
            .insert((post, account.to_lowercase()));
        if let Some(p) = self.posts.write().unwrap().get_mut(&post) {
            p.like_count += 1;
        }
        self
    }

    pub fn with_subgroup(self, subgroup: Subgroup) -> Self {
        self.subgroups.write().unwrap().insert(subgroup.id, subgroup);
        self
    }

    pub fn with_subscription(self, subgroup: SubgroupId, account: &str) -> Self {
        self.subscriptions
            .write()
            .unwrap()
            .insert((subgroup, account.to_lowercase()));
        self
    }

    pub fn with_proposal(self, proposal: Proposal) -> Self {
        self.insert_proposal(proposal);
        self
    }

    /// Reading this post fails
    pub fn failing_on_post(self, post: PostId) -> Self {
        self.failing_posts.write().unwrap().insert(post);
        self
    }

    pub fn failing_reads(self) -> Self {
        *self.should_fail_reads.write().unwrap() = true;
        self
    }

    pub fn failing_writes(self) -> Self {
        self.set_fail_writes(true);
        self
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.should_fail_writes.write().unwrap() = fail;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.should_fail_reads.write().unwrap() = fail;
    }

    pub fn insert_proposal(&self, proposal: Proposal) {
        self.proposals.write().unwrap().insert(proposal.id, proposal);
    }

    pub fn user(&self, address: &str) -> Option<User> {
        self.users
            .read()
            .unwrap()
            .get(&address.to_lowercase())
            .cloned()
    }

    pub fn post(&self, id: PostId) -> Option<Post> {
        self.posts.read().unwrap().get(&id).cloned()
    }

    pub fn subgroup(&self, id: SubgroupId) -> Option<Subgroup> {
        self.subgroups.read().unwrap().get(&id).cloned()
    }

    pub fn proposal(&self, id: ProposalId) -> Option<Proposal> {
        self.proposals.read().unwrap().get(&id).cloned()
    }

    pub fn write_log(&self) -> Vec<String> {
        self.writes.read().unwrap().clone()
    }

    pub fn proposal_count_calls(&self) -> usize {
        self.proposal_count_calls.load(Ordering::SeqCst)
    }

    fn check_read(&self, what: &str) -> Result<(), ProviderError> {
        if *self.should_fail_reads.read().unwrap() {
            return Err(mock_failure(what));
        }
        Ok(())
    }

    fn check_write(&self, entry: String) -> Result<(), ProviderError> {
        if *self.should_fail_writes.read().unwrap() {
            return Err(revert("mock write failure"));
        }
        self.writes.write().unwrap().push(entry);
        Ok(())
    }

    fn user_mut<F>(&self, address: &Address, f: F)
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().unwrap();
        let user = users.entry(key(address)).or_insert_with(|| User {
            address: address.clone(),
            ..Default::default()
        });
        f(user);
    }
}

#[async_trait]
impl DataProvider for InMemoryDataProvider {
    async fn get_user(&self, address: &Address) -> Result<User, ProviderError> {
        self.check_read("get_user")?;
        Ok(self
            .users
            .read()
            .unwrap()
            .get(&key(address))
            .cloned()
            .unwrap_or_else(|| User {
                address: address.clone(),
                ..Default::default()
            }))
    }

    async fn post_count(&self) -> Result<u64, ProviderError> {
        self.check_read("post_count")?;
        Ok(self
            .posts
            .read()
            .unwrap()
            .keys()
            .next_back()
            .map(|id| id.0)
            .unwrap_or(0))
    }

    async fn get_post(&self, id: PostId) -> Result<Post, ProviderError> {
        self.check_read("get_post")?;
        if self.failing_posts.read().unwrap().contains(&id) {
            return Err(mock_failure(&format!("get_post {}", id)));
        }
        self.posts
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("post {}", id)))
    }

    async fn get_comment(&self, id: CommentId) -> Result<Comment, ProviderError> {
        self.check_read("get_comment")?;
        self.comments
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("comment {}", id)))
    }

    async fn has_liked(&self, post: PostId, account: &Address) -> Result<bool, ProviderError> {
        self.check_read("has_liked")?;
        Ok(self.likes.read().unwrap().contains(&(post, key(account))))
    }

    async fn subgroup_count(&self) -> Result<u64, ProviderError> {
        self.check_read("subgroup_count")?;
        Ok(self
            .subgroups
            .read()
            .unwrap()
            .keys()
            .next_back()
            .map(|id| id.0)
            .unwrap_or(0))
    }

    async fn get_subgroup(&self, id: SubgroupId) -> Result<Subgroup, ProviderError> {
        self.check_read("get_subgroup")?;
        // The contract answers unknown ids with a zeroed struct
        Ok(self
            .subgroups
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or(Subgroup {
                id,
                name: String::new(),
                subscriber_count: 0,
                post_ids: Vec::new(),
            }))
    }

    async fn is_subscribed(
        &self,
        subgroup: SubgroupId,
        account: &Address,
    ) -> Result<bool, ProviderError> {
        self.check_read("is_subscribed")?;
        Ok(self
            .subscriptions
            .read()
            .unwrap()
            .contains(&(subgroup, key(account))))
    }

    async fn proposal_count(&self) -> Result<u64, ProviderError> {
        self.proposal_count_calls.fetch_add(1, Ordering::SeqCst);
        self.check_read("proposal_count")?;
        Ok(self
            .proposals
            .read()
            .unwrap()
            .keys()
            .next_back()
            .map(|id| id.0)
            .unwrap_or(0))
    }

    async fn get_proposal(&self, id: ProposalId) -> Result<Proposal, ProviderError> {
        self.check_read("get_proposal")?;
        self.proposals
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("proposal {}", id)))
    }

    async fn create_user(&self, from: &Address, image_hash: &str) -> Result<(), ProviderError> {
        if self.user(from.as_str()).map(|u| u.exists).unwrap_or(false) {
            return Err(revert("user already exists"));
        }
        self.check_write(format!("create_user {}", image_hash))?;
        self.user_mut(from, |user| {
            user.exists = true;
            user.image_hash = image_hash.to_string();
        });
        Ok(())
    }

    async fn create_post(&self, from: &Address, post: &NewPost) -> Result<(), ProviderError> {
        self.check_write(format!("create_post {}", post.title))?;
        let id = {
            let mut posts = self.posts.write().unwrap();
            let id = PostId(posts.keys().next_back().map(|id| id.0).unwrap_or(0) + 1);
            posts.insert(
                id,
                Post {
                    id,
                    author: from.clone(),
                    title: post.title.clone(),
                    description: post.description.clone(),
                    image_hash: post.image_hash.clone(),
                    comment_ids: Vec::new(),
                    like_count: 0,
                    is_deleted: false,
                    created_at: Utc::now(),
                },
            );
            id
        };
        {
            let mut subgroups = self.subgroups.write().unwrap();
            for sg in &post.subgroup_ids {
                if let Some(subgroup) = subgroups.get_mut(sg) {
                    subgroup.post_ids.push(id);
                }
            }
        }
        self.user_mut(from, |user| user.authored_posts.push(id));
        Ok(())
    }

    async fn add_comment(
        &self,
        from: &Address,
        post: PostId,
        content: &str,
    ) -> Result<(), ProviderError> {
        self.check_write(format!("add_comment {}", post))?;
        let id = {
            let mut comments = self.comments.write().unwrap();
            let id = CommentId(comments.keys().next_back().map(|id| id.0).unwrap_or(0) + 1);
            comments.insert(
                id,
                Comment {
                    id,
                    author: from.clone(),
                    content: content.to_string(),
                    post_id: post,
                    is_deleted: false,
                    created_at: Utc::now(),
                },
            );
            id
        };
        if let Some(p) = self.posts.write().unwrap().get_mut(&post) {
            p.comment_ids.push(id);
        }
        self.user_mut(from, |user| user.authored_comments.push(id));
        Ok(())
    }

    async fn create_subgroup(&self, from: &Address, name: &str) -> Result<(), ProviderError> {
        self.check_write(format!("create_subgroup {} by {}", name, from))?;
        let mut subgroups = self.subgroups.write().unwrap();
        let id = SubgroupId(subgroups.keys().next_back().map(|id| id.0).unwrap_or(0) + 1);
        subgroups.insert(
            id,
            Subgroup {
                id,
                name: name.to_string(),
                subscriber_count: 0,
                post_ids: Vec::new(),
            },
        );
        Ok(())
    }

    async fn like_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError> {
        if self.likes.read().unwrap().contains(&(post, key(from))) {
            return Err(revert("already liked"));
        }
        self.check_write(format!("like_post {}", post))?;
        self.likes.write().unwrap().insert((post, key(from)));
        if let Some(p) = self.posts.write().unwrap().get_mut(&post) {
            p.like_count += 1;
        }
        Ok(())
    }

    async fn unlike_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError> {
        if !self.likes.read().unwrap().contains(&(post, key(from))) {
            return Err(revert("not liked"));
        }
        self.check_write(format!("unlike_post {}", post))?;
        self.likes.write().unwrap().remove(&(post, key(from)));
        if let Some(p) = self.posts.write().unwrap().get_mut(&post) {
            p.like_count = p.like_count.saturating_sub(1);
        }
        Ok(())
    }

    async fn save_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError> {
        self.check_write(format!("save_post {}", post))?;
        self.user_mut(from, |user| {
            if !user.saved_posts.contains(&post) {
                user.saved_posts.push(post);
            }
        });
        Ok(())
    }

    async fn unsave_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError> {
        self.check_write(format!("unsave_post {}", post))?;
        self.user_mut(from, |user| user.saved_posts.retain(|p| *p != post));
        Ok(())
    }

    async fn follow_user(&self, from: &Address, target: &Address) -> Result<(), ProviderError> {
        self.check_write(format!("follow_user {}", target))?;
        self.user_mut(target, |user| {
            if !user.is_followed_by(from) {
                user.followers.push(from.clone());
            }
        });
        Ok(())
    }

    async fn unfollow_user(
        &self,
        from: &Address,
        target: &Address,
    ) -> Result<(), ProviderError> {
        self.check_write(format!("unfollow_user {}", target))?;
        self.user_mut(target, |user| {
            user.followers.retain(|f| !f.eq_ignore_case(from));
        });
        Ok(())
    }

    async fn join_subgroup(
        &self,
        from: &Address,
        subgroup: SubgroupId,
    ) -> Result<(), ProviderError> {
        self.check_write(format!("join_subgroup {}", subgroup))?;
        if self
            .subscriptions
            .write()
            .unwrap()
            .insert((subgroup, key(from)))
        {
            if let Some(sg) = self.subgroups.write().unwrap().get_mut(&subgroup) {
                sg.subscriber_count += 1;
            }
            self.user_mut(from, |user| user.joined_subgroups.push(subgroup));
        }
        Ok(())
    }

    async fn leave_subgroup(
        &self,
        from: &Address,
        subgroup: SubgroupId,
    ) -> Result<(), ProviderError> {
        self.check_write(format!("leave_subgroup {}", subgroup))?;
        if self
            .subscriptions
            .write()
            .unwrap()
            .remove(&(subgroup, key(from)))
        {
            if let Some(sg) = self.subgroups.write().unwrap().get_mut(&subgroup) {
                sg.subscriber_count = sg.subscriber_count.saturating_sub(1);
            }
            self.user_mut(from, |user| user.joined_subgroups.retain(|s| *s != subgroup));
        }
        Ok(())
    }

    async fn create_proposal(
        &self,
        from: &Address,
        description: &str,
        vote_threshold: u64,
        subgroup: SubgroupId,
    ) -> Result<(), ProviderError> {
        self.check_write(format!("create_proposal {}", subgroup))?;
        let mut proposals = self.proposals.write().unwrap();
        let id = ProposalId(proposals.keys().next_back().map(|id| id.0).unwrap_or(0) + 1);
        proposals.insert(
            id,
            Proposal {
                id,
                subgroup_id: subgroup,
                proposer: from.clone(),
                description: description.to_string(),
                votes_for: 0,
                votes_against: 0,
                vote_threshold,
                executed: false,
                deadline: Utc::now().timestamp() as u64 + 7 * 24 * 3600,
            },
        );
        Ok(())
    }

    async fn vote(
        &self,
        _from: &Address,
        proposal: ProposalId,
        support: bool,
    ) -> Result<(), ProviderError> {
        self.check_write(format!("vote {} {}", proposal, support))?;
        let mut proposals = self.proposals.write().unwrap();
        let p = proposals
            .get_mut(&proposal)
            .ok_or_else(|| revert("unknown proposal"))?;
        if support {
            p.votes_for += 1;
        } else {
            p.votes_against += 1;
        }
        Ok(())
    }
}

// ============================================================================
// Mock File Store
// ============================================================================

#[derive(Default)]
pub struct MockFileStore {
    pub pinned: Arc<RwLock<Vec<String>>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl MockFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            pinned: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(RwLock::new(true)),
        }
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn pin_file(&self, upload: &ImageUpload) -> Result<String, UploadError> {
        if *self.should_fail.read().unwrap() {
            return Err(UploadError::Api {
                status: 500,
                message: "Mock failure".to_string(),
            });
        }
        let hash = format!("Qm{}", upload.file_name.replace('.', ""));
        self.pinned.write().unwrap().push(hash.clone());
        Ok(hash)
    }
}

// ============================================================================
// Mock Sentiment Classifier
// ============================================================================

/// Labels text containing "hate" as NEGATIVE and everything else POSITIVE
#[derive(Default)]
pub struct MockClassifier {
    /// Texts containing this marker fail to classify
    fail_marker: Option<String>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_marker: Some(marker.to_string()),
        }
    }
}

#[async_trait]
impl SentimentClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifierError> {
        if let Some(marker) = &self.fail_marker {
            if text.contains(marker.as_str()) {
                return Err(ClassifierError::EmptyPrediction);
            }
        }
        let label = if text.to_lowercase().contains("hate") {
            "NEGATIVE"
        } else {
            "POSITIVE"
        };
        Ok(SentimentLabel(label.to_string()))
    }
}
