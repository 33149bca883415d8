//! Contract gateway client
//!
//! Implements the Data Provider over a JSON gateway that fronts the social
//! and governance contracts. Reads are plain GETs; writes are submitted as
//! `POST /tx/{method}` and resolve when the transaction was accepted.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use urlencoding::encode;

use super::records::{
    CommentRecord, CountResponse, LikedResponse, PostRecord, ProposalRecord, SubgroupRecord,
    SubscribedResponse, TxRequest, TxResponse, UserRecord,
};
use crate::domain::entities::{
    Address, Comment, CommentId, NewPost, Post, PostId, Proposal, ProposalId, Subgroup,
    SubgroupId, User,
};
use crate::domain::ports::DataProvider;
use crate::error::ProviderError;

pub struct ChainGatewayClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ChainGatewayClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ProviderError> {
        let resp = self
            .authorized(self.http.get(self.api_url(path)))
            .send()
            .await?;
        self.handle_response(resp, path).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ProviderError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidRecord(format!("{}: {}", path, e)))
        } else if status.as_u16() == 401 {
            Err(ProviderError::Unauthorized)
        } else if status.as_u16() == 404 {
            Err(ProviderError::NotFound(path.to_string()))
        } else if status.as_u16() == 429 {
            Err(ProviderError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Submit a state-changing call on behalf of `from`
    async fn submit(&self, from: &Address, method: &str, args: Vec<Value>) -> Result<(), ProviderError> {
        let path = format!("/tx/{}", method);
        let resp = self
            .authorized(self.http.post(self.api_url(&path)))
            .json(&TxRequest {
                from: from.as_str(),
                args,
            })
            .send()
            .await?;

        let tx: TxResponse = self.handle_response(resp, &path).await?;
        tracing::debug!(
            method = %method,
            from = %from,
            tx_hash = tx.transaction_hash.as_deref().unwrap_or("-"),
            "Transaction accepted"
        );
        Ok(())
    }

    async fn count(&self, path: &str) -> Result<u64, ProviderError> {
        let resp: CountResponse = self.get_json(path).await?;
        resp.count.value("count")
    }
}

fn id_arg(id: u64) -> Value {
    Value::String(id.to_string())
}

#[async_trait]
impl DataProvider for ChainGatewayClient {
    async fn get_user(&self, address: &Address) -> Result<User, ProviderError> {
        let path = format!("/users/{}", encode(address.as_str()));
        match self.get_json::<UserRecord>(&path).await {
            Ok(record) => record.into_user(address),
            // Unknown accounts are not an error for the contract
            Err(ProviderError::NotFound(_)) => Ok(User {
                address: address.clone(),
                ..Default::default()
            }),
            Err(e) => Err(e),
        }
    }

    async fn post_count(&self) -> Result<u64, ProviderError> {
        self.count("/posts/count").await
    }

    async fn get_post(&self, id: PostId) -> Result<Post, ProviderError> {
        let record: PostRecord = self.get_json(&format!("/posts/{}", id)).await?;
        record.into_post(id)
    }

    async fn get_comment(&self, id: CommentId) -> Result<Comment, ProviderError> {
        let record: CommentRecord = self.get_json(&format!("/comments/{}", id)).await?;
        record.into_comment(id)
    }

    async fn has_liked(&self, post: PostId, account: &Address) -> Result<bool, ProviderError> {
        let resp: LikedResponse = self
            .get_json(&format!("/posts/{}/likes/{}", post, encode(account.as_str())))
            .await?;
        Ok(resp.liked)
    }

    async fn subgroup_count(&self) -> Result<u64, ProviderError> {
        self.count("/subgroups/count").await
    }

    async fn get_subgroup(&self, id: SubgroupId) -> Result<Subgroup, ProviderError> {
        match self
            .get_json::<SubgroupRecord>(&format!("/subgroups/{}", id))
            .await
        {
            Ok(record) => record.into_subgroup(id),
            // Same zeroed struct the contract returns for unknown ids
            Err(ProviderError::NotFound(_)) => Ok(Subgroup {
                id,
                name: String::new(),
                subscriber_count: 0,
                post_ids: Vec::new(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn is_subscribed(
        &self,
        subgroup: SubgroupId,
        account: &Address,
    ) -> Result<bool, ProviderError> {
        let resp: SubscribedResponse = self
            .get_json(&format!(
                "/subgroups/{}/subscribers/{}",
                subgroup,
                encode(account.as_str())
            ))
            .await?;
        Ok(resp.subscribed)
    }

    async fn proposal_count(&self) -> Result<u64, ProviderError> {
        self.count("/governance/proposals/count").await
    }

    async fn get_proposal(&self, id: ProposalId) -> Result<Proposal, ProviderError> {
        let record: ProposalRecord = self
            .get_json(&format!("/governance/proposals/{}", id))
            .await?;
        record.into_proposal(id)
    }

    async fn create_user(&self, from: &Address, image_hash: &str) -> Result<(), ProviderError> {
        self.submit(from, "createUser", vec![json!(image_hash)])
            .await
    }

    async fn create_post(&self, from: &Address, post: &NewPost) -> Result<(), ProviderError> {
        let subgroups: Vec<Value> = post.subgroup_ids.iter().map(|s| id_arg(s.0)).collect();
        self.submit(
            from,
            "createPost",
            vec![
                json!(post.title),
                Value::Array(subgroups),
                json!(post.description),
                json!(post.image_hash.as_deref().unwrap_or("")),
            ],
        )
        .await
    }

    async fn add_comment(
        &self,
        from: &Address,
        post: PostId,
        content: &str,
    ) -> Result<(), ProviderError> {
        self.submit(from, "addComment", vec![id_arg(post.0), json!(content)])
            .await
    }

    async fn create_subgroup(&self, from: &Address, name: &str) -> Result<(), ProviderError> {
        self.submit(from, "createSubgroup", vec![json!(name)]).await
    }

    async fn like_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError> {
        self.submit(from, "likePost", vec![id_arg(post.0)]).await
    }

    async fn unlike_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError> {
        self.submit(from, "unlikePost", vec![id_arg(post.0)]).await
    }

    async fn save_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError> {
        self.submit(from, "savePost", vec![id_arg(post.0)]).await
    }

    async fn unsave_post(&self, from: &Address, post: PostId) -> Result<(), ProviderError> {
        self.submit(from, "unsavePost", vec![id_arg(post.0)]).await
    }

    async fn follow_user(&self, from: &Address, target: &Address) -> Result<(), ProviderError> {
        self.submit(from, "followUser", vec![json!(target.as_str())])
            .await
    }

    async fn unfollow_user(
        &self,
        from: &Address,
        target: &Address,
    ) -> Result<(), ProviderError> {
        self.submit(from, "unfollowUser", vec![json!(target.as_str())])
            .await
    }

    async fn join_subgroup(
        &self,
        from: &Address,
        subgroup: SubgroupId,
    ) -> Result<(), ProviderError> {
        self.submit(from, "joinSubgroup", vec![id_arg(subgroup.0)])
            .await
    }

    async fn leave_subgroup(
        &self,
        from: &Address,
        subgroup: SubgroupId,
    ) -> Result<(), ProviderError> {
        self.submit(from, "leaveSubgroup", vec![id_arg(subgroup.0)])
            .await
    }

    async fn create_proposal(
        &self,
        from: &Address,
        description: &str,
        vote_threshold: u64,
        subgroup: SubgroupId,
    ) -> Result<(), ProviderError> {
        self.submit(
            from,
            "createProposal",
            vec![
                json!(description),
                id_arg(vote_threshold),
                id_arg(subgroup.0),
            ],
        )
        .await
    }

    async fn vote(
        &self,
        from: &Address,
        proposal: ProposalId,
        support: bool,
    ) -> Result<(), ProviderError> {
        self.submit(from, "vote", vec![id_arg(proposal.0), json!(support)])
            .await
    }
}
