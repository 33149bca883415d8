//! Governance handlers
//!
//! Proposal boards, a live board stream, poll creation and voting.

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Extension, Json,
};
use futures::stream::{Stream, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::WatchStream;

use crate::app::{ProposalBoard, ProposalPoller};
use crate::domain::entities::{ProposalId, SubgroupId, Viewer};
use crate::error::AppError;
use crate::AppState;

/// GET /subgroups/:id/proposals
pub async fn get_proposals(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ProposalBoard>, AppError> {
    let board = state.governance_service.board(SubgroupId(id)).await?;
    Ok(Json(board))
}

/// GET /subgroups/:id/proposals/stream
///
/// Server-sent `board` events, one per successful poll. The poller lives as
/// long as the stream; a client disconnect drops both.
pub async fn stream_proposals(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let subgroup = SubgroupId(id);
    state.subgroup_service.load(subgroup).await?;

    let poller = ProposalPoller::start(
        state.governance_service.clone(),
        subgroup,
        state.config.proposal_poll_interval,
    );
    let rx = poller.subscribe();

    let events = WatchStream::new(rx).filter_map(move |board| {
        // Owning the poller here ties its lifetime to the response stream
        let _poller = &poller;
        let event = board.and_then(|board| {
            Event::default()
                .event("board")
                .json_data(&board)
                .map_err(|e| tracing::warn!(error = %e, "Failed to encode proposal board"))
                .ok()
                .map(Ok)
        });
        async move { event }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

#[derive(Debug, Deserialize)]
pub struct CreateProposalRequest {
    pub description: String,
}

/// POST /subgroups/:id/proposals
///
/// The vote threshold is the subgroup's current subscriber count.
pub async fn create_proposal(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<u64>,
    Json(body): Json<CreateProposalRequest>,
) -> Result<StatusCode, AppError> {
    state
        .governance_service
        .create_proposal(&viewer, SubgroupId(id), &body.description)
        .await?;
    Ok(StatusCode::CREATED)
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub support: bool,
}

/// POST /proposals/:id/vote
pub async fn vote(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<u64>,
    Json(body): Json<VoteRequest>,
) -> Result<StatusCode, AppError> {
    state
        .governance_service
        .vote(&viewer, ProposalId(id), body.support)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
