//! RPC Method Handlers
//!
//! Thin adapters from RPC params to match engine operations.

use crate::error::to_rpc_error;
use crate::types::{
    ListInterestsRequest, ListInterestsResponse, ListMatchesRequest, ListMatchesResponse,
    ListSwipesRequest, ListSwipesResponse, RecordInterestRequest, RecordInterestResponse,
    RecordSwipeRequest, RecordSwipeResponse, TransitionMatchRequest, TransitionMatchResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use swipematch_core::application::MatchEngine;

/// RPC Handler with injected engine
pub struct RpcHandler {
    engine: Arc<MatchEngine>,
}

impl RpcHandler {
    pub fn new(engine: Arc<MatchEngine>) -> Self {
        Self { engine }
    }

    /// swipe.record.v1
    pub async fn record_swipe(
        &self,
        params: RecordSwipeRequest,
    ) -> Result<RecordSwipeResponse, ErrorObjectOwned> {
        let outcome = self
            .engine
            .record_seeker_swipe(params.seeker_id, params.job_id, params.liked)
            .await
            .map_err(to_rpc_error)?;

        Ok(RecordSwipeResponse {
            swipe: outcome.swipe,
            matched: outcome.matched,
        })
    }

    /// swipe.list.v1
    pub async fn list_swipes(
        &self,
        params: ListSwipesRequest,
    ) -> Result<ListSwipesResponse, ErrorObjectOwned> {
        let swipes = self
            .engine
            .list_swipes_for_seeker(params.seeker_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(ListSwipesResponse { swipes })
    }

    /// interest.record.v1
    pub async fn record_interest(
        &self,
        params: RecordInterestRequest,
    ) -> Result<RecordInterestResponse, ErrorObjectOwned> {
        let outcome = self
            .engine
            .record_recruiter_interest(params.seeker_id, params.job_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(RecordInterestResponse {
            interest: outcome.interest,
            created: outcome.created,
            matched: outcome.matched,
        })
    }

    /// interest.list.v1
    pub async fn list_interests(
        &self,
        params: ListInterestsRequest,
    ) -> Result<ListInterestsResponse, ErrorObjectOwned> {
        let interests = self
            .engine
            .list_interests_for_job(params.job_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(ListInterestsResponse { interests })
    }

    /// match.transition.v1
    pub async fn transition_match(
        &self,
        params: TransitionMatchRequest,
    ) -> Result<TransitionMatchResponse, ErrorObjectOwned> {
        let matched = self
            .engine
            .transition_match_status(params.match_id, &params.status)
            .await
            .map_err(to_rpc_error)?;

        Ok(TransitionMatchResponse { matched })
    }

    /// match.list.v1
    pub async fn list_matches(
        &self,
        params: ListMatchesRequest,
    ) -> Result<ListMatchesResponse, ErrorObjectOwned> {
        let matches = self
            .engine
            .list_matches_for_seeker(params.seeker_id, params.status.as_deref())
            .await
            .map_err(to_rpc_error)?;

        Ok(ListMatchesResponse { matches })
    }
}
