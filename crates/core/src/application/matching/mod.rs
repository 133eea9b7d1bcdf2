// Match Engine - turns one-sided interest signals into tracked matches

pub(crate) mod pipeline;
pub(crate) mod signal;

#[cfg(test)]
mod engine_test;

use crate::application::policy::TransitionPolicy;
use crate::domain::{JobId, Match, MatchId, RecruiterInterest, SeekerId, Swipe};
use crate::error::{AppError, Result};
use crate::port::{Datastore, TimeProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of recording a seeker swipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeOutcome {
    pub swipe: Swipe,
    /// Present when the swipe completed (or found) a match
    pub matched: Option<Match>,
}

/// Result of recording a recruiter interest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestOutcome {
    pub interest: RecruiterInterest,
    /// false when an earlier interest for the pair absorbed this one
    pub created: bool,
    pub matched: Option<Match>,
}

/// Match Engine
///
/// Stateless between calls: every rule is evaluated against the injected
/// datastore, and uniqueness under concurrency is delegated to it.
pub struct MatchEngine {
    datastore: Arc<dyn Datastore>,
    time_provider: Arc<dyn TimeProvider>,
    policy: TransitionPolicy,
}

impl MatchEngine {
    pub fn new(datastore: Arc<dyn Datastore>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            datastore,
            time_provider,
            policy: TransitionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Record a seeker's swipe; a liked swipe completes a pending match
    pub async fn record_seeker_swipe(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        liked: bool,
    ) -> Result<SwipeOutcome> {
        validate_pair(seeker_id, job_id)?;
        signal::record_seeker_swipe(
            self.datastore.as_ref(),
            self.time_provider.as_ref(),
            seeker_id,
            job_id,
            liked,
        )
        .await
    }

    /// Record recruiter interest; repeat calls for a pair are absorbed
    pub async fn record_recruiter_interest(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
    ) -> Result<InterestOutcome> {
        validate_pair(seeker_id, job_id)?;
        signal::record_recruiter_interest(
            self.datastore.as_ref(),
            self.time_provider.as_ref(),
            seeker_id,
            job_id,
        )
        .await
    }

    /// Return the pair's match, creating it with status `new` if absent.
    ///
    /// This is the only path that creates matches. It does not check the
    /// interest signals; callers do that first.
    pub(crate) async fn ensure_match(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Match> {
        validate_pair(seeker_id, job_id)?;
        signal::ensure_match(
            self.datastore.as_ref(),
            self.time_provider.as_ref(),
            seeker_id,
            job_id,
        )
        .await
    }

    /// Move a match to `new_status` under the configured policy
    pub async fn transition_match_status(&self, match_id: MatchId, new_status: &str) -> Result<Match> {
        pipeline::transition_match_status(self.datastore.as_ref(), self.policy, match_id, new_status)
            .await
    }

    /// Matches of a seeker, newest first
    pub async fn list_matches_for_seeker(
        &self,
        seeker_id: SeekerId,
        status_filter: Option<&str>,
    ) -> Result<Vec<Match>> {
        pipeline::list_matches_for_seeker(self.datastore.as_ref(), seeker_id, status_filter).await
    }

    pub async fn find_match_for_pair(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
    ) -> Result<Option<Match>> {
        self.datastore.find_match(seeker_id, job_id).await
    }

    pub async fn list_swipes_for_seeker(&self, seeker_id: SeekerId) -> Result<Vec<Swipe>> {
        self.datastore.list_swipes(seeker_id).await
    }

    pub async fn list_interests_for_job(&self, job_id: JobId) -> Result<Vec<RecruiterInterest>> {
        self.datastore.list_recruiter_interests(job_id).await
    }
}

fn validate_pair(seeker_id: SeekerId, job_id: JobId) -> Result<()> {
    if seeker_id <= 0 {
        return Err(AppError::Validation(format!(
            "seeker_id must be positive, got {}",
            seeker_id
        )));
    }
    if job_id <= 0 {
        return Err(AppError::Validation(format!(
            "job_id must be positive, got {}",
            job_id
        )));
    }
    Ok(())
}
