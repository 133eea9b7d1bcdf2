// Match pipeline use cases: status transitions and listings

use crate::application::policy::TransitionPolicy;
use crate::domain::{DomainError, Match, MatchId, MatchStatus, SeekerId};
use crate::error::{AppError, Result};
use crate::port::Datastore;
use tracing::{debug, info, warn};

const MAX_TRANSITION_ATTEMPTS: usize = 5;

/// Validate and apply a status change
///
/// # Errors
/// - `DomainError::InvalidStatus` if `new_status` is not a pipeline status
/// - `DomainError::MatchNotFound` if no match has `match_id`
/// - `DomainError::InvalidTransition` if the policy refuses the move
/// - `AppError::Conflict` if concurrent writers keep changing the status
pub async fn transition_match_status(
    datastore: &dyn Datastore,
    policy: TransitionPolicy,
    match_id: MatchId,
    new_status: &str,
) -> Result<Match> {
    let target: MatchStatus = new_status.parse().map_err(|e| {
        warn!(match_id, status = new_status, "Unknown match status rejected");
        e
    })?;

    // The write only lands if the status is still the one the policy saw;
    // otherwise re-read and judge the move again
    for _ in 0..MAX_TRANSITION_ATTEMPTS {
        let mut current = datastore
            .find_match_by_id(match_id)
            .await?
            .ok_or(DomainError::MatchNotFound(match_id))?;

        let from = current.status;
        policy.apply(&mut current, target)?;

        let Some(updated) = datastore
            .update_match_status(match_id, from, current.status)
            .await?
        else {
            debug!(match_id, from = %from, "Match status moved underneath transition, retrying");
            continue;
        };

        info!(
            match_id,
            seeker_id = updated.seeker_id,
            job_id = updated.job_id,
            from = %from,
            to = %updated.status,
            "Match status changed"
        );

        return Ok(updated);
    }

    warn!(match_id, status = %target, "Match status kept changing, giving up");
    Err(AppError::Conflict(format!(
        "match {} changed concurrently {} times",
        match_id, MAX_TRANSITION_ATTEMPTS
    )))
}

/// Matches of a seeker, newest first, optionally restricted to one status
///
/// # Errors
/// - `DomainError::InvalidStatus` if the filter is not a pipeline status
pub async fn list_matches_for_seeker(
    datastore: &dyn Datastore,
    seeker_id: SeekerId,
    status_filter: Option<&str>,
) -> Result<Vec<Match>> {
    let status = status_filter
        .map(|s| s.parse::<MatchStatus>())
        .transpose()?;

    datastore.list_matches(seeker_id, status).await
}
