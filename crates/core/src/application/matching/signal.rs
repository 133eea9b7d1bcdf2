// Interest signal use cases: seeker swipe, recruiter interest, match formation

use super::{InterestOutcome, SwipeOutcome};
use crate::domain::{DomainError, JobId, Match, MatchStatus, SeekerId};
use crate::error::{AppError, Result};
use crate::port::{Datastore, TimeProvider};
use tracing::{debug, info, warn};

/// Persist a swipe and, if liked, form the match when the recruiter side is present
///
/// # Errors
/// - `DomainError::DuplicateSwipe` if the pair was already swiped, in either direction
pub async fn record_seeker_swipe(
    datastore: &dyn Datastore,
    time_provider: &dyn TimeProvider,
    seeker_id: SeekerId,
    job_id: JobId,
    liked: bool,
) -> Result<SwipeOutcome> {
    if datastore.find_swipe(seeker_id, job_id).await?.is_some() {
        warn!(seeker_id, job_id, "Duplicate swipe rejected");
        return Err(DomainError::DuplicateSwipe { seeker_id, job_id }.into());
    }

    let created_at = time_provider.now_millis();
    let swipe = match datastore
        .create_swipe(seeker_id, job_id, liked, created_at)
        .await
    {
        Ok(swipe) => swipe,
        // Lost a race against a concurrent swipe for the same pair
        Err(AppError::Conflict(_)) => {
            warn!(seeker_id, job_id, "Duplicate swipe rejected at insert");
            return Err(DomainError::DuplicateSwipe { seeker_id, job_id }.into());
        }
        Err(e) => return Err(e),
    };

    debug!(seeker_id, job_id, liked, swipe_id = swipe.id, "Swipe recorded");

    // A rejection never forms a match
    if !liked {
        return Ok(SwipeOutcome {
            swipe,
            matched: None,
        });
    }

    let matched = match datastore.find_recruiter_interest(seeker_id, job_id).await? {
        Some(_) => Some(ensure_match(datastore, time_provider, seeker_id, job_id).await?),
        None => None,
    };

    Ok(SwipeOutcome { swipe, matched })
}

/// Persist recruiter interest (idempotent) and form the match when the seeker liked the job
pub async fn record_recruiter_interest(
    datastore: &dyn Datastore,
    time_provider: &dyn TimeProvider,
    seeker_id: SeekerId,
    job_id: JobId,
) -> Result<InterestOutcome> {
    let (interest, created) = match datastore.find_recruiter_interest(seeker_id, job_id).await? {
        Some(existing) => {
            debug!(
                seeker_id,
                job_id,
                interest_id = existing.id,
                "Recruiter interest already recorded"
            );
            (existing, false)
        }
        None => {
            let created_at = time_provider.now_millis();
            let interest = datastore
                .create_recruiter_interest(seeker_id, job_id, created_at)
                .await?;
            debug!(
                seeker_id,
                job_id,
                interest_id = interest.id,
                "Recruiter interest recorded"
            );
            (interest, true)
        }
    };

    let matched = match datastore.find_swipe(seeker_id, job_id).await? {
        Some(swipe) if swipe.liked => {
            Some(ensure_match(datastore, time_provider, seeker_id, job_id).await?)
        }
        _ => None,
    };

    Ok(InterestOutcome {
        interest,
        created,
        matched,
    })
}

/// Fetch the pair's match or create it with status `new`
pub async fn ensure_match(
    datastore: &dyn Datastore,
    time_provider: &dyn TimeProvider,
    seeker_id: SeekerId,
    job_id: JobId,
) -> Result<Match> {
    if let Some(existing) = datastore.find_match(seeker_id, job_id).await? {
        debug!(seeker_id, job_id, match_id = existing.id, "Match already exists");
        return Ok(existing);
    }

    let created_at = time_provider.now_millis();
    // Insert-or-fetch: a concurrent creator's row comes back unchanged
    let m = datastore
        .create_match(seeker_id, job_id, MatchStatus::New, created_at)
        .await?;

    info!(
        seeker_id,
        job_id,
        match_id = m.id,
        status = %m.status,
        "Match formed"
    );

    Ok(m)
}
