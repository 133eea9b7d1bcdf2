// Match Domain Model

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::{JobId, MatchStatus, SeekerId};

/// Match row identifier (assigned by the datastore)
pub type MatchId = i64;

/// Two-sided state created once a liked swipe and a recruiter interest
/// exist for the same (seeker, job) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub seeker_id: SeekerId,
    pub job_id: JobId,
    pub status: MatchStatus,
    pub created_at: i64, // epoch ms
}

impl Match {
    /// Move the match to `status` without any ordering check
    pub fn set_status(&mut self, status: MatchStatus) {
        self.status = status;
    }

    /// Move the match strictly forward through the pipeline.
    ///
    /// Skipping stages is allowed; moving backwards is not. Re-applying the
    /// current status is a no-op.
    pub fn advance_to(&mut self, status: MatchStatus) -> crate::domain::error::Result<()> {
        if status == self.status {
            return Ok(());
        }
        if status.rank() < self.status.rank() {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        self.status = status;
        Ok(())
    }
}
