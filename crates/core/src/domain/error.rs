// Domain Error Types

use thiserror::Error;

use super::{JobId, MatchId, SeekerId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Seeker {seeker_id} has already swiped on job {job_id}")]
    DuplicateSwipe { seeker_id: SeekerId, job_id: JobId },

    #[error("Invalid match status: {0}")]
    InvalidStatus(String),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Invalid match status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
