// Interest Signals - one-sided expressions of interest

use serde::{Deserialize, Serialize};

/// Job seeker identifier
pub type SeekerId = i64;

/// Job posting identifier
pub type JobId = i64;

/// Swipe row identifier (assigned by the datastore)
pub type SwipeId = i64;

/// Recruiter interest row identifier (assigned by the datastore)
pub type InterestId = i64;

/// A seeker's decision on a job posting.
///
/// At most one swipe exists per (seeker, job) pair; a second swipe is
/// rejected rather than overwriting the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swipe {
    pub id: SwipeId,
    pub seeker_id: SeekerId,
    pub job_id: JobId,
    pub liked: bool,
    pub created_at: i64, // epoch ms
}

/// Recruiter-side interest in a seeker for a specific job.
///
/// Repeated submissions for the same pair collapse into one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruiterInterest {
    pub id: InterestId,
    pub seeker_id: SeekerId,
    pub job_id: JobId,
    pub created_at: i64, // epoch ms
}
