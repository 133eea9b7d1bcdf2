//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use serde::{Deserialize, Serialize};
use swipematch_core::domain::{Match, RecruiterInterest, Swipe};

/// swipe.record.v1 - Record a seeker swipe
#[derive(Debug, Deserialize)]
pub struct RecordSwipeRequest {
    pub seeker_id: i64,
    pub job_id: i64,
    pub liked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordSwipeResponse {
    pub swipe: Swipe,
    pub matched: Option<Match>,
}

/// swipe.list.v1 - Swipes of a seeker
#[derive(Debug, Deserialize)]
pub struct ListSwipesRequest {
    pub seeker_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSwipesResponse {
    pub swipes: Vec<Swipe>,
}

/// interest.record.v1 - Record recruiter interest
#[derive(Debug, Deserialize)]
pub struct RecordInterestRequest {
    pub seeker_id: i64,
    pub job_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordInterestResponse {
    pub interest: RecruiterInterest,
    pub created: bool,
    pub matched: Option<Match>,
}

/// interest.list.v1 - Recruiter interests for a job
#[derive(Debug, Deserialize)]
pub struct ListInterestsRequest {
    pub job_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListInterestsResponse {
    pub interests: Vec<RecruiterInterest>,
}

/// match.transition.v1 - Change match status
#[derive(Debug, Deserialize)]
pub struct TransitionMatchRequest {
    pub match_id: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionMatchResponse {
    #[serde(rename = "match")]
    pub matched: Match,
}

/// match.list.v1 - Matches of a seeker
#[derive(Debug, Deserialize)]
pub struct ListMatchesRequest {
    pub seeker_id: i64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMatchesResponse {
    pub matches: Vec<Match>,
}
