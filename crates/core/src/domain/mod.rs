// Domain Layer - Pure business logic and entities

pub mod error;
pub mod matching;
pub mod signal;
pub mod status;

// Re-exports
pub use error::DomainError;
pub use matching::{Match, MatchId};
pub use signal::{InterestId, JobId, RecruiterInterest, SeekerId, Swipe, SwipeId};
pub use status::MatchStatus;
