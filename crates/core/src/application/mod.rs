// Application Layer - Use Cases and Business Logic

pub mod matching;
pub mod policy;

// Re-exports
pub use matching::{InterestOutcome, MatchEngine, SwipeOutcome};
pub use policy::TransitionPolicy;
