// Match pipeline status

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::DomainError;

/// Pipeline position of a match, from first contact to offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    New,
    InProcess,
    Interview,
    Offer,
}

impl MatchStatus {
    /// Every status, in pipeline order
    pub const ALL: [MatchStatus; 4] = [
        MatchStatus::New,
        MatchStatus::InProcess,
        MatchStatus::Interview,
        MatchStatus::Offer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::New => "new",
            MatchStatus::InProcess => "in_process",
            MatchStatus::Interview => "interview",
            MatchStatus::Offer => "offer",
        }
    }

    /// Position in the pipeline (new = 0)
    pub fn rank(&self) -> u8 {
        match self {
            MatchStatus::New => 0,
            MatchStatus::InProcess => 1,
            MatchStatus::Interview => 2,
            MatchStatus::Offer => 3,
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(MatchStatus::New),
            "in_process" => Ok(MatchStatus::InProcess),
            "interview" => Ok(MatchStatus::Interview),
            "offer" => Ok(MatchStatus::Offer),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}
