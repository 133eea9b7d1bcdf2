// Status transition policy
use crate::domain::{Match, MatchStatus};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Which status changes a match accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may follow any other, including moving backwards
    #[default]
    Permissive,
    /// Only moves up the pipeline (new -> in_process -> interview -> offer).
    /// Skipping stages is allowed.
    ForwardOnly,
}

impl TransitionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPolicy::Permissive => "permissive",
            TransitionPolicy::ForwardOnly => "forward_only",
        }
    }

    /// Apply `target` to `m` under this policy
    ///
    /// # Errors
    /// - `DomainError::InvalidTransition` under `ForwardOnly` when `target`
    ///   ranks below the current status
    pub fn apply(&self, m: &mut Match, target: MatchStatus) -> Result<()> {
        match self {
            TransitionPolicy::Permissive => {
                m.set_status(target);
                Ok(())
            }
            TransitionPolicy::ForwardOnly => m.advance_to(target).map_err(|e| {
                warn!(
                    match_id = %m.id,
                    from = %m.status,
                    to = %target,
                    "Backward status transition rejected"
                );
                AppError::from(e)
            }),
        }
    }
}

impl std::fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "forward_only" => Ok(TransitionPolicy::ForwardOnly),
            other => Err(AppError::Config(format!(
                "unknown transition policy '{}' (expected permissive or forward_only)",
                other
            ))),
        }
    }
}
