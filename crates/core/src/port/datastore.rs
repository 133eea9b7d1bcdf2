// Datastore Port (Interface)

use crate::domain::{
    JobId, Match, MatchId, MatchStatus, RecruiterInterest, SeekerId, Swipe,
};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence interface for interest signals and matches.
///
/// Implementations own uniqueness per (seeker, job) pair for all three
/// record kinds. `create_match` and `create_recruiter_interest` must be
/// insert-or-fetch: a uniqueness conflict returns the surviving row, so
/// concurrent callers for the same pair all observe one record.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Insert a swipe
    ///
    /// # Errors
    /// - `AppError::Conflict` if the pair already has a swipe
    async fn create_swipe(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        liked: bool,
        created_at: i64,
    ) -> Result<Swipe>;

    /// Find the swipe for a pair
    async fn find_swipe(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Swipe>>;

    /// All swipes of a seeker, newest first
    async fn list_swipes(&self, seeker_id: SeekerId) -> Result<Vec<Swipe>>;

    /// Insert a recruiter interest, or return the existing one for the pair
    async fn create_recruiter_interest(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        created_at: i64,
    ) -> Result<RecruiterInterest>;

    /// Find the recruiter interest for a pair
    async fn find_recruiter_interest(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
    ) -> Result<Option<RecruiterInterest>>;

    /// All recruiter interests recorded against a job, newest first
    async fn list_recruiter_interests(&self, job_id: JobId) -> Result<Vec<RecruiterInterest>>;

    /// Insert a match, or return the existing one for the pair unchanged
    async fn create_match(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        status: MatchStatus,
        created_at: i64,
    ) -> Result<Match>;

    /// Find the match for a pair
    async fn find_match(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Match>>;

    /// Find match by ID
    async fn find_match_by_id(&self, id: MatchId) -> Result<Option<Match>>;

    /// Set the status of a match, provided it still has status `expected`
    ///
    /// # Returns
    /// The updated match, or `None` if no match has this ID or its status
    /// is no longer `expected`
    async fn update_match_status(
        &self,
        id: MatchId,
        expected: MatchStatus,
        status: MatchStatus,
    ) -> Result<Option<Match>>;

    /// Matches of a seeker, newest first, optionally restricted to one status
    async fn list_matches(
        &self,
        seeker_id: SeekerId,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Match>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default)]
    struct Tables {
        swipes: HashMap<(SeekerId, JobId), Swipe>,
        interests: HashMap<(SeekerId, JobId), RecruiterInterest>,
        matches: HashMap<(SeekerId, JobId), Match>,
        next_swipe_id: i64,
        next_interest_id: i64,
        next_match_id: i64,
    }

    impl Tables {
        fn bump(counter: &mut i64) -> i64 {
            *counter += 1;
            *counter
        }
    }

    /// In-memory Datastore for tests.
    ///
    /// Keyed by (seeker, job) with incrementing IDs per table. The whole state
    /// sits behind one mutex, so each call is atomic.
    #[derive(Default)]
    pub struct InMemoryDatastore {
        tables: Mutex<Tables>,
        unavailable: AtomicBool,
    }

    impl InMemoryDatastore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent call fail with `AppError::Database`
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub fn swipe_count(&self) -> usize {
            self.tables().swipes.len()
        }

        pub fn interest_count(&self) -> usize {
            self.tables().interests.len()
        }

        pub fn match_count(&self) -> usize {
            self.tables().matches.len()
        }

        /// Raw table access for inspection, bypassing the availability switch
        fn tables(&self) -> MutexGuard<'_, Tables> {
            self.tables.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(AppError::Database("datastore unavailable".to_string()));
            }
            self.tables
                .lock()
                .map_err(|_| AppError::Internal("datastore mutex poisoned".to_string()))
        }
    }

    fn newest_first<T>(mut rows: Vec<T>, key: impl Fn(&T) -> (i64, i64)) -> Vec<T> {
        rows.sort_by(|a, b| key(b).cmp(&key(a)));
        rows
    }

    #[async_trait]
    impl Datastore for InMemoryDatastore {
        async fn create_swipe(
            &self,
            seeker_id: SeekerId,
            job_id: JobId,
            liked: bool,
            created_at: i64,
        ) -> Result<Swipe> {
            let mut tables = self.lock()?;
            if tables.swipes.contains_key(&(seeker_id, job_id)) {
                return Err(AppError::Conflict(format!(
                    "swipe already exists for seeker {} and job {}",
                    seeker_id, job_id
                )));
            }
            let id = Tables::bump(&mut tables.next_swipe_id);
            let swipe = Swipe {
                id,
                seeker_id,
                job_id,
                liked,
                created_at,
            };
            tables.swipes.insert((seeker_id, job_id), swipe.clone());
            Ok(swipe)
        }

        async fn find_swipe(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Swipe>> {
            Ok(self.lock()?.swipes.get(&(seeker_id, job_id)).cloned())
        }

        async fn list_swipes(&self, seeker_id: SeekerId) -> Result<Vec<Swipe>> {
            let rows = self
                .lock()?
                .swipes
                .values()
                .filter(|s| s.seeker_id == seeker_id)
                .cloned()
                .collect();
            Ok(newest_first(rows, |s| (s.created_at, s.id)))
        }

        async fn create_recruiter_interest(
            &self,
            seeker_id: SeekerId,
            job_id: JobId,
            created_at: i64,
        ) -> Result<RecruiterInterest> {
            let mut tables = self.lock()?;
            if let Some(existing) = tables.interests.get(&(seeker_id, job_id)) {
                return Ok(existing.clone());
            }
            let id = Tables::bump(&mut tables.next_interest_id);
            let interest = RecruiterInterest {
                id,
                seeker_id,
                job_id,
                created_at,
            };
            tables.interests.insert((seeker_id, job_id), interest.clone());
            Ok(interest)
        }

        async fn find_recruiter_interest(
            &self,
            seeker_id: SeekerId,
            job_id: JobId,
        ) -> Result<Option<RecruiterInterest>> {
            Ok(self.lock()?.interests.get(&(seeker_id, job_id)).cloned())
        }

        async fn list_recruiter_interests(&self, job_id: JobId) -> Result<Vec<RecruiterInterest>> {
            let rows = self
                .lock()?
                .interests
                .values()
                .filter(|i| i.job_id == job_id)
                .cloned()
                .collect();
            Ok(newest_first(rows, |i| (i.created_at, i.id)))
        }

        async fn create_match(
            &self,
            seeker_id: SeekerId,
            job_id: JobId,
            status: MatchStatus,
            created_at: i64,
        ) -> Result<Match> {
            let mut tables = self.lock()?;
            if let Some(existing) = tables.matches.get(&(seeker_id, job_id)) {
                return Ok(existing.clone());
            }
            let id = Tables::bump(&mut tables.next_match_id);
            let m = Match {
                id,
                seeker_id,
                job_id,
                status,
                created_at,
            };
            tables.matches.insert((seeker_id, job_id), m.clone());
            Ok(m)
        }

        async fn find_match(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Match>> {
            Ok(self.lock()?.matches.get(&(seeker_id, job_id)).cloned())
        }

        async fn find_match_by_id(&self, id: MatchId) -> Result<Option<Match>> {
            Ok(self
                .lock()?
                .matches
                .values()
                .find(|m| m.id == id)
                .cloned())
        }

        async fn update_match_status(
            &self,
            id: MatchId,
            expected: MatchStatus,
            status: MatchStatus,
        ) -> Result<Option<Match>> {
            let mut tables = self.lock()?;
            Ok(tables
                .matches
                .values_mut()
                .find(|m| m.id == id && m.status == expected)
                .map(|m| {
                    m.set_status(status);
                    m.clone()
                }))
        }

        async fn list_matches(
            &self,
            seeker_id: SeekerId,
            status: Option<MatchStatus>,
        ) -> Result<Vec<Match>> {
            let rows = self
                .lock()?
                .matches
                .values()
                .filter(|m| m.seeker_id == seeker_id)
                .filter(|m| status.map_or(true, |s| m.status == s))
                .cloned()
                .collect();
            Ok(newest_first(rows, |m| (m.created_at, m.id)))
        }
    }

}
