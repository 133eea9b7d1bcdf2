//! Unit tests for the match engine against the in-memory datastore

use super::*;
use crate::domain::{DomainError, MatchStatus};
use crate::port::datastore::mocks::InMemoryDatastore;
use crate::port::time_provider::mocks::SteppingTimeProvider;

fn setup() -> (MatchEngine, Arc<InMemoryDatastore>) {
    let store = Arc::new(InMemoryDatastore::new());
    let engine = MatchEngine::new(
        store.clone(),
        Arc::new(SteppingTimeProvider::new(1000, 10)),
    );
    (engine, store)
}

#[tokio::test]
async fn test_swipe_then_interest_forms_match() {
    let (engine, store) = setup();

    let swipe = engine.record_seeker_swipe(1, 42, true).await.unwrap();
    assert!(swipe.swipe.liked);
    assert!(swipe.matched.is_none(), "No match before recruiter interest");
    assert_eq!(store.match_count(), 0);

    let interest = engine.record_recruiter_interest(1, 42).await.unwrap();
    assert!(interest.created);
    let m = interest.matched.expect("interest should complete the match");
    assert_eq!((m.seeker_id, m.job_id), (1, 42));
    assert_eq!(m.status, MatchStatus::New);

    let listed = engine.list_matches_for_seeker(1, None).await.unwrap();
    assert_eq!(listed, vec![m]);
}

#[tokio::test]
async fn test_interest_then_swipe_forms_same_match() {
    let (engine, store) = setup();

    let interest = engine.record_recruiter_interest(1, 42).await.unwrap();
    assert!(interest.matched.is_none());

    let swipe = engine.record_seeker_swipe(1, 42, true).await.unwrap();
    let m = swipe.matched.expect("swipe should complete the match");
    assert_eq!((m.seeker_id, m.job_id, m.status), (1, 42, MatchStatus::New));
    assert_eq!(store.match_count(), 1);
}

#[tokio::test]
async fn test_rejection_never_matches() {
    let (engine, store) = setup();

    let swipe = engine.record_seeker_swipe(1, 42, false).await.unwrap();
    assert!(swipe.matched.is_none());

    let interest = engine.record_recruiter_interest(1, 42).await.unwrap();
    assert!(interest.matched.is_none());

    // Repeated interest does not revisit the rejection either
    let again = engine.record_recruiter_interest(1, 42).await.unwrap();
    assert!(again.matched.is_none());
    assert_eq!(store.match_count(), 0);
}

#[tokio::test]
async fn test_recruiter_interest_is_idempotent() {
    let (engine, store) = setup();

    let first = engine.record_recruiter_interest(1, 42).await.unwrap();
    let second = engine.record_recruiter_interest(1, 42).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.interest, second.interest);
    assert_eq!(store.interest_count(), 1);
}

#[tokio::test]
async fn test_duplicate_swipe_rejected() {
    let (engine, store) = setup();

    engine.record_seeker_swipe(1, 42, true).await.unwrap();
    let err = engine.record_seeker_swipe(1, 42, true).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::DuplicateSwipe {
            seeker_id: 1,
            job_id: 42
        })
    ));

    // Opposite decision is rejected too
    let err = engine.record_seeker_swipe(1, 42, false).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::DuplicateSwipe { .. })
    ));
    assert_eq!(store.swipe_count(), 1);
}

#[tokio::test]
async fn test_at_most_one_match_per_pair() {
    let (engine, store) = setup();

    engine.record_recruiter_interest(1, 42).await.unwrap();
    let from_swipe = engine.record_seeker_swipe(1, 42, true).await.unwrap();
    let from_interest = engine.record_recruiter_interest(1, 42).await.unwrap();
    let _ = engine.record_seeker_swipe(1, 42, true).await;

    assert_eq!(from_swipe.matched, from_interest.matched);
    assert_eq!(store.match_count(), 1);
}

#[tokio::test]
async fn test_ensure_match_returns_existing_unchanged() {
    let (engine, _store) = setup();

    let created = engine.ensure_match(1, 42).await.unwrap();
    engine
        .transition_match_status(created.id, "interview")
        .await
        .unwrap();

    let again = engine.ensure_match(1, 42).await.unwrap();
    assert_eq!(again.id, created.id);
    assert_eq!(again.status, MatchStatus::Interview);
    assert_eq!(again.created_at, created.created_at);
}

#[tokio::test]
async fn test_transition_then_filter() {
    let (engine, _store) = setup();

    engine.record_seeker_swipe(1, 42, true).await.unwrap();
    let m = engine
        .record_recruiter_interest(1, 42)
        .await
        .unwrap()
        .matched
        .unwrap();

    let updated = engine
        .transition_match_status(m.id, "interview")
        .await
        .unwrap();
    assert_eq!(updated.status, MatchStatus::Interview);

    let interviews = engine
        .list_matches_for_seeker(1, Some("interview"))
        .await
        .unwrap();
    assert_eq!(interviews.len(), 1);
    assert_eq!(interviews[0].id, m.id);

    for other in ["new", "in_process", "offer"] {
        let listed = engine.list_matches_for_seeker(1, Some(other)).await.unwrap();
        assert!(listed.is_empty(), "status {} should not include the match", other);
    }
}

#[tokio::test]
async fn test_transition_invalid_status() {
    let (engine, _store) = setup();
    let m = engine.ensure_match(1, 42).await.unwrap();

    let err = engine
        .transition_match_status(m.id, "rejected")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::InvalidStatus(ref s)) if s == "rejected"
    ));
}

#[tokio::test]
async fn test_transition_unknown_match() {
    let (engine, _store) = setup();

    let err = engine
        .transition_match_status(999, "offer")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::MatchNotFound(999))
    ));
}

#[tokio::test]
async fn test_permissive_policy_allows_backwards() {
    let (engine, _store) = setup();
    let m = engine.ensure_match(1, 42).await.unwrap();

    engine.transition_match_status(m.id, "offer").await.unwrap();
    let back = engine.transition_match_status(m.id, "new").await.unwrap();
    assert_eq!(back.status, MatchStatus::New);
}

#[tokio::test]
async fn test_forward_only_policy() {
    let store = Arc::new(InMemoryDatastore::new());
    let engine = MatchEngine::new(store, Arc::new(SteppingTimeProvider::fixed(5000)))
        .with_policy(TransitionPolicy::ForwardOnly);
    let m = engine.ensure_match(1, 42).await.unwrap();

    let skipped = engine.transition_match_status(m.id, "interview").await.unwrap();
    assert_eq!(skipped.status, MatchStatus::Interview);

    let err = engine
        .transition_match_status(m.id, "in_process")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::InvalidTransition { .. })
    ));

    // Status is unchanged after the refusal
    let current = engine.find_match_for_pair(1, 42).await.unwrap().unwrap();
    assert_eq!(current.status, MatchStatus::Interview);
}

#[tokio::test]
async fn test_list_matches_newest_first() {
    let (engine, _store) = setup();

    for job_id in [10, 11, 12] {
        engine.record_recruiter_interest(1, job_id).await.unwrap();
        engine.record_seeker_swipe(1, job_id, true).await.unwrap();
    }

    let jobs: Vec<_> = engine
        .list_matches_for_seeker(1, None)
        .await
        .unwrap()
        .iter()
        .map(|m| m.job_id)
        .collect();
    assert_eq!(jobs, vec![12, 11, 10]);

    assert!(engine.list_matches_for_seeker(2, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_filter_rejects_unknown_status() {
    let (engine, _store) = setup();

    let err = engine
        .list_matches_for_seeker(1, Some("archived"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::InvalidStatus(_))
    ));
}

#[tokio::test]
async fn test_invalid_ids_rejected() {
    let (engine, store) = setup();

    assert!(matches!(
        engine.record_seeker_swipe(0, 42, true).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        engine.record_recruiter_interest(1, -5).await,
        Err(AppError::Validation(_))
    ));
    assert_eq!(store.swipe_count() + store.interest_count(), 0);
}

#[tokio::test]
async fn test_datastore_failure_propagates() {
    let (engine, store) = setup();
    store.set_unavailable(true);

    assert!(matches!(
        engine.record_seeker_swipe(1, 42, true).await,
        Err(AppError::Database(_))
    ));
    assert!(matches!(
        engine.record_recruiter_interest(1, 42).await,
        Err(AppError::Database(_))
    ));
    assert!(matches!(
        engine.transition_match_status(1, "offer").await,
        Err(AppError::Database(_))
    ));
    assert!(matches!(
        engine.list_matches_for_seeker(1, None).await,
        Err(AppError::Database(_))
    ));
}

#[tokio::test]
async fn test_signal_listings() {
    let (engine, _store) = setup();

    engine.record_seeker_swipe(1, 10, true).await.unwrap();
    engine.record_seeker_swipe(1, 11, false).await.unwrap();
    engine.record_recruiter_interest(1, 10).await.unwrap();
    engine.record_recruiter_interest(2, 10).await.unwrap();

    let swipes = engine.list_swipes_for_seeker(1).await.unwrap();
    let swiped_jobs: Vec<_> = swipes.iter().map(|s| (s.job_id, s.liked)).collect();
    assert_eq!(swiped_jobs, vec![(11, false), (10, true)]);

    let interests = engine.list_interests_for_job(10).await.unwrap();
    let seekers: Vec<_> = interests.iter().map(|i| i.seeker_id).collect();
    assert_eq!(seekers, vec![2, 1]);
}

#[test]
fn test_outcome_serialization() {
    let (engine, _store) = setup();
    let outcome = tokio_test::block_on(engine.record_seeker_swipe(3, 7, false)).unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["swipe"]["seeker_id"], 3);
    assert_eq!(json["swipe"]["liked"], false);
    assert!(json["matched"].is_null());
}

/// Wraps the in-memory store and moves a match to `offer` right after the
/// first read of it, as a concurrent writer would
struct InterleavedWriteStore {
    inner: InMemoryDatastore,
    fired: std::sync::atomic::AtomicBool,
}

impl InterleavedWriteStore {
    fn new() -> Self {
        Self {
            inner: InMemoryDatastore::new(),
            fired: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl Datastore for InterleavedWriteStore {
    async fn create_swipe(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        liked: bool,
        created_at: i64,
    ) -> Result<Swipe> {
        self.inner.create_swipe(seeker_id, job_id, liked, created_at).await
    }

    async fn find_swipe(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Swipe>> {
        self.inner.find_swipe(seeker_id, job_id).await
    }

    async fn list_swipes(&self, seeker_id: SeekerId) -> Result<Vec<Swipe>> {
        self.inner.list_swipes(seeker_id).await
    }

    async fn create_recruiter_interest(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        created_at: i64,
    ) -> Result<RecruiterInterest> {
        self.inner
            .create_recruiter_interest(seeker_id, job_id, created_at)
            .await
    }

    async fn find_recruiter_interest(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
    ) -> Result<Option<RecruiterInterest>> {
        self.inner.find_recruiter_interest(seeker_id, job_id).await
    }

    async fn list_recruiter_interests(&self, job_id: JobId) -> Result<Vec<RecruiterInterest>> {
        self.inner.list_recruiter_interests(job_id).await
    }

    async fn create_match(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        status: MatchStatus,
        created_at: i64,
    ) -> Result<Match> {
        self.inner
            .create_match(seeker_id, job_id, status, created_at)
            .await
    }

    async fn find_match(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Match>> {
        self.inner.find_match(seeker_id, job_id).await
    }

    async fn find_match_by_id(&self, id: MatchId) -> Result<Option<Match>> {
        let read = self.inner.find_match_by_id(id).await?;
        if let Some(m) = &read {
            if !self.fired.swap(true, std::sync::atomic::Ordering::SeqCst) {
                self.inner
                    .update_match_status(id, m.status, MatchStatus::Offer)
                    .await?;
            }
        }
        Ok(read)
    }

    async fn update_match_status(
        &self,
        id: MatchId,
        expected: MatchStatus,
        status: MatchStatus,
    ) -> Result<Option<Match>> {
        self.inner.update_match_status(id, expected, status).await
    }

    async fn list_matches(
        &self,
        seeker_id: SeekerId,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Match>> {
        self.inner.list_matches(seeker_id, status).await
    }
}

async fn matched_pair(engine: &MatchEngine) -> Match {
    engine.record_seeker_swipe(1, 42, true).await.unwrap();
    engine
        .record_recruiter_interest(1, 42)
        .await
        .unwrap()
        .matched
        .unwrap()
}

#[tokio::test]
async fn test_forward_only_sees_concurrent_advance() {
    let store = Arc::new(InterleavedWriteStore::new());
    let engine = MatchEngine::new(store.clone(), Arc::new(SteppingTimeProvider::fixed(5000)))
        .with_policy(TransitionPolicy::ForwardOnly);
    let m = matched_pair(&engine).await;

    // Read sees `new`, but the match reaches `offer` before the write
    let err = engine
        .transition_match_status(m.id, "interview")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::InvalidTransition { .. })
    ));

    let current = store.inner.find_match_by_id(m.id).await.unwrap().unwrap();
    assert_eq!(current.status, MatchStatus::Offer);
}

#[tokio::test]
async fn test_permissive_retries_after_concurrent_write() {
    let store = Arc::new(InterleavedWriteStore::new());
    let engine = MatchEngine::new(store.clone(), Arc::new(SteppingTimeProvider::fixed(5000)));
    let m = matched_pair(&engine).await;

    let updated = engine
        .transition_match_status(m.id, "interview")
        .await
        .unwrap();
    assert_eq!(updated.status, MatchStatus::Interview);

    let current = store.inner.find_match_by_id(m.id).await.unwrap().unwrap();
    assert_eq!(current.status, MatchStatus::Interview);
}

#[tokio::test]
async fn test_counts_ignore_availability() {
    let (engine, store) = setup();
    engine.record_seeker_swipe(1, 42, true).await.unwrap();
    store.set_unavailable(true);

    assert_eq!(store.swipe_count(), 1);
    assert!(engine.record_seeker_swipe(1, 43, true).await.is_err());
    assert_eq!(store.swipe_count(), 1);
}
