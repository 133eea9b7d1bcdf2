//! Shared fixtures for the SQLite-backed suites

// Each suite uses a different subset
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use swipematch_core::application::{MatchEngine, TransitionPolicy};
use swipematch_core::domain::Match;
use swipematch_core::port::time_provider::SystemTimeProvider;
use swipematch_infra_sqlite::{create_pool, run_migrations, SqliteDatastore};

/// Database file in the temp dir, removed with its WAL files on drop
pub struct TempDb {
    path: PathBuf,
}

impl TempDb {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "swipematch_{}_{}.db",
            name,
            std::process::id()
        ));
        let db = Self { path };
        db.remove_files();
        db
    }

    pub fn url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    fn remove_files(&self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path.display(), suffix));
        }
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        self.remove_files();
    }
}

/// Open (and migrate) the database behind `url` with a fresh engine
pub async fn open_engine(url: &str, policy: TransitionPolicy) -> (Arc<MatchEngine>, sqlx::SqlitePool) {
    let pool = create_pool(url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let engine = MatchEngine::new(
        Arc::new(SqliteDatastore::new(pool.clone())),
        Arc::new(SystemTimeProvider),
    )
    .with_policy(policy);
    (Arc::new(engine), pool)
}

/// Form a match the only way the engine allows: liked swipe plus recruiter interest
pub async fn form_match(engine: &MatchEngine, seeker_id: i64, job_id: i64) -> Match {
    engine.record_seeker_swipe(seeker_id, job_id, true).await.unwrap();
    engine
        .record_recruiter_interest(seeker_id, job_id)
        .await
        .unwrap()
        .matched
        .expect("liked swipe plus interest forms a match")
}

pub async fn count(pool: &sqlx::SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}
