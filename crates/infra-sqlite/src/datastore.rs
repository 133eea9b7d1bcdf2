// SQLite Datastore Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use swipematch_core::domain::{
    JobId, Match, MatchId, MatchStatus, RecruiterInterest, SeekerId, Swipe,
};
use swipematch_core::error::{AppError, Result};
use swipematch_core::port::Datastore;
use tracing::debug;

/// Datastore backed by SQLite.
///
/// Pair uniqueness is enforced by `UNIQUE (seeker_id, job_id)` on every
/// table. Insert-or-fetch operations use `ON CONFLICT DO NOTHING` followed by
/// a lookup; rows are never deleted, so the lookup always finds the winner.
pub struct SqliteDatastore {
    pool: SqlitePool,
}

impl SqliteDatastore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_match_pair(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Match>> {
        let row = sqlx::query_as::<_, MatchRow>(
            "SELECT * FROM matches WHERE seeker_id = ? AND job_id = ?",
        )
        .bind(seeker_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(MatchRow::into_match).transpose()
    }

    async fn fetch_interest_pair(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
    ) -> Result<Option<RecruiterInterest>> {
        let row = sqlx::query_as::<_, InterestRow>(
            "SELECT * FROM recruiter_interests WHERE seeker_id = ? AND job_id = ?",
        )
        .bind(seeker_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(InterestRow::into_interest))
    }
}

#[async_trait]
impl Datastore for SqliteDatastore {
    async fn create_swipe(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        liked: bool,
        created_at: i64,
    ) -> Result<Swipe> {
        // UNIQUE violation surfaces as AppError::Conflict
        let row = sqlx::query_as::<_, SwipeRow>(
            r#"
            INSERT INTO swipes (seeker_id, job_id, liked, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(seeker_id)
        .bind(job_id)
        .bind(liked)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into_swipe())
    }

    async fn find_swipe(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Swipe>> {
        let row = sqlx::query_as::<_, SwipeRow>(
            "SELECT * FROM swipes WHERE seeker_id = ? AND job_id = ?",
        )
        .bind(seeker_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SwipeRow::into_swipe))
    }

    async fn list_swipes(&self, seeker_id: SeekerId) -> Result<Vec<Swipe>> {
        let rows: Vec<SwipeRow> = sqlx::query_as(
            r#"
            SELECT * FROM swipes
            WHERE seeker_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(seeker_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SwipeRow::into_swipe).collect())
    }

    async fn create_recruiter_interest(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        created_at: i64,
    ) -> Result<RecruiterInterest> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO recruiter_interests (seeker_id, job_id, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT (seeker_id, job_id) DO NOTHING
            "#,
        )
        .bind(seeker_id)
        .bind(job_id)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .rows_affected();

        if inserted == 0 {
            debug!(seeker_id, job_id, "Recruiter interest insert absorbed by existing row");
        }

        self.fetch_interest_pair(seeker_id, job_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "recruiter interest for seeker {} and job {} missing after insert",
                    seeker_id, job_id
                ))
            })
    }

    async fn find_recruiter_interest(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
    ) -> Result<Option<RecruiterInterest>> {
        self.fetch_interest_pair(seeker_id, job_id).await
    }

    async fn list_recruiter_interests(&self, job_id: JobId) -> Result<Vec<RecruiterInterest>> {
        let rows: Vec<InterestRow> = sqlx::query_as(
            r#"
            SELECT * FROM recruiter_interests
            WHERE job_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(InterestRow::into_interest).collect())
    }

    async fn create_match(
        &self,
        seeker_id: SeekerId,
        job_id: JobId,
        status: MatchStatus,
        created_at: i64,
    ) -> Result<Match> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO matches (seeker_id, job_id, status, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (seeker_id, job_id) DO NOTHING
            "#,
        )
        .bind(seeker_id)
        .bind(job_id)
        .bind(status.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .rows_affected();

        if inserted == 0 {
            debug!(seeker_id, job_id, "Match insert absorbed by existing row");
        }

        self.fetch_match_pair(seeker_id, job_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "match for seeker {} and job {} missing after insert",
                    seeker_id, job_id
                ))
            })
    }

    async fn find_match(&self, seeker_id: SeekerId, job_id: JobId) -> Result<Option<Match>> {
        self.fetch_match_pair(seeker_id, job_id).await
    }

    async fn find_match_by_id(&self, id: MatchId) -> Result<Option<Match>> {
        let row = sqlx::query_as::<_, MatchRow>("SELECT * FROM matches WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(MatchRow::into_match).transpose()
    }

    async fn update_match_status(
        &self,
        id: MatchId,
        expected: MatchStatus,
        status: MatchStatus,
    ) -> Result<Option<Match>> {
        let row = sqlx::query_as::<_, MatchRow>(
            r#"
            UPDATE matches
            SET status = ?
            WHERE id = ? AND status = ?
            RETURNING *
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(MatchRow::into_match).transpose()
    }

    async fn list_matches(
        &self,
        seeker_id: SeekerId,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Match>> {
        let rows: Vec<MatchRow> = match status {
            Some(status) => {
                sqlx::query_as::<_, MatchRow>(
                    r#"
                    SELECT * FROM matches
                    WHERE seeker_id = ? AND status = ?
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(seeker_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, MatchRow>(
                    r#"
                    SELECT * FROM matches
                    WHERE seeker_id = ?
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(seeker_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(MatchRow::into_match).collect()
    }
}

/// SQLite row representation of a swipe
#[derive(Debug, sqlx::FromRow)]
struct SwipeRow {
    id: i64,
    seeker_id: i64,
    job_id: i64,
    liked: bool, // stored as INTEGER 0/1
    created_at: i64,
}

impl SwipeRow {
    fn into_swipe(self) -> Swipe {
        Swipe {
            id: self.id,
            seeker_id: self.seeker_id,
            job_id: self.job_id,
            liked: self.liked,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InterestRow {
    id: i64,
    seeker_id: i64,
    job_id: i64,
    created_at: i64,
}

impl InterestRow {
    fn into_interest(self) -> RecruiterInterest {
        RecruiterInterest {
            id: self.id,
            seeker_id: self.seeker_id,
            job_id: self.job_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MatchRow {
    id: i64,
    seeker_id: i64,
    job_id: i64,
    status: String,
    created_at: i64,
}

impl MatchRow {
    fn into_match(self) -> Result<Match> {
        // CHECK constraint keeps this unreachable for rows written by this crate
        let status = self.status.parse::<MatchStatus>().map_err(|_| {
            AppError::Database(format!(
                "match {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;

        Ok(Match {
            id: self.id,
            seeker_id: self.seeker_id,
            job_id: self.job_id,
            status,
            created_at: self.created_at,
        })
    }
}
