//! PostgreSQL implementation of PollRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use channel_core::{
    DomainError, Poll, PollOption, PollRepository, PollResult, PollVote, RepoResult, Snowflake,
};

use crate::models::{PollModel, PollOptionModel, PollResultModel};

use super::error::{expect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of PollRepository
#[derive(Clone)]
pub struct PgPollRepository {
    pool: PgPool,
}

impl PgPollRepository {
    /// Create a new PgPollRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollRepository for PgPollRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: Snowflake) -> RepoResult<Option<Poll>> {
        let result = sqlx::query_as::<_, PollModel>(
            r"
            SELECT id, channel_id, created_by, question, is_anonymous, multi_choice, is_closed,
                   expires_at, closed_at, created_at, updated_at
            FROM channel_polls
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Poll::from))
    }

    #[instrument(skip(self))]
    async fn options(&self, poll_id: Snowflake) -> RepoResult<Vec<PollOption>> {
        let results = sqlx::query_as::<_, PollOptionModel>(
            "SELECT id, poll_id, text, position FROM poll_options WHERE poll_id = $1 ORDER BY position",
        )
        .bind(poll_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PollOption::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self, channel_id: Snowflake) -> RepoResult<Vec<Poll>> {
        let results = sqlx::query_as::<_, PollModel>(
            r"
            SELECT id, channel_id, created_by, question, is_anonymous, multi_choice, is_closed,
                   expires_at, closed_at, created_at, updated_at
            FROM channel_polls
            WHERE channel_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Poll::from).collect())
    }

    #[instrument(skip(self, poll, options), fields(poll_id = %poll.id, options = options.len()))]
    async fn create(&self, poll: &Poll, options: &[PollOption]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO channel_polls (id, channel_id, created_by, question, is_anonymous, multi_choice,
                                       is_closed, expires_at, closed_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(poll.id.into_inner())
        .bind(poll.channel_id.into_inner())
        .bind(poll.created_by.into_inner())
        .bind(&poll.question)
        .bind(poll.is_anonymous)
        .bind(poll.multi_choice)
        .bind(poll.is_closed)
        .bind(poll.expires_at)
        .bind(poll.closed_at)
        .bind(poll.created_at)
        .bind(poll.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for option in options {
            sqlx::query("INSERT INTO poll_options (id, poll_id, text, position) VALUES ($1, $2, $3, $4)")
                .bind(option.id.into_inner())
                .bind(option.poll_id.into_inner())
                .bind(&option.text)
                .bind(option.position)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn has_voted(&self, poll_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM poll_votes WHERE poll_id = $1 AND user_id = $2)",
        )
        .bind(poll_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, votes), fields(count = votes.len()))]
    async fn cast_votes(&self, votes: &[PollVote]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for vote in votes {
            sqlx::query(
                r"
                INSERT INTO poll_votes (id, poll_id, option_id, user_id, voted_at)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(vote.id.into_inner())
            .bind(vote.poll_id.into_inner())
            .bind(vote.option_id.into_inner())
            .bind(vote.user_id.into_inner())
            .bind(vote.voted_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::AlreadyVoted))?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn close(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE channel_polls
            SET is_closed = TRUE, closed_at = $2, updated_at = NOW()
            WHERE id = $1 AND is_closed = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        // Closing is one-way; a second close loses the race
        expect_rows(result.rows_affected(), || DomainError::PollClosed)
    }

    #[instrument(skip(self))]
    async fn results(&self, poll_id: Snowflake) -> RepoResult<Vec<PollResult>> {
        let results = sqlx::query_as::<_, PollResultModel>(
            r"
            SELECT o.id AS option_id, o.text AS option_text, COUNT(v.id) AS vote_count
            FROM poll_options o
            LEFT JOIN poll_votes v ON v.option_id = o.id
            WHERE o.poll_id = $1
            GROUP BY o.id, o.text, o.position
            ORDER BY o.position
            ",
        )
        .bind(poll_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PollResult::from).collect())
    }
}
