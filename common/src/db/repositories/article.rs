// Article repository implementation

use crate::db::DbPool;
use crate::errors::DatabaseError;
use crate::models::{Article, ArticleStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;
use tracing::instrument;
use uuid::Uuid;

/// Read/write contract the publishing core needs from the article table.
///
/// Kept behind a trait so the evaluator can be tested against an
/// in-memory store.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Every article carrying a non-null schedule, any status or flag.
    /// Read-only, used for the diagnostic pre-pass.
    async fn find_scheduled(&self) -> Result<Vec<Article>, DatabaseError>;

    /// Approved, not-yet-live articles carrying a non-null schedule.
    /// The due-time comparison happens in the evaluator after parsing,
    /// since the legacy schema stores the schedule as text and a corrupt
    /// value must surface as a skippable row, not a failed cast.
    async fn find_publish_candidates(&self) -> Result<Vec<Article>, DatabaseError>;

    /// Flip an article live, stamping the actual publish time.
    async fn mark_published(
        &self,
        id: Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError>;
}

/// PostgreSQL-backed article store
pub struct PgArticleStore {
    pool: DbPool,
}

impl PgArticleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn article_from_row(row: &PgRow) -> Result<Article, DatabaseError> {
        let status_raw: String = row.try_get("status")?;
        let status = ArticleStatus::parse(&status_raw)
            .ok_or_else(|| DatabaseError::QueryFailed(format!("Unknown article status: {}", status_raw)))?;

        // Legacy text flag: anything other than "true" reads as false
        let published_raw: String = row.try_get("published")?;

        Ok(Article {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            status,
            published: published_raw == "true",
            scheduled_publish_at: row.try_get("scheduled_publish_at")?,
            published_at: row.try_get("published_at")?,
        })
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    #[instrument(skip(self))]
    async fn find_scheduled(&self) -> Result<Vec<Article>, DatabaseError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, status, published, scheduled_publish_at, published_at
            FROM articles
            WHERE scheduled_publish_at IS NOT NULL
            "#,
        )
        .fetch_all(self.pool.pool())
        .await?;

        rows.iter().map(Self::article_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn find_publish_candidates(&self) -> Result<Vec<Article>, DatabaseError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, status, published, scheduled_publish_at, published_at
            FROM articles
            WHERE status = 'published'
              AND published = 'false'
              AND scheduled_publish_at IS NOT NULL
            "#,
        )
        .fetch_all(self.pool.pool())
        .await?;

        let articles: Result<Vec<Article>, DatabaseError> =
            rows.iter().map(Self::article_from_row).collect();
        let articles = articles?;

        tracing::debug!(count = articles.len(), "Found publish candidates");
        Ok(articles)
    }

    #[instrument(skip(self))]
    async fn mark_published(
        &self,
        id: Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE articles
            SET published = 'true', published_at = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(published_at)
        .bind(Utc::now())
        .execute(self.pool.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Article not found: {}", id)));
        }

        Ok(())
    }
}
