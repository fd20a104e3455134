// Scheduled-publish evaluator
//
// One pass transitions every approved, not-yet-live article whose
// scheduled time has passed. All comparisons happen in UTC; the display
// zone is used only when formatting log output.

use crate::db::ArticleStore;
use crate::errors::PublishError;
use crate::models::ScheduleState;
use crate::timezone;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Outcome of one evaluator pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSummary {
    pub success: bool,
    pub published: usize,
    pub message: String,
}

/// Evaluator trait for a single publishing pass at a given instant.
///
/// The evaluation time is passed in rather than read from the wall clock
/// so tests can simulate arbitrary "now" values.
#[async_trait]
pub trait PublishEvaluator: Send + Sync {
    /// Run one pass at evaluation time `now`.
    ///
    /// Per-article problems (corrupt schedule text, a failed row update)
    /// are reflected in the returned summary. `Err` is reserved for the
    /// candidate query failing outright, so the driver can retry a
    /// transient store outage.
    async fn evaluate(&self, now: DateTime<Utc>) -> Result<PublishSummary, PublishError>;
}

/// Main evaluator implementation over an article store
pub struct ScheduledPublisher {
    store: Arc<dyn ArticleStore>,
    display_tz: Tz,
}

impl ScheduledPublisher {
    pub fn new(store: Arc<dyn ArticleStore>, display_tz: Tz) -> Self {
        Self { store, display_tz }
    }

    /// Log every article carrying a schedule, eligible or not. Read-only;
    /// exists to answer "why didn't my post go live" from the logs alone.
    async fn log_scheduled_articles(&self) {
        match self.store.find_scheduled().await {
            Ok(articles) => {
                for article in &articles {
                    debug!(
                        target: "scheduler",
                        article_id = %article.id,
                        title = %article.title,
                        status = article.status.as_str(),
                        published = article.published,
                        scheduled_publish_at = article.scheduled_publish_at.as_deref(),
                        "Scheduled article"
                    );
                }
            }
            Err(e) => {
                warn!(target: "scheduler", error = %e, "Diagnostic scan of scheduled articles failed");
            }
        }
    }
}

#[async_trait]
impl PublishEvaluator for ScheduledPublisher {
    #[instrument(skip(self))]
    async fn evaluate(&self, now: DateTime<Utc>) -> Result<PublishSummary, PublishError> {
        self.log_scheduled_articles().await;

        let candidates = self.store.find_publish_candidates().await?;

        let mut published = 0usize;
        let mut first_error: Option<String> = None;

        for article in &candidates {
            let scheduled_at = match article.schedule() {
                ScheduleState::At(at) if at <= now => at,
                ScheduleState::At(_) => continue,
                ScheduleState::Invalid(raw) => {
                    warn!(
                        target: "scheduler",
                        article_id = %article.id,
                        title = %article.title,
                        scheduled_publish_at = %raw,
                        "Skipping article with unparseable scheduled publish time"
                    );
                    continue;
                }
                // The candidate query excludes null schedules
                ScheduleState::None => continue,
            };

            match self.store.mark_published(article.id, now).await {
                Ok(()) => {
                    published += 1;
                    info!(
                        target: "scheduler",
                        article_id = %article.id,
                        title = %article.title,
                        scheduled_at_utc = %scheduled_at.to_rfc3339(),
                        scheduled_at_local = %timezone::format_display(scheduled_at, self.display_tz),
                        published_at_utc = %now.to_rfc3339(),
                        published_at_local = %timezone::format_display(now, self.display_tz),
                        "Article published"
                    );
                }
                Err(e) => {
                    warn!(
                        target: "scheduler",
                        article_id = %article.id,
                        title = %article.title,
                        error = %e,
                        "Failed to persist publish transition"
                    );
                    first_error.get_or_insert_with(|| e.to_string());
                }
            }
        }

        let summary = match first_error {
            None => PublishSummary {
                success: true,
                published,
                message: format!("Published {} scheduled article(s)", published),
            },
            Some(err) => PublishSummary {
                success: false,
                published,
                message: format!("Published {} article(s), first failure: {}", published, err),
            },
        };

        Ok(summary)
    }
}
