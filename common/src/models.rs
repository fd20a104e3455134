use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Editorial status of an article. "Published" means an admin has approved
/// the article; whether it is actually visible is tracked separately by
/// [`Article::published`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Review,
    Published,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Review => "review",
            ArticleStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ArticleStatus::Draft),
            "review" => Some(ArticleStatus::Review),
            "published" => Some(ArticleStatus::Published),
            _ => None,
        }
    }
}

/// The subset of article fields the publishing core reads and writes.
///
/// `published` is stored as the text `"true"`/`"false"` in the legacy
/// schema; the repository converts it to a real boolean at the boundary.
/// `scheduled_publish_at` is kept as the raw stored text so that a
/// corrupted value can be detected and skipped per-row instead of
/// failing the whole pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub status: ArticleStatus,
    pub published: bool,
    pub scheduled_publish_at: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Result of interpreting an article's stored schedule text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleState {
    /// No schedule is in effect.
    None,
    /// The stored text does not parse as a timestamp.
    Invalid(String),
    /// The article is scheduled to go live at this instant (UTC).
    At(DateTime<Utc>),
}

impl Article {
    /// Parse the stored schedule text. Timestamps are stored as RFC 3339
    /// strings in UTC.
    pub fn schedule(&self) -> ScheduleState {
        match &self.scheduled_publish_at {
            None => ScheduleState::None,
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(dt) => ScheduleState::At(dt.with_timezone(&Utc)),
                Err(_) => ScheduleState::Invalid(raw.clone()),
            },
        }
    }

    /// Whether the article should be auto-published at evaluation time `now`:
    /// approved, not yet live, and carrying a valid schedule at or before `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        if self.status != ArticleStatus::Published || self.published {
            return false;
        }
        matches!(self.schedule(), ScheduleState::At(at) if at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(status: ArticleStatus, published: bool, scheduled: Option<&str>) -> Article {
        Article {
            id: Uuid::new_v4(),
            title: "Test article".to_string(),
            status,
            published,
            scheduled_publish_at: scheduled.map(str::to_string),
            published_at: None,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_status_round_trip() {
        for status in [ArticleStatus::Draft, ArticleStatus::Review, ArticleStatus::Published] {
            assert_eq!(ArticleStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ArticleStatus::parse("archived"), None);
    }

    #[test]
    fn test_schedule_states() {
        let a = article(ArticleStatus::Published, false, None);
        assert_eq!(a.schedule(), ScheduleState::None);

        let a = article(ArticleStatus::Published, false, Some("not-a-date"));
        assert_eq!(a.schedule(), ScheduleState::Invalid("not-a-date".to_string()));

        let a = article(ArticleStatus::Published, false, Some("2025-01-01T10:00:00Z"));
        assert_eq!(
            a.schedule(),
            ScheduleState::At(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_schedule_parses_offset_timestamps_to_utc() {
        // +05:30 input normalizes to the same UTC instant
        let a = article(ArticleStatus::Published, false, Some("2025-01-01T15:30:00+05:30"));
        assert_eq!(
            a.schedule(),
            ScheduleState::At(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_due_at_or_after_scheduled_time() {
        let a = article(ArticleStatus::Published, false, Some("2025-01-01T10:00:00Z"));
        assert!(!a.is_due(at("2025-01-01T09:59:59Z")));
        assert!(a.is_due(at("2025-01-01T10:00:00Z")));
        assert!(a.is_due(at("2025-01-01T10:00:01Z")));
    }

    #[test]
    fn test_not_due_unless_approved_and_unpublished() {
        let now = at("2025-01-01T10:00:01Z");

        let draft = article(ArticleStatus::Draft, false, Some("2025-01-01T10:00:00Z"));
        assert!(!draft.is_due(now));

        let in_review = article(ArticleStatus::Review, false, Some("2025-01-01T10:00:00Z"));
        assert!(!in_review.is_due(now));

        let live = article(ArticleStatus::Published, true, Some("2025-01-01T10:00:00Z"));
        assert!(!live.is_due(now));

        let unscheduled = article(ArticleStatus::Published, false, None);
        assert!(!unscheduled.is_due(now));

        let corrupt = article(ArticleStatus::Published, false, Some("not-a-date"));
        assert!(!corrupt.is_due(now));
    }
}
