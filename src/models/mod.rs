use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for canonical watch links
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// A video retrieved from the search provider, before scoring
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl Candidate {
    /// Creates a candidate, deriving the watch URL from the video ID
    pub fn new(video_id: String, title: String, description: String) -> Self {
        let url = watch_url(&video_id);
        Self {
            video_id,
            title,
            description,
            url,
        }
    }

    /// Text embedded to score this candidate against a query
    pub fn scoring_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Canonical watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_BASE, video_id)
}

/// A candidate together with its similarity to the query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    /// Cosine similarity in [-1, 1], rounded to 4 decimal places
    pub score: f64,
}

/// Number of decimal digits kept on returned scores
pub const SCORE_PRECISION: i32 = 4;

impl ScoredCandidate {
    pub fn new(candidate: Candidate, raw_score: f32) -> Self {
        Self {
            candidate,
            score: round_score(raw_score),
        }
    }

    /// Score assigned when a candidate's text could not be embedded
    pub fn unscored(candidate: Candidate) -> Self {
        Self {
            candidate,
            score: 0.0,
        }
    }
}

fn round_score(raw: f32) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(SCORE_PRECISION);
    // Adding 0.0 turns -0.0 into 0.0 so tiny negatives tie with the sentinel
    (f64::from(raw) * factor).round() / factor + 0.0
}

/// Video length bucket, passed to the provider unchanged
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VideoDuration {
    Short,
    Medium,
    Long,
}

impl VideoDuration {
    /// Provider-native `videoDuration` value
    pub fn as_api_value(&self) -> &'static str {
        match self {
            VideoDuration::Short => "short",
            VideoDuration::Medium => "medium",
            VideoDuration::Long => "long",
        }
    }
}

/// Coarse publish-time window
///
/// Offsets are fixed: a month is 30 days and a year is 365 days, regardless of
/// the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecencyBucket {
    LastHour,
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

impl RecencyBucket {
    /// How far back from now the window reaches
    pub fn offset(&self) -> TimeDelta {
        match self {
            RecencyBucket::LastHour => TimeDelta::hours(1),
            RecencyBucket::Today => TimeDelta::days(1),
            RecencyBucket::ThisWeek => TimeDelta::days(7),
            RecencyBucket::ThisMonth => TimeDelta::days(30),
            RecencyBucket::ThisYear => TimeDelta::days(365),
        }
    }

    /// Lower bound on publish time relative to `now`
    pub fn published_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.offset()
    }
}

/// Optional filters applied at retrieval time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub duration: Option<VideoDuration>,
    pub recency: Option<RecencyBucket>,
}

/// A request sent to the video search provider
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_items: usize,
    pub duration: Option<VideoDuration>,
    pub published_after: Option<DateTime<Utc>>,
}

// ============================================================================
// YouTube Data API Types
// ============================================================================

/// A single entry of a `search.list` response
#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeSearchItem {
    pub id: YouTubeItemId,
    pub snippet: YouTubeSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeItemId {
    /// Absent for channel and playlist results
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl YouTubeSearchItem {
    /// Converts to a candidate; items without a video ID yield `None`
    pub fn into_candidate(self) -> Option<Candidate> {
        let video_id = self.id.video_id?;
        Some(Candidate::new(
            video_id,
            self.snippet.title,
            self.snippet.description,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_candidate_derives_watch_url() {
        let candidate = Candidate::new(
            "dQw4w9WgXcQ".to_string(),
            "Linear Algebra".to_string(),
            String::new(),
        );
        assert_eq!(candidate.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_scoring_text_joins_title_and_description() {
        let candidate = Candidate::new(
            "v1".to_string(),
            "Vectors".to_string(),
            "An intro to vector spaces".to_string(),
        );
        assert_eq!(candidate.scoring_text(), "Vectors An intro to vector spaces");
    }

    #[test]
    fn test_score_rounded_to_four_digits() {
        let candidate = Candidate::new("v1".to_string(), "t".to_string(), "d".to_string());
        let scored = ScoredCandidate::new(candidate, 0.123_456_7);
        assert_eq!(scored.score, 0.1235);
    }

    #[test]
    fn test_scored_candidate_serializes_flat() {
        let candidate = Candidate::new("abc".to_string(), "Title".to_string(), "Desc".to_string());
        let json = serde_json::to_value(ScoredCandidate::new(candidate, 0.5)).unwrap();
        assert_eq!(json["video_id"], "abc");
        assert_eq!(json["title"], "Title");
        assert_eq!(json["url"], "https://www.youtube.com/watch?v=abc");
        assert_eq!(json["score"], 0.5);
    }

    #[test]
    fn test_recency_bucket_offsets() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();

        assert_eq!(
            RecencyBucket::LastHour.published_after(now),
            Utc.with_ymd_and_hms(2024, 3, 31, 11, 0, 0).unwrap()
        );
        assert_eq!(
            RecencyBucket::Today.published_after(now),
            Utc.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap()
        );
        assert_eq!(
            RecencyBucket::ThisWeek.published_after(now),
            Utc.with_ymd_and_hms(2024, 3, 24, 12, 0, 0).unwrap()
        );
        // Fixed 30 days, not "one calendar month" (which would be Feb 29)
        assert_eq!(
            RecencyBucket::ThisMonth.published_after(now),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
        // 2024 is a leap year, so 365 days lands on April 1st of 2023
        assert_eq!(
            RecencyBucket::ThisYear.published_after(now),
            Utc.with_ymd_and_hms(2023, 4, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_filter_serde_names() {
        let bucket: RecencyBucket = serde_json::from_str("\"this_week\"").unwrap();
        assert_eq!(bucket, RecencyBucket::ThisWeek);

        let duration: VideoDuration = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(duration, VideoDuration::Medium);
        assert_eq!(duration.as_api_value(), "medium");

        assert!(serde_json::from_str::<RecencyBucket>("\"this_decade\"").is_err());
    }

    #[test]
    fn test_search_item_without_video_id_is_skipped() {
        let item: YouTubeSearchItem = serde_json::from_value(serde_json::json!({
            "id": { "kind": "youtube#channel", "channelId": "UC123" },
            "snippet": { "title": "A channel", "description": "" }
        }))
        .unwrap();
        assert!(item.into_candidate().is_none());
    }

    #[test]
    fn test_search_item_to_candidate() {
        let item: YouTubeSearchItem = serde_json::from_value(serde_json::json!({
            "id": { "kind": "youtube#video", "videoId": "V1" },
            "snippet": { "title": "Matrices", "description": "Row reduction" }
        }))
        .unwrap();
        let candidate = item.into_candidate().unwrap();
        assert_eq!(candidate.video_id, "V1");
        assert_eq!(candidate.title, "Matrices");
        assert_eq!(candidate.description, "Row reduction");
    }
}
