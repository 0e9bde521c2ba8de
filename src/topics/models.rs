//! Data models for study topics

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date;

/// Interval assigned to a freshly created topic
pub const INITIAL_INTERVAL: u32 = 1;

/// How hard a review felt to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Hard,
    Normal,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Hard, Rating::Normal, Rating::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Hard => "hard",
            Rating::Normal => "normal",
            Rating::Easy => "easy",
        }
    }

    /// Label shown on review buttons
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Hard => "Hard",
            Rating::Normal => "Good",
            Rating::Easy => "Easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown rating '{0}' (expected hard, normal, good or easy)")]
pub struct ParseRatingError(String);

impl FromStr for Rating {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hard" => Ok(Rating::Hard),
            "normal" | "good" => Ok(Rating::Normal),
            "easy" => Ok(Rating::Easy),
            _ => Err(ParseRatingError(s.to_string())),
        }
    }
}

/// A single past review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub rating: Rating,
}

impl HistoryEntry {
    pub fn new(rating: Rating) -> Self {
        Self {
            date: Utc::now(),
            rating,
        }
    }
}

/// A unit of study material with its own review schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub added_at: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
    /// Current spacing in whole days, always >= 1
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Append-only review log
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

fn default_interval() -> u32 {
    INITIAL_INTERVAL
}

impl Topic {
    /// New topic, due immediately with a one-day interval
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, notes: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title: title.into(),
            notes: notes.filter(|n| !n.trim().is_empty()),
            added_at: now,
            next_review: now,
            interval: INITIAL_INTERVAL,
            history: Vec::new(),
        }
    }

    /// Number of reviews performed since creation
    pub fn review_count(&self) -> usize {
        self.history.len()
    }

    pub fn last_review(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Where the topic sits in its lifecycle, judged by calendar day in the
    /// zone of `now`
    pub fn status_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TopicStatus {
        let today = now.date_naive();
        if date::day_in(&self.next_review, &now.timezone()) <= today {
            TopicStatus::Due
        } else {
            TopicStatus::Scheduled
        }
    }

    pub fn status(&self) -> TopicStatus {
        self.status_at(&chrono::Local::now())
    }

    pub fn is_due(&self) -> bool {
        self.status() == TopicStatus::Due
    }
}

/// Lifecycle state of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TopicStatus {
    /// Review day is today or earlier
    Due,
    /// Review day is in the future
    Scheduled,
}
