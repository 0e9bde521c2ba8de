//! Persistent record store for topics
//!
//! The in-memory `TopicStore` is mirrored into a `TopicRepository` by the
//! caller after each mutation. Ownership checks live here, not in the store.
//!
//! File layout under the data directory:
//! ```text
//! {data_dir}/
//! └── topics.json   # Array of all topics, every user
//! ```

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::models::{HistoryEntry, Rating, Topic};

#[derive(Error, Debug)]
pub enum TopicStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Topic not found: {0}")]
    TopicNotFound(Uuid),

    #[error("Topic {0} belongs to another user")]
    Forbidden(Uuid),

    #[error("Title is required")]
    TitleRequired,
}

pub type Result<T> = std::result::Result<T, TopicStorageError>;

/// Persistence operations keyed by topic id
pub trait TopicRepository {
    /// All topics owned by `user_id`, ordered by next review ascending
    fn list(&self, user_id: &str) -> Result<Vec<Topic>>;

    /// Create a topic with server-assigned id, timestamps and defaults
    fn create(&self, user_id: &str, title: &str, notes: Option<String>) -> Result<Topic>;

    /// Record a review: new schedule plus one history entry stamped now
    fn update(
        &self,
        user_id: &str,
        id: Uuid,
        next_review: DateTime<Utc>,
        interval: u32,
        rating: Rating,
    ) -> Result<Topic>;

    fn delete(&self, user_id: &str, id: Uuid) -> Result<()>;
}

/// Topics stored as a single JSON array on disk
pub struct JsonTopicRepository {
    data_dir: PathBuf,
}

impl JsonTopicRepository {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn topics_file(&self) -> PathBuf {
        self.data_dir.join("topics.json")
    }

    fn load_all(&self) -> Result<Vec<Topic>> {
        let path = self.topics_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            log::warn!("Empty topics file in {:?}, treating as no topics", self.data_dir);
            return Ok(Vec::new());
        }
        let topics: Vec<Topic> = serde_json::from_str(&content)?;
        Ok(topics)
    }

    fn save_all(&self, topics: &[Topic]) -> Result<()> {
        let json = serde_json::to_string_pretty(topics)?;
        fs::write(self.topics_file(), json)?;
        Ok(())
    }

    /// Position of `id` in `topics`, checking that `user_id` owns it
    fn owned_position(topics: &[Topic], user_id: &str, id: Uuid) -> Result<usize> {
        let pos = topics
            .iter()
            .position(|t| t.id == id)
            .ok_or(TopicStorageError::TopicNotFound(id))?;

        if topics[pos].user_id != user_id {
            return Err(TopicStorageError::Forbidden(id));
        }

        Ok(pos)
    }
}

impl TopicRepository for JsonTopicRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Topic>> {
        let mut topics: Vec<Topic> = self
            .load_all()?
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect();
        topics.sort_by_key(|t| t.next_review);
        Ok(topics)
    }

    fn create(&self, user_id: &str, title: &str, notes: Option<String>) -> Result<Topic> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TopicStorageError::TitleRequired);
        }

        let topic = Topic::new(user_id, title, notes);

        let mut topics = self.load_all()?;
        topics.push(topic.clone());
        self.save_all(&topics)?;

        log::info!("Created topic {} for user {}", topic.id, user_id);
        Ok(topic)
    }

    fn update(
        &self,
        user_id: &str,
        id: Uuid,
        next_review: DateTime<Utc>,
        interval: u32,
        rating: Rating,
    ) -> Result<Topic> {
        let mut topics = self.load_all()?;
        let pos = Self::owned_position(&topics, user_id, id)?;

        let topic = &mut topics[pos];
        topic.next_review = next_review;
        topic.interval = interval;
        topic.history.push(HistoryEntry::new(rating));
        let updated = topic.clone();

        self.save_all(&topics)?;

        log::info!(
            "Reviewed topic {} ({}): next review in {} days",
            id,
            rating,
            interval
        );
        Ok(updated)
    }

    fn delete(&self, user_id: &str, id: Uuid) -> Result<()> {
        let mut topics = self.load_all()?;
        let pos = Self::owned_position(&topics, user_id, id)?;
        topics.remove(pos);
        self.save_all(&topics)?;

        log::info!("Deleted topic {}", id);
        Ok(())
    }
}
