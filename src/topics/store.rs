//! In-memory topic collection
//!
//! `TopicStore` is the client-side cache the presentation layer renders from.
//! It is an owned value: callers hold it and pass it around explicitly.
//! Mutations never fail; a mutation naming an unknown id leaves the
//! collection untouched and reports the miss through its return value.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use super::algorithm::calculate_next_review_at;
use super::models::{HistoryEntry, Rating, Topic, TopicStatus};
use crate::date;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicStore {
    topics: Vec<Topic>,
}

impl TopicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topics(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    // ===== Mutations =====

    /// Replace the whole collection (after a bulk fetch)
    pub fn set_topics(&mut self, topics: Vec<Topic>) {
        self.topics = topics;
    }

    /// Append a topic. Duplicate ids are not rejected.
    pub fn add_topic(&mut self, topic: Topic) {
        self.topics.push(topic);
    }

    /// Apply a review outcome: overwrite `next_review`/`interval` and append
    /// a history entry stamped now.
    ///
    /// Every entry with `id` is updated. Returns the first one, or `None` if
    /// no topic has `id`.
    pub fn update_topic(
        &mut self,
        id: Uuid,
        next_review: DateTime<Utc>,
        interval: u32,
        rating: Rating,
    ) -> Option<&Topic> {
        self.update_topic_at(id, next_review, interval, rating, Utc::now())
    }

    pub fn update_topic_at(
        &mut self,
        id: Uuid,
        next_review: DateTime<Utc>,
        interval: u32,
        rating: Rating,
        reviewed_at: DateTime<Utc>,
    ) -> Option<&Topic> {
        let mut first = None;
        for (index, topic) in self.topics.iter_mut().enumerate() {
            if topic.id != id {
                continue;
            }

            topic.next_review = next_review;
            topic.interval = interval;
            topic.history.push(HistoryEntry {
                date: reviewed_at,
                rating,
            });
            first.get_or_insert(index);
        }

        let Some(index) = first else {
            log::debug!("Review for unknown topic {} ignored", id);
            return None;
        };

        Some(&self.topics[index])
    }

    /// Run the scheduler on the topic's current interval and apply the result
    pub fn review_topic(&mut self, id: Uuid, rating: Rating) -> Option<&Topic> {
        self.review_topic_at(id, rating, &Local::now())
    }

    pub fn review_topic_at<Tz: TimeZone>(
        &mut self,
        id: Uuid,
        rating: Rating,
        now: &DateTime<Tz>,
    ) -> Option<&Topic> {
        let current_interval = self.get(id)?.interval;
        let result = calculate_next_review_at(rating, current_interval, now);
        self.update_topic_at(
            id,
            result.next_review,
            result.new_interval,
            rating,
            now.with_timezone(&Utc),
        )
    }

    /// Remove every entry with `id`, returning the first one removed
    pub fn delete_topic(&mut self, id: Uuid) -> Option<Topic> {
        let index = self.topics.iter().position(|t| t.id == id)?;
        let removed = self.topics.remove(index);
        self.topics.retain(|t| t.id != id);
        Some(removed)
    }

    // ===== Queries =====

    /// Topics scheduled for the current local day
    pub fn todays_topics(&self) -> Vec<&Topic> {
        self.topics_by_date(&Local::now())
    }

    /// Topics scheduled for the calendar day of `date`, in the zone of `date`
    pub fn topics_by_date<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> Vec<&Topic> {
        self.topics_on(date.date_naive(), &date.timezone())
    }

    /// Topics whose `next_review` falls on `day` as seen from `tz`
    pub fn topics_on<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Vec<&Topic> {
        self.topics
            .iter()
            .filter(|t| date::day_in(&t.next_review, tz) == day)
            .collect()
    }

    /// Every topic waiting for review as of `now`, oldest first
    pub fn due_topics_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&Topic> {
        let mut due: Vec<&Topic> = self
            .topics
            .iter()
            .filter(|t| t.status_at(now) == TopicStatus::Due)
            .collect();
        due.sort_by_key(|t| t.next_review);
        due
    }

    pub fn due_topics(&self) -> Vec<&Topic> {
        self.due_topics_at(&Local::now())
    }

    /// All topics ordered by `next_review` ascending
    pub fn sorted_by_next_review(&self) -> Vec<&Topic> {
        let mut sorted: Vec<&Topic> = self.topics.iter().collect();
        sorted.sort_by_key(|t| t.next_review);
        sorted
    }
}
