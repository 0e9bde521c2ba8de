use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use studyloop_lib::config::StudyConfig;
use studyloop_lib::topics::algorithm::calculate_next_review;
use studyloop_lib::topics::{JsonTopicRepository, Rating, Topic, TopicRepository, TopicStore};

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub config: StudyConfig,
    pub repository: JsonTopicRepository,
    pub store: TopicStore,
}

impl App {
    /// Load config and the user's topics from the data directory
    pub fn new(data_dir: Option<PathBuf>, user: Option<&str>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => StudyConfig::default_data_dir().context("Failed to get data directory")?,
        };

        let mut config = StudyConfig::load(&data_dir).context("Failed to load config")?;
        if let Some(user) = user {
            config.user_id = user.to_string();
        }

        let repository = JsonTopicRepository::new(config.topics_dir(&data_dir))
            .context("Failed to initialize topic storage")?;

        let mut store = TopicStore::new();
        store.set_topics(
            repository
                .list(&config.user_id)
                .context("Failed to load topics")?,
        );

        Ok(Self {
            data_dir,
            config,
            repository,
            store,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.config.user_id
    }

    /// Find a topic by id (exact match, then unique prefix)
    pub fn find_topic(&self, id: &str) -> Result<Topic> {
        let id_lower = id.trim().to_lowercase();
        if id_lower.is_empty() {
            bail!("Topic id is required");
        }

        let topics = self.store.topics();

        if let Some(topic) = topics.iter().find(|t| t.id.to_string() == id_lower) {
            return Ok(topic.clone());
        }

        let matches: Vec<&Topic> = topics
            .iter()
            .filter(|t| t.id.to_string().starts_with(&id_lower))
            .collect();

        match matches.len() {
            0 => bail!("No topic matching '{}'", id),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous topic id '{}'. Matches:\n{}", id,
                matches.iter().map(|t| format!("  - {} {}", t.id, t.title)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Create a topic in storage and add it to the store
    pub fn add_topic(&mut self, title: &str, notes: Option<String>) -> Result<Topic> {
        let topic = self
            .repository
            .create(&self.config.user_id, title, notes)
            .context("Failed to create topic")?;
        self.store.add_topic(topic.clone());
        Ok(topic)
    }

    /// Schedule the next review, apply it to the store, then persist it
    pub fn review_topic(&mut self, id: &str, rating: Rating) -> Result<Topic> {
        let topic = self.find_topic(id)?;
        let result = calculate_next_review(rating, topic.interval);

        if self
            .store
            .update_topic(topic.id, result.next_review, result.new_interval, rating)
            .is_none()
        {
            bail!("Topic {} disappeared before it could be reviewed", topic.id);
        }

        self.repository
            .update(
                &self.config.user_id,
                topic.id,
                result.next_review,
                result.new_interval,
                rating,
            )
            .context("Failed to save review")
    }

    /// Remove a topic from the store and from storage
    pub fn delete_topic(&mut self, id: &str) -> Result<Topic> {
        let topic = self.find_topic(id)?;
        self.store.delete_topic(topic.id);
        self.repository
            .delete(&self.config.user_id, topic.id)
            .context("Failed to delete topic")?;
        Ok(topic)
    }

    /// Persist a new default user id
    pub fn set_user(&mut self, user_id: &str) -> Result<()> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            bail!("User id cannot be empty");
        }

        self.config.user_id = user_id.to_string();
        self.config
            .save(&self.data_dir)
            .context("Failed to save config")
    }
}
