//! Study topics and their review schedule
//!
//! This module provides:
//! - Topic, rating and review history models
//! - The review scheduling algorithm
//! - An in-memory topic store with due-day queries
//! - A JSON-file repository the store is mirrored into

pub mod algorithm;
pub mod models;
pub mod storage;
pub mod store;

pub use models::*;
pub use storage::{JsonTopicRepository, TopicRepository, TopicStorageError};
pub use store::TopicStore;
