//! Spaced-repetition study tracker
//!
//! The library holds the review scheduler, the in-memory topic store and a
//! JSON-file repository. The `studyloop-cli` binary is the presentation layer.

pub mod config;
pub mod date;
pub mod topics;
