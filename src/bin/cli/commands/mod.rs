pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod review;
pub mod schedule;
pub mod show;
