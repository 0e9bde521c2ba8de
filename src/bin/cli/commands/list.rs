use anyhow::Result;
use chrono::{Local, NaiveDate};

use studyloop_lib::topics::Topic;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

fn print_topics(topics: &[&Topic], empty_message: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = topics.iter().map(|t| terminal::topic_json(t)).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if topics.is_empty() {
                println!("{}", empty_message);
                return Ok(());
            }

            for line in terminal::render_topic_table(topics, use_color) {
                println!("{}", line);
            }
            println!("\n{} topics total", topics.len());
        }
    }

    Ok(())
}

/// Topics scheduled for today, earliest first
pub fn run_today(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let mut topics = app.store.todays_topics();
    topics.sort_by_key(|t| t.next_review);
    print_topics(&topics, "Nothing to review today.", format, use_color)
}

/// Today's topics plus anything overdue
pub fn run_due(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let topics = app.store.due_topics();
    print_topics(&topics, "Nothing due. All caught up.", format, use_color)
}

pub fn run_list(app: &App, date: Option<NaiveDate>, format: &OutputFormat, use_color: bool) -> Result<()> {
    match date {
        Some(day) => {
            let mut topics = app.store.topics_on(day, &Local);
            topics.sort_by_key(|t| t.next_review);
            let empty = format!("No topics scheduled for {}.", day.format("%Y-%m-%d"));
            print_topics(&topics, &empty, format, use_color)
        }
        None => {
            let topics = app.store.sorted_by_next_review();
            print_topics(&topics, "No topics yet. Add one with `studyloop-cli add <title>`.", format, use_color)
        }
    }
}
