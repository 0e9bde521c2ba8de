use anyhow::Result;

use studyloop_lib::date::{format_date_distance, format_relative_date};
use studyloop_lib::topics::Rating;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    id: &str,
    rating: Rating,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let topic = app.review_topic(id, rating)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&terminal::topic_json(&topic))?);
        }
        OutputFormat::Plain => {
            if use_color {
                println!("Reviewed {}\"{}\"{} as {}", terminal::Color::BOLD, topic.title, terminal::Color::RESET, rating.label());
            } else {
                println!("Reviewed \"{}\" as {}", topic.title, rating.label());
            }
            println!(
                "  Next review: {} ({})",
                format_relative_date(&topic.next_review),
                format_date_distance(&topic.next_review)
            );
            println!("  Interval: {} day{}", topic.interval, if topic.interval != 1 { "s" } else { "" });
        }
    }

    Ok(())
}
