use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    title: &str,
    notes: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let topic = app.add_topic(title, notes)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&terminal::topic_json(&topic))?);
        }
        OutputFormat::Plain => {
            if use_color {
                println!("Added {}\"{}\"{}", terminal::Color::BOLD, topic.title, terminal::Color::RESET);
            } else {
                println!("Added \"{}\"", topic.title);
            }
            println!("  Due: today");
            println!("  ID: {}", topic.id);
        }
    }

    Ok(())
}
