use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, id: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let topic = app.find_topic(id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&terminal::topic_json(&topic))?);
        }
        OutputFormat::Plain => {
            for line in terminal::render_topic_card(&topic, use_color) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
