use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, id: &str, format: &OutputFormat) -> Result<()> {
    let topic = app.delete_topic(id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic.id.to_string(),
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted \"{}\"", topic.title);
        }
    }

    Ok(())
}
