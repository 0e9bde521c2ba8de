use anyhow::Result;

use studyloop_lib::config::StudyConfig;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, set_user: Option<&str>, format: &OutputFormat) -> Result<()> {
    if let Some(user) = set_user {
        app.set_user(user)?;
    }

    let config_path = StudyConfig::config_path(&app.data_dir);
    let topics_dir = app.config.topics_dir(&app.data_dir);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "userId": app.user_id(),
                "dataDir": app.data_dir.to_string_lossy(),
                "topicsDir": topics_dir.to_string_lossy(),
                "configFile": config_path.to_string_lossy(),
                "configExists": config_path.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if set_user.is_some() {
                println!("Saved user id to {}", config_path.display());
            }
            println!("User:        {}", app.user_id());
            println!("Data dir:    {}", app.data_dir.display());
            println!("Topics dir:  {}", topics_dir.display());
            println!("Config file: {}{}", config_path.display(),
                if config_path.exists() { "" } else { " (not created yet)" });
        }
    }

    Ok(())
}
