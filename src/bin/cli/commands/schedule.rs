use anyhow::Result;

use studyloop_lib::date::format_readable_date;
use studyloop_lib::topics::algorithm::{default_intervals, initial_schedule};

use crate::OutputFormat;

pub fn run(format: &OutputFormat) -> Result<()> {
    let schedule = initial_schedule();
    let intervals = default_intervals();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = intervals.iter().zip(&schedule).map(|(days, date)| {
                serde_json::json!({
                    "interval": days,
                    "date": date.to_rfc3339(),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Default review schedule from today:");
            for (days, date) in intervals.iter().zip(&schedule) {
                println!("  +{:<3} {}", days, format_readable_date(date));
            }
        }
    }

    Ok(())
}
