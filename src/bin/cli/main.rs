mod app;
mod commands;
mod render;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use studyloop_lib::topics::Rating;

#[derive(Parser)]
#[command(name = "studyloop-cli", about = "Spaced-repetition study tracker", version)]
struct Cli {
    /// Use a specific data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Act as this user instead of the configured one
    #[arg(long, global = true)]
    user: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new topic, due today
    Add {
        /// Topic title
        title: String,
        /// Notes text (use "-" to read from stdin)
        #[arg(long)]
        notes: Option<String>,
    },

    /// Topics scheduled for today
    Today,

    /// Every topic waiting for review, oldest first
    Due,

    /// List topics
    List {
        /// Only topics scheduled on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show a topic
    Show {
        /// Topic id (a unique prefix is enough)
        id: String,
    },

    /// Record a review and schedule the next one
    Review {
        /// Topic id (a unique prefix is enough)
        id: String,
        /// How it went: hard, normal (or good), easy
        rating: Rating,
    },

    /// Delete a topic permanently
    Delete {
        /// Topic id (a unique prefix is enough)
        id: String,
    },

    /// Show the default review schedule for a topic added now
    Schedule,

    /// Show or change configuration
    Config {
        /// Save this user id as the default
        #[arg(long)]
        set_user: Option<String>,
    },
}

/// Read notes from stdin when given as "-"
fn resolve_content(content: Option<String>) -> anyhow::Result<Option<String>> {
    read_notes(content, std::io::stdin())
}

fn read_notes<R: Read>(content: Option<String>, mut reader: R) -> anyhow::Result<Option<String>> {
    match content.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            reader
                .read_to_string(&mut buf)
                .context("Failed to read notes from stdin")?;
            Ok(if buf.trim().is_empty() { None } else { Some(buf) })
        }
        _ => Ok(content),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let mut app = app::App::new(cli.data_dir, cli.user.as_deref())?;

    match cli.command {
        None | Some(Command::Today) => {
            commands::list::run_today(&app, &cli.format, use_color)?;
        }
        Some(Command::Add { title, notes }) => {
            let notes = resolve_content(notes)?;
            commands::add::run(&mut app, &title, notes, &cli.format, use_color)?;
        }
        Some(Command::Due) => {
            commands::list::run_due(&app, &cli.format, use_color)?;
        }
        Some(Command::List { date }) => {
            commands::list::run_list(&app, date, &cli.format, use_color)?;
        }
        Some(Command::Show { id }) => {
            commands::show::run(&app, &id, &cli.format, use_color)?;
        }
        Some(Command::Review { id, rating }) => {
            commands::review::run(&mut app, &id, rating, &cli.format, use_color)?;
        }
        Some(Command::Delete { id }) => {
            commands::delete::run(&mut app, &id, &cli.format)?;
        }
        Some(Command::Schedule) => {
            commands::schedule::run(&cli.format)?;
        }
        Some(Command::Config { set_user }) => {
            commands::config::run(&mut app, set_user.as_deref(), &cli.format)?;
        }
    }

    Ok(())
}
