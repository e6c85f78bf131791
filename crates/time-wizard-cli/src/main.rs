use clap::{Parser, Subcommand};

mod commands;
mod terminal;

/// Filter for diagnostics on stderr, e.g. `TIME_WIZARD_LOG=debug`.
const LOG_ENV: &str = "TIME_WIZARD_LOG";

#[derive(Parser)]
#[command(name = "time-wizard", version, about = "Kanban board and pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive pomodoro timer with task reminders
    Pomodoro {
        /// Don't play any sounds
        #[arg(long)]
        mute: bool,
    },
    /// Show tasks grouped by board
    Kanban,
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Board management
    Board {
        #[command(subcommand)]
        action: commands::board::BoardAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Tasks whose reminder is active right now
    Remind {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a recurrence expression against the current time
    Resolve {
        /// Expression, e.g. "every monday 09:00"
        #[arg(required = true, num_args = 1..)]
        expression: Vec<String>,
        /// Print seconds since the epoch instead of a date
        #[arg(long)]
        timestamp: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Pomodoro { mute } => commands::pomodoro::run(mute),
        Commands::Kanban => commands::kanban::run(),
        Commands::Task { action } => commands::task::run(action),
        Commands::Board { action } => commands::board::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Remind { json } => commands::remind::run(json),
        Commands::Resolve {
            expression,
            timestamp,
        } => commands::resolve::run(&expression.join(" "), timestamp),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
