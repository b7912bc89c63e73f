use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use pixup::commands::{self, AppState};
use pixup::Config;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a local image, enhance it and save the pair to history
    EnhanceFile { path: String },
    /// Enhance an image that is already online
    EnhanceUrl { url: String },
    /// Browse and manage enhancement history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Save the enhanced image of a history entry
    Download {
        id: String,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    List,
    /// Show original and enhanced URLs side by side
    Show { id: String },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Config::load();
    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("startup failed: {e}");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&state, args.command).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState, command: Command) -> Result<String, String> {
    match command {
        Command::EnhanceFile { path } => commands::enhance::enhance_file(state, &path)
            .await
            .map(|r| commands::history::render_record(&r)),
        Command::EnhanceUrl { url } => commands::enhance::enhance_url(state, &url)
            .await
            .map(|r| commands::history::render_record(&r)),
        Command::History { action } => match action {
            HistoryAction::List => Ok(commands::history::list(state).await),
            HistoryAction::Show { id } => commands::history::show(state, &id).await,
            HistoryAction::Delete { id, yes } => {
                if !yes && !confirm(&format!("Delete history entry {id}?")).await {
                    return Ok("Cancelled.".to_string());
                }
                commands::history::delete(state, &id)
                    .await
                    .map(|_| format!("Deleted {id}"))
            }
            HistoryAction::Clear { yes } => {
                if !yes && !confirm("Delete all history entries?").await {
                    return Ok("Cancelled.".to_string());
                }
                commands::history::clear(state)
                    .await
                    .map(|n| format!("Deleted {n} entries"))
            }
        },
        Command::Download { id, out } => commands::download::download_enhanced(state, &id, &out)
            .await
            .map(|path| format!("Saved to {}", path.display())),
    }
}

/// y/N prompt on stdin; anything but `y`/`yes` declines.
async fn confirm(prompt: &str) -> bool {
    let mut stdout = tokio::io::stdout();
    let _ = stdout.write_all(format!("{prompt} [y/N] ").as_bytes()).await;
    let _ = stdout.flush().await;

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    if reader.read_line(&mut line).await.is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
