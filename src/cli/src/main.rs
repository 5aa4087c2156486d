//! CLI for repo-showcase.
//!
//! Loads a GitHub user's public repositories once, then reads commands from
//! stdin to page through, filter, and re-localize the project list.

use clap::Parser;
use repo_showcase::{
    Command, Flow, ListEntry, MessageKind, PageView, Session, SessionConfig, SessionError, HELP,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Repo Showcase - Browse a GitHub user's projects page by page.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the showcase config file.
    #[arg(long, default_value = "showcase.toml")]
    config: PathBuf,

    /// GitHub user whose repositories are listed.
    #[arg(long)]
    username: Option<String>,

    /// Language to start in (e.g. pt-br, en).
    #[arg(long)]
    lang: Option<String>,

    /// GitHub Personal Access Token (raises the API rate limit).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Directory for the session cache; kept in memory when omitted.
    #[arg(long, env = "REPO_SHOWCASE_CACHE_DIR")]
    cache_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // Process-wide rustls provider for the GitHub client.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    let mut session = match build_session(args) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Critical failure");
            return ExitCode::from(2);
        }
    };

    let loaded = session.start().await.is_ok();
    print_page(session.page());

    if let Err(e) = run_commands(&mut session) {
        error!(error = %e, "Failed to read input");
        return ExitCode::from(2);
    }

    if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so they do not interleave with the page on stdout.
/// Log level filtering comes from the `RUST_LOG` env var (defaults to "info").
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Builds the session from command line arguments.
fn build_session(args: Args) -> Result<Session, SessionError> {
    let mut config = SessionConfig::new(args.config);
    if let Some(token) = args.token.filter(|t| !t.trim().is_empty()) {
        config = config.with_token(token);
    }
    if let Some(dir) = args.cache_dir {
        config = config.with_cache_dir(dir);
    }
    if let Some(username) = args.username {
        config = config.with_username(username);
    }
    if let Some(lang) = args.lang {
        config = config.with_language(lang);
    }
    Session::new(config)
}

/// Reads commands until `quit` or end of input.
fn run_commands(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    prompt()?;

    for line in stdin.lock().lines() {
        let Some(command) = Command::parse(&line?) else {
            prompt()?;
            continue;
        };

        match session.execute(command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Help) => println!("{HELP}"),
            Ok(Flow::Continue) => print_page(session.page()),
            Err(SessionError::UnknownCommand { command }) => {
                println!("Unknown command: {command}\n{HELP}");
            }
            Err(e) => warn!(error = %e, "Command failed"),
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

/// Prints the whole page.
fn print_page(page: &PageView) {
    let text = |key: &str| page.static_text(key).unwrap_or_default().to_string();

    println!("\n== {} ==", text("projects-title"));
    println!("{}", text("projects-subtitle"));

    if page.query().is_empty() {
        println!("[{}]", page.placeholder());
    } else {
        println!("[{}] {}", text("projects-search-btn"), page.query());
    }
    println!();

    for entry in page.entries() {
        match entry {
            ListEntry::Loading(text) => println!("... {text}"),
            ListEntry::Card(card) => println!("{card}"),
            ListEntry::Message {
                kind: MessageKind::Info,
                text,
            } => println!("{text}"),
            ListEntry::Message {
                kind: MessageKind::Error,
                text,
            } => println!("!! {text}"),
        }
    }

    let mut controls = Vec::new();
    if page.show_more_visible() {
        controls.push(format!("more: {}", text("projects-show-more")));
    }
    if page.clear_search_visible() {
        controls.push(format!("clear: {}", text("projects-clear-btn")));
    }
    if !controls.is_empty() {
        println!("\n({})", controls.join(" | "));
    }
}
