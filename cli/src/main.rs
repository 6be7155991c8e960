use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use todo_cli::{repl, Config, Interpreter};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// In-memory todo list for the terminal
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(version, about, long_about = None)]
struct Args {
    /// Prompt shown before each command (overrides TODO_PROMPT)
    #[arg(long)]
    prompt: Option<String>,

    /// Do not print the startup banner
    #[arg(long)]
    no_banner: bool,

    /// Tracing filter directive (overrides TODO_LOG)
    #[arg(long)]
    log_filter: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Read commands from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(prompt) = args.prompt {
        config.prompt = prompt;
    }
    if args.no_banner {
        config.show_banner = false;
    }
    if let Some(filter) = args.log_filter {
        config.log_filter = filter;
    }
    if args.debug {
        config.log_filter = "debug".to_string();
    }
    config.script = args.script;

    // Logs go to stderr; stdout is reserved for command output.
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter '{}'", config.log_filter))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    repl::spawn_interrupt_handler().context("failed to install Ctrl-C handler")?;

    let mut interpreter = Interpreter::new(io::stdout());
    match &config.script {
        Some(path) => {
            info!(path = %path.display(), "reading commands from script");
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            repl::run(BufReader::new(file), &mut interpreter, &config)?;
        }
        None => {
            repl::run(io::stdin().lock(), &mut interpreter, &config)?;
        }
    }

    Ok(())
}
