use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use component_quiz::ComponentConfig;
use quiz_spec::{
    CommonMark, Quiz, QuizStore, RenderOptions, Submission, check, render_quiz, render_result,
    render_result_text, snapshot_schema,
};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Quiz preview and answer checking CLI",
    long_about = "Renders full quiz snapshots as HTML previews and checks answers against them"
)]
struct Cli {
    /// Log at info level regardless of RUST_LOG.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Subcommand)]
enum Command {
    /// Render a quiz snapshot as an HTML preview document.
    Preview {
        /// Path to the full quiz snapshot JSON.
        #[arg(long, value_name = "QUIZ")]
        quiz: PathBuf,
        /// Write the document here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// JSON config file (`{"render": {...}}`).
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
        /// Override the URL each item form posts to.
        #[arg(long, value_name = "URL")]
        check_action: Option<String>,
    },
    /// Check an answer against one item of a quiz snapshot.
    Check {
        /// Path to the full quiz snapshot JSON.
        #[arg(long, value_name = "QUIZ")]
        quiz: PathBuf,
        /// Section code.
        #[arg(long, value_name = "SC")]
        section: String,
        /// Item code.
        #[arg(long, value_name = "SC")]
        item: String,
        /// Selected slot index (repeatable) for choice and drop-down items.
        #[arg(long, value_name = "N", conflicts_with = "answer")]
        sol: Vec<String>,
        /// Typed answer (repeatable) for fill-in items with hidden hints.
        #[arg(long, value_name = "TEXT")]
        answer: Vec<String>,
        /// Output format for the result.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the JSON Schema of a full quiz snapshot.
    Schema,
}

fn main() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Preview {
            quiz,
            out,
            config,
            check_action,
        } => run_preview(&quiz, out, config, check_action).map(|_| ExitCode::SUCCESS),
        Command::Check {
            quiz,
            section,
            item,
            sol,
            answer,
            format,
        } => run_check(&quiz, &section, &item, sol, answer, format),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&snapshot_schema())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_quiz(path: &Path) -> CliResult<Arc<Quiz>> {
    let body = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    let store = QuizStore::new();
    let id = store.ingest_json(&body)?;
    Ok(store.require(&id)?)
}

fn load_options(config: Option<PathBuf>, check_action: Option<String>) -> CliResult<RenderOptions> {
    let mut options = match config {
        Some(path) => {
            let body = fs::read_to_string(&path)
                .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
            ComponentConfig::from_json(&body)?.render
        }
        None => RenderOptions::default(),
    };
    if let Some(action) = check_action {
        options.check_action = action;
    }
    Ok(options)
}

fn run_preview(
    quiz_path: &Path,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    check_action: Option<String>,
) -> CliResult<()> {
    let quiz = load_quiz(quiz_path)?;
    let options = load_options(config, check_action)?;
    let html = render_quiz(&quiz, &CommonMark, &options)?;
    match out {
        Some(path) => {
            fs::write(&path, html)
                .map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
            tracing::info!(quiz = %quiz.id, out = %path.display(), "preview written");
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn run_check(
    quiz_path: &Path,
    section: &str,
    item_sc: &str,
    sol: Vec<String>,
    answer: Vec<String>,
    format: OutputFormat,
) -> CliResult<ExitCode> {
    if sol.is_empty() && answer.is_empty() {
        return Err("provide --sol or --answer".into());
    }
    let quiz = load_quiz(quiz_path)?;
    let item = quiz.item(section, item_sc)?;
    let submission = Submission::for_item(item, sol, answer)?;
    let result = check(&quiz, section, item_sc, &submission)?;

    match format {
        OutputFormat::Text => println!("{}", render_result_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Html => println!("{}", render_result(&result)?),
    }

    Ok(if result.is_correct() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
