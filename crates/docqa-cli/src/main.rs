use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use docqa_answer::{heuristic, ChatAnswerer, ChatSettings};
use docqa_core::AppConfig;
use docqa_sentiment::ComprehendClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "docqa")]
#[command(about = "Answer questions about bill documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Answer a question about a plain-text document
    Ask {
        /// Path to the extracted document text
        #[arg(long)]
        document: PathBuf,
        #[arg(long)]
        question: String,
        #[arg(long, value_enum, default_value_t = Mode::Auto)]
        mode: Mode,
    },
    /// Detect the sentiment of a piece of text with AWS Comprehend
    Sentiment {
        #[arg(long)]
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Chat completion when an OpenAI key is configured, heuristic otherwise
    Auto,
    Heuristic,
    Chat,
}

/// Settles `auto` by whether a key is configured. Chat failures are not
/// turned into heuristic answers.
fn resolve_mode(mode: Mode, has_openai_key: bool) -> Mode {
    match mode {
        Mode::Auto if has_openai_key => Mode::Chat,
        Mode::Auto => Mode::Heuristic,
        other => other,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = docqa_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask {
            document,
            question,
            mode,
        } => ask(&config, &document, &question, mode).await,
        Commands::Sentiment { text } => sentiment(&config, &text).await,
    }
}

async fn ask(config: &AppConfig, document: &Path, question: &str, mode: Mode) -> anyhow::Result<()> {
    let document_text = std::fs::read_to_string(document)
        .with_context(|| format!("failed to read document {}", document.display()))?;

    let mode = resolve_mode(mode, config.has_openai_api_key());
    tracing::info!(?mode, document = %document.display(), "answering question");

    let answer = match mode {
        Mode::Chat => {
            let answerer = ChatAnswerer::new(ChatSettings::from_app_config(config))?;
            answerer.answer(question, &document_text).await?
        }
        Mode::Heuristic | Mode::Auto => heuristic::answer(question, &document_text),
    };

    println!("{}", serde_json::to_string_pretty(&answer)?);
    Ok(())
}

async fn sentiment(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let credentials = config.aws_credentials()?;
    let client = ComprehendClient::new(credentials, config.http_timeout_secs)?;
    let result = client.detect_sentiment(text).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
