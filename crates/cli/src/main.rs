use std::io::{self, Read};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use clipvault_core::{
    AiConfig, CapturePreferences, ClipvaultError, NoteSink, PageInfo, SystemClipboard, UriOpener,
    ai, capture, compose_request, default_sources, derive_title, frontmost_app, is_http_url,
};
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Capture the active browser page into an Obsidian vault
#[derive(Parser, Debug)]
#[command(name = "clipvault")]
#[command(author = "Clipvault Contributors")]
#[command(version = VERSION)]
#[command(about = "Capture the active browser page into an Obsidian vault", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Capture the frontmost browser tab (or a copied URL) as a note
    Capture(CaptureArgs),
    /// Ask the assistant a question
    Ask {
        /// The question to answer
        question: String,
        #[command(flatten)]
        ai: AiArgs,
    },
    /// Summarize text as bullet points
    Summarize {
        /// Text to summarize, or "-" for stdin
        input: String,
        #[command(flatten)]
        ai: AiArgs,
    },
    /// Translate text between Japanese and English
    Translate {
        /// Text to translate, or "-" for stdin
        input: String,
        /// Translate into this language instead of auto-detecting the
        /// Japanese/English direction
        #[arg(long, value_name = "LANG")]
        to: Option<String>,
        #[command(flatten)]
        ai: AiArgs,
    },
}

#[derive(Args, Debug)]
struct CaptureArgs {
    /// Obsidian vault name
    #[arg(long, value_name = "NAME")]
    vault: String,

    /// Folder inside the vault for captured notes
    #[arg(long, default_value = "", value_name = "FOLDER")]
    folder: String,

    /// Default tags, comma or whitespace separated
    #[arg(long, default_value = "bookmark,inbox", value_name = "TAGS")]
    tags: String,

    /// Do not add a tag derived from the page's domain
    #[arg(long)]
    no_domain_tag: bool,

    /// Filename template ({{slug}}, {{domain}}, {{yyyy-MM-dd}}, {{yyyyMMdd-HHmmss}})
    #[arg(long, default_value = "{{slug}}", value_name = "TEMPLATE")]
    filename: String,

    /// Capture this URL instead of querying browsers
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Title for the captured page (with --url)
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Print the obsidian:// URI instead of opening it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct AiArgs {
    /// API key (falls back to OPENAI_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Chat-completion endpoint base URL
    #[arg(long, default_value = "https://api.openai.com/v1", value_name = "URL")]
    endpoint: String,

    /// Model identifier
    #[arg(long, default_value = "gpt-4o-mini", value_name = "MODEL")]
    model: String,

    /// Language for answers and summaries
    #[arg(long, default_value = "Japanese", value_name = "LANG")]
    language: String,
}

impl AiArgs {
    fn into_config(self) -> AiConfig {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .unwrap_or_default();
        AiConfig { api_key, endpoint: self.endpoint, model: self.model, language: self.language }
    }
}

/// Read command input, treating "-" as stdin.
fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        Ok(input.to_string())
    }
}

fn run_capture(args: CaptureArgs, verbose: bool) -> Result<(), ClipvaultError> {
    let prefs = CapturePreferences {
        vault: args.vault,
        folder: args.folder,
        default_tags: args.tags,
        use_domain_tag: !args.no_domain_tag,
        filename_template: args.filename,
    };
    let now = chrono::Local::now();

    // Missing configuration aborts before any collaborator is queried.
    if prefs.vault.trim().is_empty() {
        return Err(ClipvaultError::MissingConfiguration("Vault name"));
    }

    // With an explicit URL the browser and clipboard collaborators are
    // skipped entirely.
    if let Some(url) = args.url {
        if !is_http_url(&url) {
            return Err(ClipvaultError::NoUrlResolved);
        }
        let url = url.trim().to_string();
        let title = args.title.unwrap_or_else(|| derive_title(&url));
        let page = PageInfo { url, title, source_app: None };
        let request = compose_request(&prefs, &page, now)?;

        if args.dry_run {
            println!("{}", request.to_uri());
        } else {
            echo::print_progress("Saving to Obsidian...");
            UriOpener.deliver(&request)?;
            echo::print_success("Saved to Obsidian");
        }
        return Ok(());
    }

    if verbose {
        echo::print_step(1, 2, "Resolving the active page");
    }

    let frontmost = frontmost_app().unwrap_or_default();
    let sources = default_sources();
    let clipboard = SystemClipboard;

    if args.dry_run {
        let page = clipvault_core::resolve_page(&frontmost, &sources, &clipboard)?;
        let request = compose_request(&prefs, &page, now)?;
        println!("{}", request.to_uri());
        return Ok(());
    }

    if verbose {
        echo::print_step(2, 2, "Composing and delivering the note");
    }

    echo::print_progress("Saving to Obsidian...");
    let outcome = capture(&prefs, &frontmost, &sources, &clipboard, &UriOpener, now)?;
    echo::print_success("Saved to Obsidian");

    if verbose {
        if let Some(app) = &outcome.page.source_app {
            echo::print_info(&format!("Captured from {app}"));
        }
        echo::print_info(&format!("Note path: {}", outcome.request.path));
    }
    Ok(())
}

/// Map a capture failure to its user-facing message.
///
/// Configuration and resolution failures carry messages meant for the user;
/// anything else is logged in full and reported generically.
fn report_capture_error(err: &ClipvaultError) {
    match err {
        ClipvaultError::MissingConfiguration(_) | ClipvaultError::NoUrlResolved => {
            echo::print_error(&err.to_string());
        }
        other => {
            tracing::error!(detail = %other, "capture failed");
            echo::print_error("Failed to save. An unexpected error occurred. Please try again.");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(io::stderr)
        .init();

    if cli.verbose {
        echo::print_banner();
    }

    match cli.command {
        Commands::Capture(args) => {
            if let Err(err) = run_capture(args, cli.verbose) {
                report_capture_error(&err);
                std::process::exit(1);
            }
        }
        Commands::Ask { question, ai: ai_args } => {
            let answer = ai::ask(&ai_args.into_config(), &question)
                .await
                .context("Failed to get an answer")?;
            println!("{answer}");
        }
        Commands::Summarize { input, ai: ai_args } => {
            let text = read_input(&input)?;
            let summary = ai::summarize(&ai_args.into_config(), &text)
                .await
                .context("Failed to summarize")?;
            println!("{summary}");
        }
        Commands::Translate { input, to, ai: ai_args } => {
            let text = read_input(&input)?;
            let translation = ai::translate(&ai_args.into_config(), &text, to.as_deref())
                .await
                .context("Failed to translate")?;
            println!("{translation}");
        }
    }

    Ok(())
}
