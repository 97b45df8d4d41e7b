//! Command-line front end.
//!
//! Cleans captured crawler output (HTML plus the crawler's Markdown) into a
//! timestamped Markdown file, writes the diagnostic log beside it, and can
//! translate the result.
//!
//! Usage:
//!   mdclean convert --html page.html --markdown page.md --url https://example.com/post
//!   mdclean translate outputs/20250101_120000_Post.md --target-language Japanese

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use rs_mdclean::output::{log_file_name, validate_source_url, write_document};
use rs_mdclean::translate::{Provider, TranslationConfig, Translator};
use rs_mdclean::{convert_bytes, Options};

#[derive(Parser)]
#[command(name = "mdclean", version, about = "Clean scraped web-page Markdown down to the article")]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a captured page and save it as Markdown
    Convert {
        /// Raw HTML of the page
        #[arg(long)]
        html: PathBuf,
        /// The crawler's Markdown rendering of the page
        #[arg(long)]
        markdown: Option<PathBuf>,
        /// Source URL written into the document header
        #[arg(long)]
        url: Option<String>,
        /// Output directory
        #[arg(short, long, default_value = "outputs")]
        output: PathBuf,
        /// Directory for diagnostic and translation logs
        #[arg(long, default_value = "log")]
        log_dir: PathBuf,
        /// Translate the cleaned document afterwards
        #[arg(long)]
        translate: bool,
        /// Do not ask before translating
        #[arg(short, long)]
        yes: bool,
        #[command(flatten)]
        translation: TranslationArgs,
    },
    /// Translate an existing Markdown file
    Translate {
        /// Markdown file to translate
        file: PathBuf,
        /// Output file (default: <stem>_<language code>.md beside the input)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Directory for the translation log
        #[arg(long, default_value = "log")]
        log_dir: PathBuf,
        #[command(flatten)]
        translation: TranslationArgs,
    },
}

#[derive(Args)]
struct TranslationArgs {
    /// openai, gemini or ollama
    #[arg(long, default_value = "openai")]
    provider: Provider,
    /// Model name (default depends on the provider)
    #[arg(long)]
    model: Option<String>,
    /// API base URL (default depends on the provider)
    #[arg(long)]
    api_base: Option<String>,
    /// API key (default: OPENAI_API_KEY or GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long, default_value = "Chinese")]
    target_language: String,
}

impl TranslationArgs {
    fn config(&self) -> TranslationConfig {
        let mut config =
            TranslationConfig::new(self.provider).with_target_language(self.target_language.clone());
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(base) = &self.api_base {
            config = config.with_api_base(base.clone());
        }
        let key = self.api_key.clone().or_else(|| {
            self.provider
                .api_key_env()
                .and_then(|var| std::env::var(var).ok())
                .filter(|k| !k.is_empty())
        });
        if let Some(key) = key {
            config = config.with_api_key(key);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();

    match cli.command {
        Commands::Convert {
            html,
            markdown,
            url,
            output,
            log_dir,
            translate,
            yes,
            translation,
        } => {
            let saved = run_convert(&html, markdown.as_deref(), url.as_deref(), &output, &log_dir, cli.verbose)?;
            if translate && (yes || confirm(&translation.target_language)?) {
                run_translate(&saved, None, &log_dir, &translation).await?;
            }
            Ok(())
        }
        Commands::Translate {
            file,
            output,
            log_dir,
            translation,
        } => {
            run_translate(&file, output.as_deref(), &log_dir, &translation).await?;
            Ok(())
        }
    }
}

fn run_convert(
    html_path: &Path,
    markdown_path: Option<&Path>,
    url: Option<&str>,
    output_dir: &Path,
    log_dir: &Path,
    verbose: bool,
) -> Result<PathBuf> {
    let source = match url {
        Some(raw) => validate_source_url(raw)?.to_string(),
        None => html_path.display().to_string(),
    };

    let html = fs::read(html_path).with_context(|| format!("reading {}", html_path.display()))?;
    let markdown = match markdown_path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => String::new(),
    };

    let result = convert_bytes(&html, &markdown, &Options::default())?;
    let document = result.render_document(&source);

    let now = Local::now();
    let saved = write_document(output_dir, &result.title, &document, &now)?;
    let saved = saved.canonicalize().unwrap_or(saved);

    let log_path = log_dir.join(log_file_name("clean", &now));
    result
        .diagnostics
        .write_to(&log_path, Some(&saved))
        .with_context(|| format!("writing {}", log_path.display()))?;

    info!(strategy = %result.strategy, log = %log_path.display(), "cleaned page");
    println!("✓ Successfully converted to Markdown");
    println!("✓ Saved to: {}", saved.display());
    if verbose {
        println!("\nPage title: {}", result.title);
        println!("Content length: {} characters", document.chars().count());
    }
    Ok(saved)
}

async fn run_translate(
    input: &Path,
    output: Option<&Path>,
    log_dir: &Path,
    args: &TranslationArgs,
) -> Result<PathBuf> {
    if !input.is_file() {
        bail!("{} is not a file", input.display());
    }
    let mut translator = Translator::new(args.config())?;
    let result = translator.translate_file(input, output).await;

    let log_path = log_dir.join(log_file_name("translation", &Local::now()));
    translator
        .save_log(&log_path)
        .with_context(|| format!("writing {}", log_path.display()))?;

    let translated = result?;
    println!("✓ Translated to: {}", translated.display());
    Ok(translated)
}

/// Ask on stdin whether to translate.
fn confirm(language: &str) -> Result<bool> {
    print!("Translate the document to {language}? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
