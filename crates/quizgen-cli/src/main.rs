use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

mod output;

use output::ColorMode;
use quizgen_core::{
    Config, GeminiBackend, QuestionGenerator, ResultWriter, derived_stem, split_blocks,
};

/// Generate multiple-choice questions from a document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the document (pdf, txt, docx, html, xlsx, csv)
    file_path: PathBuf,

    /// Number of questions to generate
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Directory to write the artifacts into (default: configured results dir)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Gemini model to use
    #[arg(long)]
    model: Option<String>,

    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Dry run: extract and print the text without generating
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let use_color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let color = ColorMode(use_color);
    let mut writer: Box<dyn Write> = Box::new(std::io::stdout());

    if !cli.file_path.exists() {
        anyhow::bail!("File not found: {}", cli.file_path.display());
    }

    // CLI flags win over env vars and config files.
    let mut config = Config::load();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }

    let file_name = cli
        .file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.file_path.display().to_string());
    let extension = cli
        .file_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension.is_empty() || !config.extension_allowed(&extension) {
        anyhow::bail!(
            "Unsupported file format: {} (allowed: {})",
            file_name,
            config.allowed_extensions.join(", ")
        );
    }

    let text = quizgen_extract::extract(&cli.file_path, &extension)
        .with_context(|| format!("Failed to extract text from {}", file_name))?;
    if text.is_empty() {
        anyhow::bail!("No text could be extracted from {}", file_name);
    }

    output::print_extraction_summary(&mut writer, &file_name, text.len(), color)?;

    if cli.dry_run {
        return output::print_dry_run(&mut writer, &file_name, &text, color).map_err(Into::into);
    }

    if config.api_key.is_none() {
        anyhow::bail!("No API key configured. Set GEMINI_API_KEY or pass --api-key.");
    }

    let backend = Arc::new(GeminiBackend::from_config(&config));
    let generator = QuestionGenerator::new(backend, config.timeout);

    let mcqs = generator
        .generate(&text, cli.count)
        .await
        .context("Question generation failed")?;

    let out_dir = cli.out.unwrap_or_else(|| config.results_dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let stem = derived_stem(&file_name);
    let result_writer = ResultWriter::new(out_dir);
    let txt_path = result_writer.write_text(&mcqs, &format!("{}.txt", stem))?;
    let pdf_path = result_writer.write_pdf(&mcqs, &format!("{}.pdf", stem))?;

    let blocks = split_blocks(&mcqs).len();
    output::print_generation_summary(&mut writer, cli.count, blocks, &txt_path, &pdf_path, color)?;

    Ok(())
}
