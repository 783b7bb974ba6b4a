//! Scan command: the full detection pipeline over a file or directory.
//!
//! Configuration problems (no API key) abort before any file is processed.
//! Per-file parse failures are reported inline and the run continues; an
//! interrupted run exits non-zero after printing the partial summary.

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use colored::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use nullaudit_scanners::{
    AnalysisEngine, LLMConfig, OpenAIProvider, PathVerifier, ScanReport,
};

#[derive(Args)]
pub struct ScanArgs {
    /// File or directory to analyze
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    /// Write the rendered report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model override, e.g. gpt-4o-mini
    #[arg(long)]
    pub model: Option<String>,

    /// API key override; defaults to the OPENAI_API_KEY environment variable
    #[arg(long)]
    pub api_key: Option<String>,

    /// YAML configuration file for the verifier
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    Console,
    Json,
    Html,
    Markdown,
}

pub async fn execute(args: ScanArgs) -> Result<()> {
    let start = Instant::now();

    let config = build_config(&args)?;

    let provider = OpenAIProvider::from_config(&config)?;
    let verifier = PathVerifier::from_config(Arc::new(provider), &config);
    let engine = AnalysisEngine::new(verifier);

    if args.verbose {
        println!(
            "{}",
            "🔍 Scanning for null dereference candidates...".bright_blue()
        );
        println!("📁 Target: {}", args.target.display());
        println!("🤖 Model: {}", config.model);
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!(
                "{}",
                "\n⚠️  Cancellation requested; finishing the current file...".yellow()
            );
            cancel_flag.store(true, Ordering::SeqCst);
        }
    });

    let report = engine.analyze_path(&args.target, &cancel).await?;

    render(&report, &args)?;

    if args.verbose {
        println!("⏱️  Time: {:.2}s", start.elapsed().as_secs_f64());
    }

    if report.interrupted() {
        bail!("scan interrupted before all files were processed");
    }

    Ok(())
}

fn build_config(args: &ScanArgs) -> Result<LLMConfig> {
    let mut config = match &args.config {
        Some(path) => LLMConfig::from_yaml_file(path)?,
        None => LLMConfig::default(),
    };

    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(key) = &args.api_key {
        config.api_key = Some(key.clone());
    }
    if config.api_key.is_none() {
        config.api_key = std::env::var("OPENAI_API_KEY").ok();
    }

    config
        .resolved_api_key()
        .context("set OPENAI_API_KEY or pass --api-key before scanning")?;

    Ok(config)
}

fn render(report: &ScanReport, args: &ScanArgs) -> Result<()> {
    match args.format {
        OutputFormat::Console => {
            print_console(report);
            Ok(())
        }
        OutputFormat::Json => match &args.output {
            Some(path) => {
                report.write_json(path)?;
                println!("📊 JSON report written to {}", path.display());
                Ok(())
            }
            None => {
                println!("{}", report.to_json()?);
                Ok(())
            }
        },
        OutputFormat::Html => match &args.output {
            Some(path) => {
                report.write_html(path)?;
                println!("🌐 HTML report written to {}", path.display());
                Ok(())
            }
            None => {
                println!("{}", nullaudit_scanners::report::html::render(report));
                Ok(())
            }
        },
        OutputFormat::Markdown => {
            let rendered = report.to_markdown();
            match &args.output {
                Some(path) => {
                    std::fs::write(path, rendered)?;
                    println!("📄 Markdown report written to {}", path.display());
                }
                None => println!("{}", rendered),
            }
            Ok(())
        }
    }
}

fn print_console(report: &ScanReport) {
    println!("{}", "═".repeat(70).bright_blue());

    if report.is_empty() {
        println!(
            "{} {} file(s) scanned, no confirmed null dereference flows",
            "✅".green(),
            report.files_scanned()
        );
    } else {
        println!(
            "{} {} confirmed null dereference flow(s) in {} file(s)",
            "⚠️ ".yellow(),
            report.findings().len(),
            report.files_scanned()
        );
        println!("{}", "═".repeat(70).bright_blue());

        for (index, finding) in report.ranked().iter().enumerate() {
            println!(
                "{} #{:<2} [{:<8}] {:<24} | {:<12} | line {:>3} → {:>3}",
                finding.severity.emoji(),
                index + 1,
                finding.severity.to_string(),
                finding.function,
                finding.variable,
                finding.null_line,
                finding.use_line
            );
            if !finding.trigger_condition.is_empty() {
                println!("      trigger: {}", finding.trigger_condition.dimmed());
            }
        }

        let count = report.count_by_severity();
        println!("{}", "─".repeat(70).bright_blue());
        println!(
            "   {} critical · {} high · {} medium · {} low",
            count.critical.to_string().red().bold(),
            count.high.to_string().bright_red(),
            count.medium.to_string().yellow(),
            count.low.to_string().green()
        );
    }

    if !report.skipped().is_empty() {
        println!("{}", "─".repeat(70).bright_blue());
        for skip in report.skipped() {
            println!("{} skipped {}: {}", "⚠️ ".yellow(), skip.path, skip.reason);
        }
    }

    println!("{}", "═".repeat(70).bright_blue());
}
