use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use sitelex_core::{AuditConfig, AuditReport, JsonConfig, TextConfig, audit, convert_to_json, convert_to_text};
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text report name used when the JSON report goes to stdout
const TEXT_REPORT_NAME: &str = "content-audit.txt";

/// Audit a static site's content corpus: metadata, readability and TF-IDF keywords
#[derive(Parser, Debug)]
#[command(name = "sitelex")]
#[command(author = "Sitelex Contributors")]
#[command(version)]
#[command(about = "Audit the content corpus of a static site", long_about = None)]
struct Args {
    /// Site source directory to audit
    #[arg(value_name = "ROOT", default_value = "src")]
    root: PathBuf,

    /// JSON report path; the text report is written next to it with a .txt extension
    #[arg(short, long, default_value = "content-audit.json", value_name = "FILE")]
    output: PathBuf,

    /// Print the JSON report to stdout and write the text report to content-audit.txt
    #[arg(long)]
    stdout: bool,

    /// Site origin used to tell internal links from external ones
    #[arg(long, default_value = "https://example.com", value_name = "URL")]
    origin: Url,

    /// Minimum number of documents a term must appear in to be scored
    #[arg(long, default_value = "2", value_name = "NUM")]
    min_doc_freq: usize,

    /// Number of ranked terms per n-gram order
    #[arg(long, default_value = "40", value_name = "NUM")]
    top: usize,

    /// Worker threads for per-document analysis
    #[arg(long, default_value = "8", value_name = "NUM")]
    workers: usize,

    /// Minimum word count for a page to appear in the keyword samples
    #[arg(long, default_value = "150", value_name = "NUM")]
    min_words: usize,

    /// Generate shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn audit_config(&self) -> sitelex_core::Result<AuditConfig> {
        AuditConfig::builder()
            .origin(self.origin.as_str())
            .min_doc_freq(self.min_doc_freq)
            .top_terms(self.top)
            .workers(self.workers)
            .min_sample_words(self.min_words)
            .build()
    }

    fn text_report_path(&self) -> PathBuf {
        if self.stdout { PathBuf::from(TEXT_REPORT_NAME) } else { self.output.with_extension("txt") }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

/// Writes the text rendering; failures are logged and never abort the run.
fn write_text_report(report: &AuditReport, config: &TextConfig, path: &Path) -> bool {
    let written = convert_to_text(report, config)
        .map_err(anyhow::Error::from)
        .and_then(|text| fs::write(path, text).with_context(|| format!("Failed to write to file: {}", path.display())));

    match written {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "could not write text report");
            echo::print_warning(&format!("Text report not written: {e:#}"));
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "sitelex", &mut io::stdout());
        return Ok(());
    }

    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let config = args.audit_config().context("Invalid audit configuration")?;
    let started = Instant::now();

    if args.verbose {
        echo::print_step(1, 3, &format!("Auditing {}", args.root.display().bright_white()));
        if !args.root.is_dir() {
            echo::print_warning(&format!("{} is not a directory; the report will be empty", args.root.display()));
        }
    }

    let report = audit(&args.root, &config).context("Failed to audit content")?;

    if args.verbose {
        echo::print_step(2, 3, "Rendering reports");
    }

    let json = convert_to_json(&report, &JsonConfig::default()).context("Failed to render JSON report")?;
    let text_config = TextConfig::from(&config);
    let text_path = args.text_report_path();

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
    }

    if args.stdout {
        let mut stdout = io::stdout().lock();
        stdout.write_all(json.as_bytes()).context("Failed to write to stdout")?;
        stdout.write_all(b"\n").context("Failed to write to stdout")?;
        write_text_report(&report, &text_config, &text_path);
    } else {
        fs::write(&args.output, &json)
            .with_context(|| format!("Failed to write to file: {}", args.output.display()))?;
        echo::print_success(&format!("JSON report written to {}", args.output.display().bright_white()));
        if write_text_report(&report, &text_config, &text_path) {
            echo::print_success(&format!("Text report written to {}", text_path.display().bright_white()));
        }
    }

    if args.verbose {
        echo::print_summary(&report.summary, started.elapsed());
    }

    Ok(())
}
