use owo_colors::OwoColorize;
use sitelex_core::CorpusSummary;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Sitelex".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Content corpus audit for static sites\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print corpus summary
pub fn print_summary(summary: &CorpusSummary, elapsed: std::time::Duration) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Corpus Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Documents:".dimmed(), summary.document_count.to_string().bright_white());
    eprintln!("  {} {}", "Vocabulary:".dimmed(), summary.vocabulary_size.to_string().bright_white());
    eprintln!("  {} {}", "Words:".dimmed(), summary.total_words.to_string().bright_white());
    eprintln!(
        "  {} {}",
        "Reading ease:".dimmed(),
        format!("{:.1}", summary.average_reading_ease).bright_white()
    );

    let flagged = [
        ("Missing titles:", summary.missing_titles.len()),
        ("Missing descriptions:", summary.missing_descriptions.len()),
        ("Missing H1:", summary.missing_h1.len()),
        ("Duplicate titles:", summary.duplicate_titles.len()),
    ];
    for (label, count) in flagged {
        if count > 0 {
            eprintln!("  {} {}", label.dimmed(), count.to_string().bright_yellow());
        } else {
            eprintln!("  {} {}", label.dimmed(), count.to_string().green());
        }
    }

    eprintln!("  {} {:.2}ms\n", "Elapsed:".bold().dimmed(), elapsed.as_secs_f64() * 1000.0);
}
