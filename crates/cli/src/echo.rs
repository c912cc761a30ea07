use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Quire".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Convert HTML pages into rich-text document JSON\n".dimmed());
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

/// Print a labelled value under a step
pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_white());
}

/// Print the pages that were skipped and why
pub fn print_failures(failures: &[quire_core::PageFailure]) {
    if failures.is_empty() {
        return;
    }

    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Skipped Pages".bold().yellow());
    eprintln!("{}", "═".repeat(60).dimmed());
    for failure in failures {
        print_warning(&format!("{}: {}", failure.title, failure.reason));
    }
    eprintln!();
}

/// Print timing information
pub fn print_timing(label: &str, duration: std::time::Duration) {
    eprintln!(
        "  {} {:>8.2}ms",
        format!("{}:", label).dimmed(),
        duration.as_secs_f64() * 1000.0
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
