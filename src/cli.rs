//! Shared terminal output helpers for the binaries.

use std::collections::BTreeSet;

use colored::Colorize;

use crate::inheritance::ModeOfInheritance;
use crate::perf::{self, RunStats};

pub fn banner(subtitle: &str) {
    eprintln!();
    eprintln!("{} {}", "Mendelian".bold().cyan(), subtitle.dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    let bar = "─".repeat(50);
    eprintln!("{} {}", title.bold().blue(), bar.dimmed());
}

pub fn kv(key: &str, value: &str) {
    eprintln!("  {:<20} {}", key.dimmed(), value);
}

pub fn success(msg: &str) {
    eprintln!("  {} {}", "✓".green().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg.yellow());
}

/// Comma-separated mode abbreviations, or `-` when there are none.
pub fn format_modes(modes: &BTreeSet<ModeOfInheritance>) -> String {
    if modes.is_empty() {
        return "-".to_string();
    }
    modes
        .iter()
        .map(|mode| mode.abbreviation())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn print_summary(stats: &RunStats) {
    eprintln!();
    eprintln!(
        "{}  {}\n{}  {}\n{}  {}",
        "Time".dimmed(),
        perf::format_elapsed(stats.elapsed).bold(),
        "Throughput".dimmed(),
        stats
            .variants_per_second()
            .map(perf::format_rate)
            .unwrap_or_else(|| "N/A".to_string())
            .bold(),
        "Peak memory".dimmed(),
        stats
            .peak_memory
            .map(perf::format_bytes)
            .unwrap_or_else(|| "N/A".to_string())
            .bold(),
    );
    eprintln!();
}
