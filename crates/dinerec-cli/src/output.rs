//! Output formatting utilities

use std::io::{self, Write};

use colored::Colorize;
use dinerec::render::ResultCard;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[PASS]".green().bold(), msg);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print an info message
pub(crate) fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

/// Format bytes as human-readable size
pub(crate) fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Write the heading above a result list
pub(crate) fn write_heading<W: Write>(w: &mut W, heading: &str) -> io::Result<()> {
    writeln!(w, "\n{}", heading.magenta().bold())
}

/// Write a warning line
pub(crate) fn write_warning<W: Write>(w: &mut W, msg: &str) -> io::Result<()> {
    writeln!(w, "{} {}", "[WARN]".yellow().bold(), msg)
}

/// Write one result card
pub(crate) fn write_card<W: Write>(w: &mut W, card: &ResultCard) -> io::Result<()> {
    writeln!(w, "\n{}. {}", card.rank, card.name.red().bold())?;
    for (label, value) in card.fields() {
        writeln!(w, "   {}: {}", label.white().bold(), value)?;
    }
    writeln!(w, "   {}", "---".dimmed())
}
