//! Console status output and interactive prompting.

use std::io::{self, BufRead, Write};

use tagwatch_core::StatusSink;

// ANSI color codes, applied around the symbol only.
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Status sink that prints one line per message with a log-symbol prefix.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    /// Creates a console sink; `color` disables ANSI codes when false.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn line(&self, color: &str, symbol: &str, message: &str) {
        if self.color {
            println!("{color}{symbol}{RESET} {message}");
        } else {
            println!("{symbol} {message}");
        }
    }
}

impl StatusSink for ConsoleSink {
    fn progress(&self, message: &str) {
        self.line(BLUE, "ℹ", message);
    }

    fn success(&self, message: &str) {
        self.line(GREEN, "✔", message);
    }

    fn failure(&self, message: &str) {
        self.line(RED, "✖", message);
    }

    fn warn(&self, message: &str) {
        self.line(YELLOW, "⚠", message);
    }
}

/// Prints the interactive-mode banner.
pub fn print_header() {
    println!("🎮 Xbox Live Gamertag Utility 🎮");
    println!("    (Press CTRL+C to Cancel)");
    println!();
}

/// Prompts on stdout and reads one trimmed line from stdin.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
