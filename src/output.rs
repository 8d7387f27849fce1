//! Output helpers for consistent CLI output.
//!
//! Standardized status messages with colored prefixes, written for CI logs
//! (no spinners or cursor tricks):
//!
//! ```rust,ignore
//! use kubebump::output::Output;
//!
//! Output::kv("Image", "app:1.2.3");
//! Output::step("manifest: `deploy/app.yaml`");
//! Output::success("manifest file(s) updated and pushed");
//! ```

use owo_colors::OwoColorize;

/// Standard output helper for consistent CLI formatting.
pub struct Output;

impl Output {
    /// Print a success message with a green checkmark.
    pub fn success(msg: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), msg.as_ref());
    }

    /// Print an error message with a red X to stderr.
    pub fn error(msg: impl AsRef<str>) {
        eprintln!("{} {}", "✗".red().bold(), msg.as_ref().red());
    }

    /// Print a warning message with a yellow warning symbol.
    pub fn warning(msg: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow(), msg.as_ref());
    }

    /// Print an info/status message with a cyan arrow.
    pub fn info(msg: impl AsRef<str>) {
        println!("{} {}", "→".cyan(), msg.as_ref().dimmed());
    }

    /// Print a step message (one per manifest file).
    pub fn step(msg: impl AsRef<str>) {
        println!("  {} {}", "•".cyan(), msg.as_ref());
    }

    /// Print a key-value pair with alignment.
    pub fn kv(key: impl AsRef<str>, value: impl AsRef<str>) {
        println!(
            "  {:<14} {}",
            format!("{}:", key.as_ref()).cyan(),
            value.as_ref()
        );
    }

    /// Print a dry-run message.
    pub fn dry_run(msg: impl AsRef<str>) {
        println!("{} {}", "[dry-run]".dimmed(), msg.as_ref().dimmed());
    }

    /// Print the running command (for transparency).
    pub fn running(cmd: impl AsRef<str>) {
        println!("{} {}", "Running:".dimmed(), cmd.as_ref().dimmed());
    }
}
