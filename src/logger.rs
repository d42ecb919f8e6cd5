//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for notices on standard output
//! - `warn!` macro for advisory messages on standard error
//! - `debug!` macro for details shown only with `--verbose`
//!
//! # Example
//!
//! ```ignore
//! log!("out"; "{} exported", path.display());
//! warn!("warn"; "unfound layers: {}", names);
//! debug!("set"; "{:?}", layer_set);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Apply the `--color` choice to every colored prefix.
pub fn set_color(choice: clap::ColorChoice) {
    match choice {
        clap::ColorChoice::Always => owo_colors::set_override(true),
        clap::ColorChoice::Never => owo_colors::set_override(false),
        clap::ColorChoice::Auto => owo_colors::unset_override(),
    }
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix to standard output
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix to standard error
#[macro_export]
macro_rules! warn {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::warn($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module, Stream::Stdout);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Same as [`log`], on standard error.
#[inline]
pub fn warn(module: &str, message: &str) {
    let prefix = colorize_prefix(module, Stream::Stderr);
    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {message}").ok();
}

/// Apply color to a module prefix based on module type
///
/// Colors only when `stream` supports them or `--color always` is set.
#[inline]
fn colorize_prefix(module: &str, stream: Stream) -> String {
    let style = match module.to_ascii_lowercase().as_str() {
        "out" => Style::new().bright_green(),
        "skip" => Style::new().bright_blue(),
        "error" => Style::new().bright_red(),
        _ => Style::new().bright_yellow(),
    }
    .bold();
    format!("[{module}]")
        .if_supports_color(stream, |p| p.style(style))
        .to_string()
}
