//! Terminal output helpers, coloured with `colored`.

use colored::Colorize;

/// Print an error message to stderr
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}
