//! Console output. Progress is blue and indented, errors bright red.

const BLUE: &str = "\x1b[34m";
const BRIGHT_RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Format an informational line.
pub fn info_line(message: &str) -> String {
    format!("  {}{}{}", BLUE, message, RESET)
}

/// Format an error line.
pub fn error_line(message: &str) -> String {
    format!("{}{}{}", BRIGHT_RED, message, RESET)
}

pub fn info(message: &str) {
    println!("{}", info_line(message));
}

pub fn error(message: &str) {
    eprintln!("{}", error_line(message));
}

/// Uncolored progress line.
pub fn plain(message: &str) {
    println!("{}", message);
}
