use console::style;
use std::fmt::Display;

/// Green bold — success checkmarks, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold — section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim — subtitles, secondary text
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow — warnings, degraded-mode notices
pub fn warn<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Red bold — alerts
pub fn alert<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Cyan — field labels, assistant replies
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}
