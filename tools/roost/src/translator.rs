//! Natural-language titles for recorded action lines.
//!
//! Rules are mutually exclusive and ordered by [`ActionMarker::ORDERED`]; only
//! the first occurrence of each pattern on a line is considered. Translation is
//! total: a line no rule recognizes comes back as its cleaned text.

use crate::classifier::ActionMarker;
use regex::Regex;
use std::sync::OnceLock;

const QUOTED: &str = r#"['"]([^'"]+)['"]"#;

fn compiled(cell: &'static OnceLock<Option<Regex>>, call: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(&format!(r"{call}\({QUOTED}")).ok())
        .as_ref()
}

fn goto_url() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&CELL, r"\.goto")
}

fn role() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&CELL, "getByRole")
}

fn role_with_name() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(&format!(
            r"getByRole\({QUOTED},\s*\{{[^}}]*name:\s*{QUOTED}"
        ))
        .ok()
    })
    .as_ref()
}

fn test_id() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&CELL, "getByTestId")
}

fn text() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&CELL, "getByText")
}

fn fill_value() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&CELL, r"\.fill")
}

fn press_key() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&CELL, r"\.press")
}

fn select_option() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&CELL, r"\.selectOption")
}

fn capture<'a>(pattern: Option<&Regex>, line: &'a str, group: usize) -> Option<&'a str> {
    pattern?
        .captures(line)?
        .get(group)
        .map(|m| m.as_str())
}

fn dashes_to_spaces(value: &str) -> String {
    value.replace('-', " ")
}

/// Drops the first `await ` and one trailing `;`, then trims.
pub fn clean_line(line: &str) -> String {
    let without_await = line.replacen("await ", "", 1);
    let trimmed = without_await.trim_end();
    trimmed
        .strip_suffix(';')
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

pub fn translate(line: &str) -> String {
    let cleaned = clean_line(line);
    match ActionMarker::detect(&cleaned) {
        Some(marker) => translate_marker(marker, &cleaned),
        None => cleaned,
    }
}

fn translate_marker(marker: ActionMarker, line: &str) -> String {
    match marker {
        ActionMarker::Goto => match capture(goto_url(), line, 1) {
            Some(url) => format!("Go to {url}"),
            None => "Navigate to page".to_string(),
        },
        ActionMarker::Click => describe_click(line),
        ActionMarker::Fill => {
            let value = capture(fill_value(), line, 1);
            let field = capture(test_id(), line, 1);
            match (value, field) {
                (Some(value), Some(field)) => {
                    format!("Fill \"{value}\" in {}", dashes_to_spaces(field))
                }
                (Some(value), None) => format!("Fill \"{value}\""),
                _ => "Fill input field".to_string(),
            }
        }
        ActionMarker::Press => match capture(press_key(), line, 1) {
            Some(key) => format!("Press {key} key"),
            None => "Press key".to_string(),
        },
        ActionMarker::Check => "Check checkbox".to_string(),
        ActionMarker::Uncheck => "Uncheck checkbox".to_string(),
        ActionMarker::SelectOption => match capture(select_option(), line, 1) {
            Some(option) => format!("Select \"{option}\""),
            None => "Select option".to_string(),
        },
        ActionMarker::Hover => "Hover over element".to_string(),
    }
}

fn describe_click(line: &str) -> String {
    if let Some(name) = capture(role_with_name(), line, 2) {
        return format!("Click on \"{name}\"");
    }
    if let Some(role) = capture(role(), line, 1) {
        return format!("Click on {role}");
    }
    if let Some(id) = capture(test_id(), line, 1) {
        return format!("Click on {}", dashes_to_spaces(id));
    }
    if let Some(text) = capture(text(), line, 1) {
        return format!("Click on \"{text}\"");
    }
    "Click element".to_string()
}
