use serde::{Deserialize, Serialize};
use std::path::Path;

pub const EMPTY_SOURCE_ID: &str = "default";

/// Generated script for one target language, as supplied by the code generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub language: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_recorded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_line: Option<usize>,
}

impl Source {
    pub fn empty() -> Self {
        Self {
            id: EMPTY_SOURCE_ID.to_string(),
            label: String::new(),
            language: "javascript".to_string(),
            text: String::new(),
            is_recorded: false,
            reveal_line: None,
        }
    }

    /// Wraps a script read from disk; the language follows the file extension.
    pub fn from_file(path: &Path, text: String) -> Self {
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| EMPTY_SOURCE_ID.to_string());
        Self {
            label: id.clone(),
            id,
            language: language_for_path(path).to_string(),
            text,
            is_recorded: true,
            reveal_line: None,
        }
    }
}

pub fn language_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("py") => "python",
        Some("java") => "java",
        Some("cs") => "csharp",
        Some("jsonl") => "jsonl",
        _ => "javascript",
    }
}

/// Selected file wins, then the file the runtime reports as running, then the
/// first source, then the empty source.
pub fn select_source<'a>(
    sources: &'a [Source],
    selected: Option<&str>,
    running: Option<&str>,
) -> std::borrow::Cow<'a, Source> {
    let wanted = selected
        .or(running)
        .or_else(|| sources.first().map(|source| source.id.as_str()));
    match wanted.and_then(|id| sources.iter().find(|source| source.id == id)) {
        Some(source) => std::borrow::Cow::Borrowed(source),
        None => std::borrow::Cow::Owned(Source::empty()),
    }
}
