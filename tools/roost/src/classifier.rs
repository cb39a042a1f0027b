//! Decides which generated-source lines represent recordable browser actions.

/// Action-method markers in rule order. Earlier markers win when a line
/// contains several of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionMarker {
    Goto,
    Click,
    Fill,
    Press,
    Check,
    Uncheck,
    SelectOption,
    Hover,
}

impl ActionMarker {
    pub const ORDERED: [ActionMarker; 8] = [
        ActionMarker::Goto,
        ActionMarker::Click,
        ActionMarker::Fill,
        ActionMarker::Press,
        ActionMarker::Check,
        ActionMarker::Uncheck,
        ActionMarker::SelectOption,
        ActionMarker::Hover,
    ];

    pub fn needle(self) -> &'static str {
        match self {
            Self::Goto => ".goto(",
            Self::Click => ".click(",
            Self::Fill => ".fill(",
            Self::Press => ".press(",
            Self::Check => ".check(",
            Self::Uncheck => ".uncheck(",
            Self::SelectOption => ".selectOption(",
            Self::Hover => ".hover(",
        }
    }

    /// First marker in rule order that appears anywhere on the line.
    pub fn detect(line: &str) -> Option<Self> {
        Self::ORDERED
            .into_iter()
            .find(|marker| line.contains(marker.needle()))
    }
}

/// Why a line was accepted as an action line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    Method(ActionMarker),
    Awaited,
    PageReference,
}

/// Lines that never become steps regardless of their content.
pub fn is_noise(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.starts_with("import ")
        || trimmed.starts_with("test(")
        || trimmed.starts_with("//")
        || matches!(trimmed, "{" | "}" | "});")
}

/// Classifies an already-trimmed line. Method markers are checked before the
/// awaited-call and page-reference fallbacks.
pub fn classify(trimmed: &str) -> Option<LineClass> {
    if is_noise(trimmed) {
        return None;
    }
    if let Some(marker) = ActionMarker::detect(trimmed) {
        return Some(LineClass::Method(marker));
    }
    if trimmed.contains("await ") {
        return Some(LineClass::Awaited);
    }
    if trimmed.contains("page.") {
        return Some(LineClass::PageReference);
    }
    None
}
