//! Step derivation from generated source text. [`extract`] is lazy and
//! stateless; the same text always yields the same steps.

use crate::call_log::CallLog;
use crate::classifier::classify;
use crate::translator::translate;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub index: usize,
    pub text: &'a str,
}

impl SourceLine<'_> {
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub title: String,
    pub raw_line: String,
    pub line_index: usize,
}

impl Step {
    pub fn from_line(line: SourceLine<'_>) -> Option<Self> {
        let trimmed = line.trimmed();
        classify(trimmed)?;
        Some(Self {
            id: step_id(line.index),
            title: translate(trimmed),
            raw_line: trimmed.to_string(),
            line_index: line.index,
        })
    }
}

pub fn step_id(line_index: usize) -> String {
    format!("step-{line_index}")
}

#[derive(Debug, Clone)]
pub struct Steps<'a> {
    lines: std::iter::Enumerate<std::str::Split<'a, char>>,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        for (index, text) in self.lines.by_ref() {
            if let Some(step) = Step::from_line(SourceLine { index, text }) {
                return Some(step);
            }
        }
        None
    }
}

pub fn source_lines(source_text: &str) -> impl Iterator<Item = SourceLine<'_>> + Clone {
    source_text
        .split('\n')
        .enumerate()
        .map(|(index, text)| SourceLine { index, text })
}

pub fn extract(source_text: &str) -> Steps<'_> {
    Steps {
        lines: source_text.split('\n').enumerate(),
    }
}

pub fn source_fingerprint(source_text: &str) -> String {
    let digest = Sha256::digest(source_text.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepSnapshot {
    pub fingerprint: String,
    pub steps: Vec<Step>,
}

impl StepSnapshot {
    pub fn capture(source_text: &str) -> Self {
        Self {
            fingerprint: source_fingerprint(source_text),
            steps: extract(source_text).collect(),
        }
    }

    pub fn is_current_for(&self, source_text: &str) -> bool {
        self.fingerprint == source_fingerprint(source_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepView {
    CallLog(CallLog),
    SourceLine(Step),
}

impl StepView {
    pub fn title(&self) -> &str {
        match self {
            Self::CallLog(log) => {
                if log.title.is_empty() {
                    "No title"
                } else {
                    &log.title
                }
            }
            Self::SourceLine(step) => &step.title,
        }
    }

    /// Secondary line: the navigated URL, else the raw selector.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::CallLog(log) => log.params.url.as_deref().or(log.params.selector.as_deref()),
            Self::SourceLine(_) => None,
        }
    }

    pub fn messages(&self) -> &[String] {
        match self {
            Self::CallLog(log) => &log.messages,
            Self::SourceLine(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::CallLog(log) => log.error.as_deref(),
            Self::SourceLine(_) => None,
        }
    }
}
