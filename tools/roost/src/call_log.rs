use crate::errors::RoostError;
use crate::protocol::parse_jsonl;
use crate::steps::StepView;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred during playback";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallLogStatus {
    #[default]
    InProgress,
    Done,
    Error,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallLogParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

/// One record of the recorder runtime's authoritative event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLog {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: CallLogStatus,
    #[serde(default)]
    pub params: CallLogParams,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Call log keyed by call id, kept in arrival order. Re-reported ids replace
/// the earlier record in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallLogBook {
    entries: Vec<CallLog>,
}

impl CallLogBook {
    pub fn upsert(&mut self, record: CallLog) {
        match self.entries.iter_mut().find(|entry| entry.id == record.id) {
            Some(existing) => *existing = record,
            None => self.entries.push(record),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn records(&self) -> &[CallLog] {
        &self.entries
    }

    /// First record whose status is `error`; drives the error banner.
    pub fn first_error(&self) -> Option<&CallLog> {
        self.entries
            .iter()
            .find(|entry| entry.status == CallLogStatus::Error)
    }

    pub fn error_message(&self) -> Option<String> {
        self.first_error().map(|entry| {
            entry
                .error
                .clone()
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
        })
    }

    /// Call-log derived step list. The panel renders source-derived steps
    /// unless `steps.origin = "call_log"` is configured, so by default this
    /// derivation is computed for the error banner only and never displayed.
    pub fn steps(&self) -> Vec<StepView> {
        self.entries.iter().cloned().map(StepView::CallLog).collect()
    }

    pub fn from_jsonl(input: &str) -> Result<Self, RoostError> {
        let mut book = Self::default();
        for value in parse_jsonl(input)? {
            let record: CallLog = serde_json::from_value(value)
                .map_err(|e| RoostError::Protocol(format!("invalid call log record: {e}")))?;
            book.upsert(record);
        }
        Ok(book)
    }
}
