use crate::errors::RoostError;
use crate::types::Mode;
use serde::{Deserialize, Serialize};
use serde_json::{Deserializer, Value};

/// Named event sent to the recorder runtime, serialized as
/// `{"event": "...", "params": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "params", rename_all = "camelCase")]
pub enum RuntimeEvent {
    SetMode { mode: Mode },
    HighlightRequested { selector: String },
    Resume,
    Pause,
    Step,
    Clear,
    FileChanged { file: String },
}

impl RuntimeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetMode { .. } => "setMode",
            Self::HighlightRequested { .. } => "highlightRequested",
            Self::Resume => "resume",
            Self::Pause => "pause",
            Self::Step => "step",
            Self::Clear => "clear",
            Self::FileChanged { .. } => "fileChanged",
        }
    }

    pub fn to_json(&self) -> Result<Value, RoostError> {
        serde_json::to_value(self).map_err(|e| RoostError::Protocol(e.to_string()))
    }
}

/// Payload of the runtime's element-picked callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedElement {
    pub selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_snapshot: Option<String>,
    #[serde(default)]
    pub user_gesture: bool,
}

pub fn parse_jsonl(input: &str) -> Result<Vec<Value>, RoostError> {
    let mut out = Vec::new();
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        out.extend(parse_json_records(line)?);
    }
    Ok(out)
}

pub fn parse_json_records(input: &str) -> Result<Vec<Value>, RoostError> {
    Deserializer::from_str(input)
        .into_iter::<Value>()
        .collect::<serde_json::Result<Vec<_>>>()
        .map_err(|err| {
            RoostError::Protocol(format!(
                "invalid json stream: {err}; input={}",
                input.chars().take(256).collect::<String>(),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::{parse_json_records, parse_jsonl, PickedElement, RuntimeEvent};
    use crate::types::Mode;
    use serde_json::json;

    #[test]
    fn set_mode_uses_wire_names() {
        let value = RuntimeEvent::SetMode {
            mode: Mode::RecordingInspecting,
        }
        .to_json()
        .expect("json");
        assert_eq!(
            value,
            json!({"event": "setMode", "params": {"mode": "recording-inspecting"}})
        );
    }

    #[test]
    fn parameterless_events_carry_only_their_name() {
        let value = RuntimeEvent::Resume.to_json().expect("json");
        assert_eq!(value["event"], json!("resume"));
        let value = RuntimeEvent::FileChanged {
            file: "test.spec.ts".to_string(),
        }
        .to_json()
        .expect("json");
        assert_eq!(value["params"]["file"], json!("test.spec.ts"));
    }

    #[test]
    fn picked_element_defaults_optional_fields() {
        let picked: PickedElement =
            serde_json::from_value(json!({"selector": "internal:role=button"})).expect("decode");
        assert_eq!(picked.aria_snapshot, None);
        assert!(!picked.user_gesture);
    }

    #[test]
    fn jsonl_parser_rejects_malformed_lines() {
        let err = parse_jsonl("{\"id\":\"1\"}\n{").expect_err("invalid");
        assert!(format!("{err}").contains("invalid json stream"));
    }

    #[test]
    fn parse_json_records_accepts_concatenated_values() {
        let values = parse_json_records("{\"id\":\"1\"}{\"id\":\"2\"}").expect("parse");
        assert_eq!(values.len(), 2);
    }
}
