use crate::errors::RoostError;
use serde::{Deserialize, Serialize};

/// Recorder interaction state. Exactly one is active while the panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "standby")]
    Standby,
    #[serde(rename = "inspecting")]
    Inspecting,
    #[serde(rename = "recording")]
    Recording,
    #[serde(rename = "recording-inspecting")]
    RecordingInspecting,
    #[serde(rename = "assertingText")]
    AssertingText,
    #[serde(rename = "assertingVisibility")]
    AssertingVisibility,
    #[serde(rename = "assertingValue")]
    AssertingValue,
    #[serde(rename = "assertingSnapshot")]
    AssertingSnapshot,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::None,
        Mode::Standby,
        Mode::Inspecting,
        Mode::Recording,
        Mode::RecordingInspecting,
        Mode::AssertingText,
        Mode::AssertingVisibility,
        Mode::AssertingValue,
        Mode::AssertingSnapshot,
    ];

    pub fn parse(value: &str) -> Result<Self, RoostError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| RoostError::InvalidMode(value.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Standby => "standby",
            Self::Inspecting => "inspecting",
            Self::Recording => "recording",
            Self::RecordingInspecting => "recording-inspecting",
            Self::AssertingText => "assertingText",
            Self::AssertingVisibility => "assertingVisibility",
            Self::AssertingValue => "assertingValue",
            Self::AssertingSnapshot => "assertingSnapshot",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized request for a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    ToggleRecord,
    ToggleInspect,
    ToggleAssertText,
    ToggleAssertVisibility,
    ToggleAssertValue,
    /// The runtime reported a picked element. `user_gesture` is carried for the
    /// locator editor and does not influence the resolved mode.
    ElementPicked { user_gesture: bool },
    /// The locator editor was edited by hand.
    EditLocator,
    /// The error banner's resume button.
    ResumeFromError,
}

impl Intent {
    pub const NAMES: [&'static str; 8] = [
        "toggleRecord",
        "toggleInspect",
        "toggleAssertText",
        "toggleAssertVisibility",
        "toggleAssertValue",
        "elementPicked",
        "editLocator",
        "resumeFromError",
    ];

    /// Parses a wire/CLI intent name. `elementPicked` parses without a user gesture.
    pub fn parse(value: &str) -> Result<Self, RoostError> {
        match value {
            "toggleRecord" => Ok(Self::ToggleRecord),
            "toggleInspect" => Ok(Self::ToggleInspect),
            "toggleAssertText" => Ok(Self::ToggleAssertText),
            "toggleAssertVisibility" => Ok(Self::ToggleAssertVisibility),
            "toggleAssertValue" => Ok(Self::ToggleAssertValue),
            "elementPicked" => Ok(Self::ElementPicked {
                user_gesture: false,
            }),
            "editLocator" => Ok(Self::EditLocator),
            "resumeFromError" => Ok(Self::ResumeFromError),
            other => Err(RoostError::InvalidIntent(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToggleRecord => "toggleRecord",
            Self::ToggleInspect => "toggleInspect",
            Self::ToggleAssertText => "toggleAssertText",
            Self::ToggleAssertVisibility => "toggleAssertVisibility",
            Self::ToggleAssertValue => "toggleAssertValue",
            Self::ElementPicked { .. } => "elementPicked",
            Self::EditLocator => "editLocator",
            Self::ResumeFromError => "resumeFromError",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelView {
    #[default]
    Steps,
    Code,
}

impl PanelView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::Code => "code",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Steps => Self::Code,
            Self::Code => Self::Steps,
        }
    }
}

/// Which derivation feeds the rendered step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOrigin {
    #[default]
    Source,
    CallLog,
}
