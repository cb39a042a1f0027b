use crate::fsm::{is_idle, is_inspecting, is_recording};
use crate::protocol::RuntimeEvent;
use crate::types::Mode;
use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub key: KeyCode,
    pub label: &'static str,
    pub description: &'static str,
    pub action: HotkeyAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    TogglePause,
    StepOver,
}

pub const PLAYBACK_BINDINGS: [HotkeyBinding; 2] = [
    HotkeyBinding {
        key: KeyCode::F(8),
        label: "F8",
        description: "resume/pause",
        action: HotkeyAction::TogglePause,
    },
    HotkeyBinding {
        key: KeyCode::F(10),
        label: "F10",
        description: "step over",
        action: HotkeyAction::StepOver,
    },
];

pub fn action_for_key(key: KeyCode) -> Option<HotkeyAction> {
    PLAYBACK_BINDINGS
        .iter()
        .find(|binding| binding.key == key)
        .map(|binding| binding.action)
}

/// Runtime event a key press should send, if any. Stepping only makes sense
/// while paused.
pub fn event_for_key(key: KeyCode, paused: bool) -> Option<RuntimeEvent> {
    match action_for_key(key)? {
        HotkeyAction::TogglePause if paused => Some(RuntimeEvent::Resume),
        HotkeyAction::TogglePause => Some(RuntimeEvent::Pause),
        HotkeyAction::StepOver if paused => Some(RuntimeEvent::Step),
        HotkeyAction::StepOver => None,
    }
}

pub fn playback_controls_legend() -> String {
    let parts = PLAYBACK_BINDINGS
        .iter()
        .map(|binding| format!("{} {}", binding.label, binding.description))
        .collect::<Vec<_>>();
    format!("Keys: {}", parts.join("  "))
}

/// Enabled/active flags for every toolbar control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    pub recording: bool,
    pub inspecting: bool,
    pub assert_visibility_active: bool,
    pub assert_text_active: bool,
    pub assert_value_active: bool,
    pub assertions_enabled: bool,
    pub copy_enabled: bool,
    pub clear_enabled: bool,
    pub resume_enabled: bool,
    pub pause_enabled: bool,
    pub step_enabled: bool,
}

impl ToolbarState {
    pub fn for_panel(mode: Mode, paused: bool, has_source_text: bool) -> Self {
        Self {
            recording: is_recording(mode),
            inspecting: is_inspecting(mode),
            assert_visibility_active: mode == Mode::AssertingVisibility,
            assert_text_active: mode == Mode::AssertingText,
            assert_value_active: mode == Mode::AssertingValue,
            assertions_enabled: !is_idle(mode),
            copy_enabled: has_source_text,
            clear_enabled: has_source_text,
            resume_enabled: paused,
            pause_enabled: !paused,
            step_enabled: paused,
        }
    }

    /// One-line summary such as `[REC] [inspect] ... resume pause`; disabled
    /// controls are omitted and active ones are upper-cased.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            tag("rec", self.recording),
            tag("inspect", self.inspecting),
        ];
        if self.assertions_enabled {
            parts.push(tag("visibility", self.assert_visibility_active));
            parts.push(tag("text", self.assert_text_active));
            parts.push(tag("value", self.assert_value_active));
        }
        for (label, enabled) in [
            ("copy", self.copy_enabled),
            ("resume", self.resume_enabled),
            ("pause", self.pause_enabled),
            ("step", self.step_enabled),
            ("clear", self.clear_enabled),
        ] {
            if enabled {
                parts.push(label.to_string());
            }
        }
        parts.join(" ")
    }
}

fn tag(label: &str, active: bool) -> String {
    if active {
        format!("[{}]", label.to_ascii_uppercase())
    } else {
        format!("[{label}]")
    }
}
