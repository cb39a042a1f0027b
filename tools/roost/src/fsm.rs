use crate::types::{Intent, Mode};

/// Modes in which a picked element resumes recording rather than dropping to standby.
pub const RECORDING_FAMILY: [Mode; 5] = [
    Mode::Recording,
    Mode::AssertingText,
    Mode::AssertingVisibility,
    Mode::AssertingValue,
    Mode::AssertingSnapshot,
];

pub fn is_recording_family(mode: Mode) -> bool {
    RECORDING_FAMILY.contains(&mode)
}

/// Recording indicator shown on the record button.
pub fn is_recording(mode: Mode) -> bool {
    matches!(mode, Mode::Recording | Mode::RecordingInspecting)
}

/// Active indicator shown on the inspect button.
pub fn is_inspecting(mode: Mode) -> bool {
    matches!(mode, Mode::Inspecting | Mode::RecordingInspecting)
}

/// Outside a recording context: the toolbar disables the assertion buttons here.
pub fn is_idle(mode: Mode) -> bool {
    matches!(mode, Mode::None | Mode::Standby | Mode::Inspecting)
}

/// Total, pure transition function. Every `(Mode, Intent)` pair has exactly one
/// successor; `current` is always the mode observed before the intent arrived.
pub fn transition(current: Mode, intent: Intent) -> Mode {
    use Mode as M;

    match intent {
        Intent::ToggleRecord => {
            if is_idle(current) {
                M::Recording
            } else {
                M::Standby
            }
        }
        Intent::ToggleInspect => match current {
            M::None | M::Standby => M::Inspecting,
            M::Inspecting => M::Standby,
            M::Recording => M::RecordingInspecting,
            M::RecordingInspecting => M::Recording,
            M::AssertingText | M::AssertingVisibility | M::AssertingValue | M::AssertingSnapshot => {
                M::RecordingInspecting
            }
        },
        Intent::ToggleAssertText => toggle_assertion(current, M::AssertingText),
        Intent::ToggleAssertVisibility => toggle_assertion(current, M::AssertingVisibility),
        Intent::ToggleAssertValue => toggle_assertion(current, M::AssertingValue),
        Intent::ElementPicked { .. } => {
            if is_recording_family(current) {
                M::Recording
            } else {
                M::Standby
            }
        }
        Intent::EditLocator => match current {
            M::None | M::Inspecting => M::Standby,
            other => other,
        },
        Intent::ResumeFromError => M::Recording,
    }
}

fn toggle_assertion(current: Mode, assertion: Mode) -> Mode {
    if current == assertion {
        Mode::Recording
    } else {
        assertion
    }
}

/// Holder for the single current mode. The mode only changes through
/// [`ModeCell::apply`], which routes every write through [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeCell {
    mode: Mode,
}

/// Result of applying one intent to a [`ModeCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: Mode,
    pub to: Mode,
    pub intent: Intent,
}

impl ModeChange {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Editor edits only announce an actual change; every other accepted
    /// transition is announced even when it resolves to the same mode.
    pub fn should_announce(&self) -> bool {
        match self.intent {
            Intent::EditLocator => self.changed(),
            _ => true,
        }
    }
}

impl ModeCell {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn apply(&mut self, intent: Intent) -> ModeChange {
        let from = self.mode;
        let to = transition(from, intent);
        self.mode = to;
        ModeChange { from, to, intent }
    }
}
