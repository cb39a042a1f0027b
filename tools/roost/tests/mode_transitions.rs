use roost::fsm::{is_recording_family, transition, ModeCell, RECORDING_FAMILY};
use roost::types::{Intent, Mode};

fn all_intents() -> Vec<Intent> {
    vec![
        Intent::ToggleRecord,
        Intent::ToggleInspect,
        Intent::ToggleAssertText,
        Intent::ToggleAssertVisibility,
        Intent::ToggleAssertValue,
        Intent::ElementPicked { user_gesture: true },
        Intent::ElementPicked {
            user_gesture: false,
        },
        Intent::EditLocator,
        Intent::ResumeFromError,
    ]
}

#[test]
fn every_mode_intent_pair_is_deterministic() {
    for mode in Mode::ALL {
        for intent in all_intents() {
            let first = transition(mode, intent);
            let second = transition(mode, intent);
            assert_eq!(first, second, "{mode} + {}", intent.as_str());
        }
    }
}

#[test]
fn record_toggle_round_trips_between_standby_and_recording() {
    assert_eq!(transition(Mode::Recording, Intent::ToggleRecord), Mode::Standby);
    assert_eq!(transition(Mode::Standby, Intent::ToggleRecord), Mode::Recording);
    for mode in [
        Mode::RecordingInspecting,
        Mode::AssertingText,
        Mode::AssertingVisibility,
        Mode::AssertingValue,
        Mode::AssertingSnapshot,
    ] {
        assert_eq!(transition(mode, Intent::ToggleRecord), Mode::Standby);
    }
}

#[test]
fn assertion_toggles_from_every_assertion_mode() {
    let toggles = [
        (Intent::ToggleAssertText, Mode::AssertingText),
        (Intent::ToggleAssertVisibility, Mode::AssertingVisibility),
        (Intent::ToggleAssertValue, Mode::AssertingValue),
    ];
    for (intent, target) in toggles {
        assert_eq!(transition(target, intent), Mode::Recording);
        assert_eq!(transition(Mode::Recording, intent), target);
        assert_eq!(transition(Mode::RecordingInspecting, intent), target);
        assert_eq!(transition(Mode::AssertingSnapshot, intent), target);
        for (_, other) in toggles.iter().filter(|(_, other)| *other != target) {
            assert_eq!(transition(*other, intent), target);
        }
    }
}

#[test]
fn element_pick_depends_only_on_pre_pick_mode() {
    for mode in Mode::ALL {
        for user_gesture in [true, false] {
            let next = transition(mode, Intent::ElementPicked { user_gesture });
            if RECORDING_FAMILY.contains(&mode) {
                assert_eq!(next, Mode::Recording, "{mode}");
            } else {
                assert_eq!(next, Mode::Standby, "{mode}");
            }
        }
    }
    assert_eq!(
        transition(Mode::AssertingText, Intent::ElementPicked { user_gesture: true }),
        Mode::Recording
    );
    assert_eq!(
        transition(Mode::None, Intent::ElementPicked { user_gesture: true }),
        Mode::Standby
    );
    assert!(!is_recording_family(Mode::RecordingInspecting));
}

#[test]
fn editor_change_only_leaves_idle_inspection() {
    assert_eq!(transition(Mode::None, Intent::EditLocator), Mode::Standby);
    assert_eq!(transition(Mode::Inspecting, Intent::EditLocator), Mode::Standby);
    for mode in [Mode::Standby, Mode::Recording, Mode::AssertingValue] {
        assert_eq!(transition(mode, Intent::EditLocator), mode);
    }
}

#[test]
fn resume_from_error_always_records() {
    for mode in Mode::ALL {
        assert_eq!(transition(mode, Intent::ResumeFromError), Mode::Recording);
    }
}

#[test]
fn intent_names_round_trip_and_unknown_names_fail() {
    for name in Intent::NAMES {
        let intent = Intent::parse(name).expect("known intent");
        assert_eq!(intent.as_str(), name);
    }
    assert!(Intent::parse("toggleTheme").is_err());
    assert!(Mode::parse("paused").is_err());
    assert_eq!(Mode::parse("recording-inspecting").expect("mode"), Mode::RecordingInspecting);
}

#[test]
fn mode_cell_follows_a_recording_session() {
    let mut cell = ModeCell::default();
    let steps = [
        (Intent::ToggleRecord, Mode::Recording),
        (Intent::ToggleAssertText, Mode::AssertingText),
        (Intent::ElementPicked { user_gesture: true }, Mode::Recording),
        (Intent::ToggleInspect, Mode::RecordingInspecting),
        (Intent::ToggleInspect, Mode::Recording),
        (Intent::ToggleRecord, Mode::Standby),
    ];
    for (intent, expected) in steps {
        let change = cell.apply(intent);
        assert_eq!(change.to, expected);
        assert_eq!(cell.mode(), expected);
    }
}
