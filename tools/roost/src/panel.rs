//! Event-dispatch layer: owns the only [`ModeCell`] and announces every
//! resolved mode through the injected [`EventSink`].

use crate::call_log::{CallLog, CallLogBook};
use crate::config::AppConfig;
use crate::dispatch::EventSink;
use crate::fsm::{ModeCell, ModeChange};
use crate::hotkeys::{event_for_key, ToolbarState};
use crate::logging::append_run_log;
use crate::protocol::{PickedElement, RuntimeEvent};
use crate::sources::{select_source, Source};
use crate::steps::{Step, StepSnapshot, StepView};
use crate::types::{Intent, Mode, PanelView, StepOrigin};
use crossterm::event::KeyCode;
use serde_json::json;
use std::borrow::Cow;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocatorEditor {
    pub selector: String,
    pub aria_snapshot: Option<String>,
    pub focus_on_change: Option<bool>,
}

pub struct RecorderPanel {
    sink: Arc<dyn EventSink>,
    mode: ModeCell,
    paused: bool,
    sources: Vec<Source>,
    selected_file: Option<String>,
    running_file: Option<String>,
    call_log: CallLogBook,
    locator: LocatorEditor,
    recording_name: String,
    view: PanelView,
    step_origin: StepOrigin,
    banner_visible: bool,
    banner_error: Option<CallLog>,
    snapshot: StepSnapshot,
}

impl RecorderPanel {
    pub fn new(sink: Arc<dyn EventSink>, cfg: &AppConfig) -> Self {
        Self {
            sink,
            mode: ModeCell::default(),
            paused: false,
            sources: Vec::new(),
            selected_file: None,
            running_file: None,
            call_log: CallLogBook::default(),
            locator: LocatorEditor {
                focus_on_change: Some(true),
                ..LocatorEditor::default()
            },
            recording_name: cfg.panel.recording_name.clone(),
            view: cfg.panel.view,
            step_origin: cfg.steps.origin,
            banner_visible: false,
            banner_error: None,
            snapshot: StepSnapshot::capture(""),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn locator(&self) -> &LocatorEditor {
        &self.locator
    }

    pub fn recording_name(&self) -> &str {
        &self.recording_name
    }

    pub fn set_recording_name(&mut self, name: impl Into<String>) {
        self.recording_name = name.into();
    }

    pub fn view(&self) -> PanelView {
        self.view
    }

    pub fn toggle_view(&mut self) -> PanelView {
        self.view = self.view.toggled();
        self.view
    }

    pub fn toolbar(&self) -> ToolbarState {
        ToolbarState::for_panel(
            self.mode(),
            self.paused,
            !self.current_source().text.is_empty(),
        )
    }

    pub fn apply(&mut self, intent: Intent) -> ModeChange {
        let change = self.mode.apply(intent);
        if change.should_announce() {
            append_run_log(
                "info",
                "panel.mode.announced",
                json!({
                    "intent": intent.as_str(),
                    "from": change.from.as_str(),
                    "to": change.to.as_str(),
                }),
            );
            self.announce(RuntimeEvent::SetMode { mode: change.to });
        }
        change
    }

    pub fn record(&mut self) -> Mode {
        self.apply(Intent::ToggleRecord).to
    }

    pub fn inspect(&mut self) -> Mode {
        self.apply(Intent::ToggleInspect).to
    }

    pub fn assert_text(&mut self) -> Mode {
        self.apply(Intent::ToggleAssertText).to
    }

    pub fn assert_visibility(&mut self) -> Mode {
        self.apply(Intent::ToggleAssertVisibility).to
    }

    pub fn assert_value(&mut self) -> Mode {
        self.apply(Intent::ToggleAssertValue).to
    }

    pub fn element_picked(&mut self, picked: PickedElement) -> Mode {
        append_run_log(
            "debug",
            "panel.element.picked",
            json!({
                "selector": picked.selector,
                "user_gesture": picked.user_gesture,
                "mode": self.mode().as_str(),
            }),
        );
        self.locator = LocatorEditor {
            selector: picked.selector,
            aria_snapshot: picked.aria_snapshot,
            focus_on_change: Some(picked.user_gesture),
        };
        self.apply(Intent::ElementPicked {
            user_gesture: picked.user_gesture,
        })
        .to
    }

    pub fn locator_edited(&mut self, selector: &str) -> Mode {
        let change = self.apply(Intent::EditLocator);
        self.locator.selector = selector.to_string();
        self.announce(RuntimeEvent::HighlightRequested {
            selector: selector.to_string(),
        });
        change.to
    }

    pub fn key_pressed(&mut self, key: KeyCode) -> Option<RuntimeEvent> {
        let event = event_for_key(key, self.paused)?;
        self.announce(event.clone());
        Some(event)
    }

    pub fn resume(&mut self) {
        self.announce(RuntimeEvent::Resume);
    }

    pub fn pause(&mut self) {
        self.announce(RuntimeEvent::Pause);
    }

    pub fn step(&mut self) {
        self.announce(RuntimeEvent::Step);
    }

    pub fn clear(&mut self) {
        self.call_log.clear();
        self.sync_banner();
        self.announce(RuntimeEvent::Clear);
    }

    pub fn select_file(&mut self, file: &str) {
        self.selected_file = Some(file.to_string());
        self.refresh_steps();
        self.announce(RuntimeEvent::FileChanged {
            file: file.to_string(),
        });
    }

    pub fn set_running_file(&mut self, file: Option<String>) {
        self.running_file = file;
        self.refresh_steps();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn update_sources(&mut self, sources: Vec<Source>) {
        self.sources = sources;
        self.refresh_steps();
    }

    pub fn update_call_log(&mut self, record: CallLog) {
        self.call_log.upsert(record);
        self.sync_banner();
    }

    pub fn replace_call_log(&mut self, book: CallLogBook) {
        self.call_log = book;
        self.sync_banner();
    }

    pub fn error_banner(&self) -> Option<String> {
        if !self.banner_visible {
            return None;
        }
        self.call_log.error_message()
    }

    pub fn dismiss_error(&mut self) {
        self.banner_visible = false;
    }

    pub fn resume_from_error(&mut self) -> Mode {
        self.banner_visible = false;
        self.apply(Intent::ResumeFromError).to
    }

    pub fn current_source(&self) -> Cow<'_, Source> {
        select_source(
            &self.sources,
            self.selected_file.as_deref(),
            self.running_file.as_deref(),
        )
    }

    pub fn source_steps(&self) -> &[Step] {
        &self.snapshot.steps
    }

    pub fn step_fingerprint(&self) -> &str {
        &self.snapshot.fingerprint
    }

    /// Source-derived unless the config selects the call log.
    pub fn display_steps(&self) -> Vec<StepView> {
        match self.step_origin {
            StepOrigin::Source => self
                .snapshot
                .steps
                .iter()
                .cloned()
                .map(StepView::SourceLine)
                .collect(),
            StepOrigin::CallLog => self.call_log.steps(),
        }
    }

    pub fn settle_dispatches(&self) -> usize {
        let failures = self.sink.settle();
        for failure in &failures {
            log_dispatch_failure(failure);
        }
        failures.len()
    }

    /// A dismissed banner stays hidden until the first error record changes.
    fn sync_banner(&mut self) {
        let current = self.call_log.first_error().cloned();
        if current != self.banner_error {
            self.banner_visible = current.is_some();
            self.banner_error = current;
        }
    }

    fn refresh_steps(&mut self) {
        let snapshot = {
            let source = self.current_source();
            if self.snapshot.is_current_for(&source.text) {
                return;
            }
            let snapshot = StepSnapshot::capture(&source.text);
            append_run_log(
                "debug",
                "panel.steps.extracted",
                json!({
                    "source_id": source.id,
                    "text_len": source.text.len(),
                    "steps": snapshot.steps.len(),
                }),
            );
            snapshot
        };
        self.snapshot = snapshot;
    }

    fn announce(&self, event: RuntimeEvent) {
        let name = event.name();
        match self.sink.dispatch(event) {
            Ok(()) => append_run_log("debug", "panel.event.dispatched", json!({ "event": name })),
            Err(error) => log_dispatch_failure(&error),
        }
    }
}

fn log_dispatch_failure(error: &crate::errors::RoostError) {
    append_run_log(
        "warn",
        "panel.dispatch.failed",
        json!({ "error": error.to_string() }),
    );
}
