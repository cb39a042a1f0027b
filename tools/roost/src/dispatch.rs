//! Outbound seam to the recorder runtime.

use crate::errors::RoostError;
use crate::logging::append_run_log;
use crate::protocol::RuntimeEvent;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, oneshot};

const CHANNEL_CAPACITY: usize = 64;

pub trait EventSink: Send + Sync {
    fn dispatch(&self, event: RuntimeEvent) -> Result<(), RoostError>;

    /// Failures the runtime reported since the last call.
    fn settle(&self) -> Vec<RoostError> {
        Vec::new()
    }
}

pub type RuntimeReply = Result<(), String>;

#[derive(Debug)]
pub struct DispatchRequest {
    pub event: RuntimeEvent,
    pub reply: oneshot::Sender<RuntimeReply>,
}

impl DispatchRequest {
    pub fn respond(self, reply: RuntimeReply) {
        let _ = self.reply.send(reply);
    }
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<DispatchRequest>,
    pending: Mutex<Vec<(&'static str, oneshot::Receiver<RuntimeReply>)>>,
}

pub struct RuntimeEndpoint {
    rx: mpsc::Receiver<DispatchRequest>,
}

impl RuntimeEndpoint {
    pub fn next_blocking(&mut self) -> Option<DispatchRequest> {
        self.rx.blocking_recv()
    }

    pub fn try_next(&mut self) -> Option<DispatchRequest> {
        self.rx.try_recv().ok()
    }
}

pub fn channel_sink() -> (ChannelEventSink, RuntimeEndpoint) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    (
        ChannelEventSink {
            tx,
            pending: Mutex::new(Vec::new()),
        },
        RuntimeEndpoint { rx },
    )
}

impl EventSink for ChannelEventSink {
    fn dispatch(&self, event: RuntimeEvent) -> Result<(), RoostError> {
        let name = event.name();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .try_send(DispatchRequest {
                event,
                reply: reply_tx,
            })
            .map_err(|e| RoostError::RuntimeDispatch(format!("{name}: {e}")))?;
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name, reply_rx));
        Ok(())
    }

    fn settle(&self) -> Vec<RoostError> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let mut failures = Vec::new();
        pending.retain_mut(|(name, rx)| match rx.try_recv() {
            Ok(Ok(())) => false,
            Ok(Err(message)) => {
                failures.push(RoostError::RuntimeDispatch(format!("{name}: {message}")));
                false
            }
            Err(oneshot::error::TryRecvError::Empty) => true,
            Err(oneshot::error::TryRecvError::Closed) => {
                failures.push(RoostError::RuntimeDispatch(format!(
                    "{name}: runtime dropped the request"
                )));
                false
            }
        });
        failures
    }
}

/// No runtime attached: events go to the run log.
pub struct RunLogEventSink;

impl EventSink for RunLogEventSink {
    fn dispatch(&self, event: RuntimeEvent) -> Result<(), RoostError> {
        let payload = event.to_json()?;
        append_run_log("info", "dispatch.event.detached", payload);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct FakeEventSink {
    events: Arc<Mutex<Vec<RuntimeEvent>>>,
    failures_queued: Arc<Mutex<usize>>,
}

impl FakeEventSink {
    pub fn fail_next(&self, count: usize) {
        *self.failures_queued.lock().expect("failure lock") += count;
    }

    pub fn events(&self) -> Vec<RuntimeEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl EventSink for FakeEventSink {
    fn dispatch(&self, event: RuntimeEvent) -> Result<(), RoostError> {
        let mut queued = self.failures_queued.lock().expect("failure lock");
        if *queued > 0 {
            *queued -= 1;
            return Err(RoostError::RuntimeDispatch(format!(
                "{}: rejected",
                event.name()
            )));
        }
        self.events.lock().expect("events lock").push(event);
        Ok(())
    }
}
