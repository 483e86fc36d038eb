//! Debounced calculation events
//!
//! A quote only reaches telemetry after it has stayed unchanged for the whole
//! debounce window. Every new schedule cancels the pending one, so a burst of
//! updates produces a single event.

use super::events::deliver;
use super::{CalculationEvent, TelemetrySink};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Cancelable one-shot timer delivering the latest event to a sink
pub struct Debouncer {
    sink: Arc<dyn TelemetrySink>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    /// Last event scheduled; repeated schedules of it keep the running timer
    last: Option<CalculationEvent>,
}

impl Debouncer {
    /// Create a debouncer delivering to `sink` after `delay` of quiet
    pub fn new(sink: Arc<dyn TelemetrySink>, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            pending: None,
            last: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `event`, replacing any pending one.
    ///
    /// Scheduling the event that is already pending, or that already fired,
    /// is a no-op: the quote has not changed, so the window keeps running.
    /// Outside a tokio runtime the event is dropped with a warning.
    pub fn schedule(&mut self, event: CalculationEvent) {
        if self.last.as_ref() == Some(&event) {
            return;
        }
        self.abort_pending();

        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(symbol = %event.symbol, "No tokio runtime, calculation event dropped");
            self.last = None;
            return;
        };

        let sink = self.sink.clone();
        let delay = self.delay;
        let pending_event = event.clone();
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            deliver(sink.as_ref(), pending_event).await;
        }));
        self.last = Some(event);
    }

    /// Cancel the pending event, if any
    pub fn cancel(&mut self) {
        if self.abort_pending() {
            tracing::trace!("Pending calculation event cancelled");
        }
        self.last = None;
    }

    /// True while an event is waiting for its window to elapse
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the pending event, if any, to be delivered
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "Calculation event task failed");
                }
            }
        }
    }

    fn abort_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
