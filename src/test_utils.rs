//! Shared test utilities for Keep Me Awake unit tests.
//!
//! Provides a fake [`ApplicationHost`] which records what the application
//! logic asks of it, and a helper to count error-level log events. Only
//! compiled during testing (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

use crate::app::ApplicationHost;

/// Something the fake host was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A hold was placed.
    Held,
    /// A hold was released.
    Released,
    /// The window with the given id was presented.
    Presented(u32),
    /// The window with the given id got the development marker.
    MarkedDevelopment(u32),
    /// The application was asked to quit.
    Shutdown,
    /// The about dialog was shown.
    AboutShown,
}

type EventLog = Rc<RefCell<Vec<HostEvent>>>;

/// Hold guard of [`FakeHost`], records its release on drop.
#[derive(Debug)]
pub struct FakeHold(EventLog);

impl Drop for FakeHold {
    fn drop(&mut self) {
        self.0.borrow_mut().push(HostEvent::Released);
    }
}

/// A host whose windows are plain ids.
#[derive(Debug, Default)]
pub struct FakeHost {
    window: RefCell<Option<u32>>,
    events: EventLog,
}

impl FakeHost {
    /// A host which already has an active window.
    pub fn with_window(window: u32) -> Self {
        let host = Self::default();
        host.set_window(Some(window));
        host
    }

    /// Change the active window.
    pub fn set_window(&self, window: Option<u32>) {
        self.window.replace(window);
    }

    /// All recorded events, in order.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    /// How often `event` was recorded.
    pub fn count(&self, event: HostEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    fn record(&self, event: HostEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl ApplicationHost for FakeHost {
    type Window = u32;
    type Hold = FakeHold;

    fn active_main_window(&self) -> Option<u32> {
        *self.window.borrow()
    }

    fn keep_alive(&self) -> FakeHold {
        self.record(HostEvent::Held);
        FakeHold(self.events.clone())
    }

    fn present_window(&self, window: &u32) {
        self.record(HostEvent::Presented(*window));
    }

    fn mark_development_build(&self, window: &u32) {
        self.record(HostEvent::MarkedDevelopment(*window));
    }

    fn shutdown(&self) {
        self.record(HostEvent::Shutdown);
    }

    fn show_about(&self) {
        self.record(HostEvent::AboutShown);
    }
}

struct ErrorCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

struct EventRecorder(Arc<Mutex<Vec<(tracing::Level, String)>>>);

impl<S: tracing::Subscriber> Layer<S> for EventRecorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if let Ok(mut events) = self.0.lock() {
            events.push((*metadata.level(), metadata.target().to_string()));
        }
    }
}

/// Run `f` and record level and target of every event it logs on this thread.
pub fn record_events(f: impl FnOnce()) -> Vec<(tracing::Level, String)> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventRecorder(events.clone()));
    tracing::subscriber::with_default(subscriber, f);
    events.lock().map(|events| events.clone()).unwrap_or_default()
}

/// Run `f` and count the error-level events it logs on this thread.
pub fn count_error_events<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    let errors = count.load(Ordering::SeqCst);
    (result, errors)
}

#[test]
fn test_fake_hold_records_release() {
    let host = FakeHost::default();
    let hold = host.keep_alive();
    assert_eq!(host.events(), vec![HostEvent::Held]);
    drop(hold);
    assert_eq!(host.events(), vec![HostEvent::Held, HostEvent::Released]);
}

#[test]
fn test_count_error_events_ignores_other_levels() {
    let ((), errors) = count_error_events(|| {
        tracing::info!("not counted");
        tracing::warn!("not counted either");
        tracing::error!("counted");
    });
    assert_eq!(errors, 1);
}
