//! Main window activation
//!
//! The first activation places a hold on the application and constructs the
//! main window asynchronously; later activations present the existing
//! window. A failed construction is logged and quits the application.
//!
//! ```text
//! NoWindow --activate--> Constructing --ok--> Present
//!                                     --err--> Terminated
//! Present --activate--> Present
//! ```

use std::cell::Cell;
use std::future::Future;

use tracing::{debug, error};

use super::host::ApplicationHost;
use crate::error::Result;

/// Where the main window currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    /// No window was created yet.
    #[default]
    NoWindow,
    /// Window construction is in flight.
    Constructing,
    /// A window was created and presented.
    Present,
    /// Window construction failed and the application quit.
    Terminated,
}

/// What an activation decided to do.
#[derive(Debug)]
pub enum ActivationStep<H> {
    /// An existing window was presented.
    Presented,
    /// A new window must be constructed; the hold keeps the app alive meanwhile.
    Construct(H),
    /// Nothing to do, either construction is already running or it failed.
    Ignored,
}

/// Tracks the main window across activations.
#[derive(Debug, Default)]
pub struct MainWindowActivation {
    state: Cell<WindowState>,
}

impl MainWindowActivation {
    /// Create a tracker without a window.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> WindowState {
        self.state.get()
    }

    /// Handle an activation of `host`.
    ///
    /// Presents the active window if there is one. Otherwise places a hold
    /// and returns [`ActivationStep::Construct`]; pass the hold on to
    /// [`Self::construct`] or [`Self::finish`].
    pub fn begin<H: ApplicationHost>(&self, host: &H) -> ActivationStep<H::Hold> {
        if let Some(window) = host.active_main_window() {
            debug!("Presenting existing main window");
            host.present_window(&window);
            self.state.set(WindowState::Present);
            return ActivationStep::Presented;
        }

        match self.state.get() {
            WindowState::Constructing => {
                debug!("Main window is still being constructed, ignoring activation");
                ActivationStep::Ignored
            }
            WindowState::Terminated => {
                debug!("Main window construction failed before, ignoring activation");
                ActivationStep::Ignored
            }
            // A previous window may have been closed while the app stayed alive
            WindowState::NoWindow | WindowState::Present => {
                let hold = host.keep_alive();
                self.state.set(WindowState::Constructing);
                ActivationStep::Construct(hold)
            }
        }
    }

    /// Complete a construction started by [`Self::begin`].
    ///
    /// Presents the new window, or logs the error and quits. `hold` is
    /// released on both paths.
    pub fn finish<H: ApplicationHost>(
        &self,
        host: &H,
        hold: H::Hold,
        result: Result<H::Window>,
        development: bool,
    ) {
        match result {
            Ok(window) => {
                host.present_window(&window);
                if development {
                    host.mark_development_build(&window);
                }
                self.state.set(WindowState::Present);
                drop(hold);
            }
            Err(err) => {
                error!("Failed to create main window: {err}");
                self.state.set(WindowState::Terminated);
                drop(hold);
                host.shutdown();
            }
        }
    }

    /// Run `create` and complete the construction with its result.
    pub async fn construct<H, F, Fut>(&self, host: &H, hold: H::Hold, development: bool, create: F)
    where
        H: ApplicationHost,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<H::Window>>,
    {
        let result = create().await;
        self.finish(host, hold, result, development);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeepMeAwakeError;
    use crate::test_utils::{FakeHost, HostEvent, count_error_events};

    fn construction_failed() -> KeepMeAwakeError {
        std::io::Error::other("simulated failure").into()
    }

    #[test]
    fn test_first_activation_holds_and_constructs() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();

        let step = activation.begin(&host);

        assert!(matches!(step, ActivationStep::Construct(_)));
        assert_eq!(activation.state(), WindowState::Constructing);
        assert_eq!(host.events(), vec![HostEvent::Held]);
    }

    #[test]
    fn test_successful_construction_presents_then_releases() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();
        let ActivationStep::Construct(hold) = activation.begin(&host) else {
            panic!("Expected construction");
        };

        activation.finish(&host, hold, Ok(1), false);

        assert_eq!(activation.state(), WindowState::Present);
        assert_eq!(
            host.events(),
            vec![HostEvent::Held, HostEvent::Presented(1), HostEvent::Released]
        );
    }

    #[test]
    fn test_development_marker_only_on_development_builds() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();
        let ActivationStep::Construct(hold) = activation.begin(&host) else {
            panic!("Expected construction");
        };

        activation.finish(&host, hold, Ok(7), true);

        assert_eq!(host.count(HostEvent::MarkedDevelopment(7)), 1);
        assert_eq!(
            host.events(),
            vec![
                HostEvent::Held,
                HostEvent::Presented(7),
                HostEvent::MarkedDevelopment(7),
                HostEvent::Released,
            ]
        );
    }

    #[test]
    fn test_second_activation_presents_existing_window() {
        let host = FakeHost::with_window(3);
        let activation = MainWindowActivation::new();

        let step = activation.begin(&host);

        assert!(matches!(step, ActivationStep::Presented));
        assert_eq!(activation.state(), WindowState::Present);
        assert_eq!(host.events(), vec![HostEvent::Presented(3)]);
        assert_eq!(host.count(HostEvent::Held), 0);
    }

    #[test]
    fn test_activation_during_construction_is_ignored() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();
        let ActivationStep::Construct(hold) = activation.begin(&host) else {
            panic!("Expected construction");
        };

        assert!(matches!(activation.begin(&host), ActivationStep::Ignored));
        assert_eq!(host.count(HostEvent::Held), 1);

        activation.finish(&host, hold, Ok(1), false);
        assert_eq!(host.count(HostEvent::Released), 1);
    }

    #[test]
    fn test_failed_construction_logs_once_and_quits() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();

        let ((), errors) = count_error_events(|| {
            let ActivationStep::Construct(hold) = activation.begin(&host) else {
                panic!("Expected construction");
            };
            activation.finish(&host, hold, Err(construction_failed()), false);
        });

        assert_eq!(errors, 1);
        assert_eq!(activation.state(), WindowState::Terminated);
        assert_eq!(host.count(HostEvent::Held), 1);
        assert_eq!(host.count(HostEvent::Released), 1);
        assert_eq!(host.count(HostEvent::Shutdown), 1);
        assert!(
            !host
                .events()
                .iter()
                .any(|e| matches!(e, HostEvent::Presented(_))),
            "Nothing must be presented after a failure"
        );
    }

    #[test]
    fn test_no_retry_after_failure() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();
        let ActivationStep::Construct(hold) = activation.begin(&host) else {
            panic!("Expected construction");
        };
        activation.finish(&host, hold, Err(construction_failed()), false);

        assert!(matches!(activation.begin(&host), ActivationStep::Ignored));
        assert_eq!(host.count(HostEvent::Held), 1);
    }

    #[test]
    fn test_closed_window_is_constructed_again() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();
        let ActivationStep::Construct(hold) = activation.begin(&host) else {
            panic!("Expected construction");
        };
        activation.finish(&host, hold, Ok(1), false);

        // The window was closed, but something else kept the app alive
        host.set_window(None);
        assert!(matches!(activation.begin(&host), ActivationStep::Construct(_)));
    }

    #[test]
    fn test_construct_runs_future_to_completion() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();
        let ActivationStep::Construct(hold) = activation.begin(&host) else {
            panic!("Expected construction");
        };

        glib::MainContext::new().block_on(activation.construct(&host, hold, false, || async {
            Ok(42)
        }));

        assert_eq!(activation.state(), WindowState::Present);
        assert_eq!(
            host.events(),
            vec![HostEvent::Held, HostEvent::Presented(42), HostEvent::Released]
        );
    }

    #[test]
    fn test_construct_failure_releases_hold_exactly_once() {
        let host = FakeHost::default();
        let activation = MainWindowActivation::new();

        let ((), errors) = count_error_events(|| {
            let ActivationStep::Construct(hold) = activation.begin(&host) else {
                panic!("Expected construction");
            };
            glib::MainContext::new().block_on(activation.construct(&host, hold, true, || async {
                Err(construction_failed())
            }));
        });

        assert_eq!(errors, 1);
        assert_eq!(
            host.events(),
            vec![HostEvent::Held, HostEvent::Released, HostEvent::Shutdown]
        );
    }
}
