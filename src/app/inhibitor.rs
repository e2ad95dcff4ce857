//! Session inhibition
//!
//! The [`Inhibitor`] owns the inhibit cookie for the current [`Inhibit`] mode,
//! together with a hold on the application, so that inhibition continues
//! after the main window is closed.

use glib::Object;
use glib::object::IsA;
use gtk::ApplicationInhibitFlags;
use gtk::prelude::*;

glib::wrapper! {
    /// Inhibits suspend or idle on behalf of an application.
    pub struct Inhibitor(ObjectSubclass<imp::Inhibitor>);
}

impl Inhibitor {
    /// Create an inhibitor for `application`.
    pub fn new(application: &impl IsA<gtk::Application>) -> Self {
        Object::builder()
            .property("application", application.as_ref())
            .build()
    }
}

impl Default for Inhibitor {
    fn default() -> Self {
        Object::builder().build()
    }
}

/// What's currently being inhibited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, glib::Enum)]
#[enum_type(name = "KeepMeAwakeInhibit")]
pub enum Inhibit {
    /// Inhibit nothing.
    #[default]
    Nothing,
    /// Inhibit suspend.
    Suspend,
    /// Inhibit suspend and session idle.
    SuspendAndIdle,
}

impl From<Inhibit> for ApplicationInhibitFlags {
    fn from(value: Inhibit) -> Self {
        match value {
            Inhibit::Nothing => ApplicationInhibitFlags::empty(),
            Inhibit::Suspend => ApplicationInhibitFlags::SUSPEND,
            Inhibit::SuspendAndIdle => {
                ApplicationInhibitFlags::SUSPEND | ApplicationInhibitFlags::IDLE
            }
        }
    }
}

impl Inhibit {
    /// Human-readable reason passed to the session along with the cookie.
    fn reason(self) -> Option<glib::GString> {
        let reason = match self {
            Self::Nothing => return None,
            Self::Suspend => "Keep Me Awake inhibits suspend at your request.",
            Self::SuspendAndIdle => "Keep Me Awake inhibits suspend and idle at your request.",
        };
        Some(glib::dpgettext2(None, "inhibit-reason", reason))
    }
}

mod imp {
    use std::cell::RefCell;

    use glib::{Properties, WeakRef};
    use gtk::ApplicationInhibitFlags;
    use gtk::gio::ApplicationHoldGuard;
    use gtk::prelude::*;
    use gtk::subclass::prelude::*;
    use tracing::{debug, info, warn};

    use super::Inhibit;

    #[derive(Debug)]
    struct InhibitCookieGuard {
        app: WeakRef<gtk::Application>,
        flags: ApplicationInhibitFlags,
        cookie: u32,
    }

    impl InhibitCookieGuard {
        fn acquire(
            app: &gtk::Application,
            flags: ApplicationInhibitFlags,
            reason: Option<&str>,
        ) -> Self {
            // No window: GTK would tie the idle inhibitor to the window's
            // surface, and inhibition must outlive the window.
            let cookie = app.inhibit(gtk::Window::NONE, flags, reason);
            debug!("Acquired inhibit cookie {cookie} for {flags:?}");
            Self {
                app: app.downgrade(),
                flags,
                cookie,
            }
        }
    }

    impl Drop for InhibitCookieGuard {
        fn drop(&mut self) {
            if let Some(app) = self.app.upgrade() {
                debug!("Dropping inhibit cookie {}", self.cookie);
                app.uninhibit(self.cookie);
                self.cookie = 0;
            }
        }
    }

    /// Fields drop in order: uninhibit first, then release the hold.
    #[derive(Default)]
    enum InhibitState {
        #[default]
        Nothing,
        Inhibited {
            cookie: InhibitCookieGuard,
            _hold: ApplicationHoldGuard,
        },
    }

    impl From<&InhibitState> for Inhibit {
        fn from(value: &InhibitState) -> Self {
            match value {
                InhibitState::Nothing => Self::Nothing,
                InhibitState::Inhibited { cookie, .. } => {
                    if cookie.flags.contains(ApplicationInhibitFlags::IDLE) {
                        Self::SuspendAndIdle
                    } else {
                        Self::Suspend
                    }
                }
            }
        }
    }

    #[derive(Properties, Default)]
    #[properties(wrapper_type = super::Inhibitor)]
    pub struct Inhibitor {
        /// The application to inhibit on.
        #[property(
            get = Self::get_application,
            set = Self::set_application,
            type = Option<gtk::Application>,
            nullable
        )]
        application: RefCell<Option<WeakRef<gtk::Application>>>,
        /// What is inhibited.
        #[property(
            explicit_notify,
            get = Self::get_inhibitors,
            set = Self::set_inhibitors,
            type = Inhibit,
            builder(Inhibit::default())
        )]
        inhibitors: RefCell<InhibitState>,
    }

    impl Inhibitor {
        fn get_application(&self) -> Option<gtk::Application> {
            self.application.borrow().as_ref()?.upgrade()
        }

        fn set_application(&self, app: Option<gtk::Application>) {
            // Cookies belong to the old application
            self.set_inhibitors(Inhibit::Nothing);
            self.application.replace(app.map(|app| app.downgrade()));
        }

        fn get_inhibitors(&self) -> Inhibit {
            Inhibit::from(&*self.inhibitors.borrow())
        }

        fn set_inhibitors(&self, inhibit: Inhibit) {
            if self.get_inhibitors() == inhibit {
                return;
            }
            let new_state = match (inhibit, self.get_application()) {
                (Inhibit::Nothing, _) => InhibitState::Nothing,
                (_, None) => {
                    warn!("Cannot inhibit {inhibit:?} without an application");
                    return;
                }
                (_, Some(app)) => {
                    let reason = inhibit.reason();
                    let cookie =
                        InhibitCookieGuard::acquire(&app, inhibit.into(), reason.as_deref());
                    InhibitState::Inhibited {
                        cookie,
                        _hold: app.hold(),
                    }
                }
            };
            info!("Inhibiting: {inhibit:?}");
            // Replacing drops the previous cookie and hold
            self.inhibitors.replace(new_state);
            self.obj().notify_inhibitors();
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for Inhibitor {
        const NAME: &'static str = "KeepMeAwakeInhibitor";

        type Type = super::Inhibitor;

        type ParentType = glib::Object;
    }

    #[glib::derived_properties]
    impl ObjectImpl for Inhibitor {}
}
