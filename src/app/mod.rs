//! The Keep Me Awake application
//!
//! [`run`] bootstraps the process and runs [`KeepMeAwakeApplication`], an
//! `adw::Application` which registers the menu actions on startup and creates
//! the main window lazily on activation.

use adw::prelude::*;
use adw::subclass::prelude::ObjectSubclassIsExt;
use glib::{Object, dpgettext2};
use gtk::gio::{self, ActionEntry, ApplicationHoldGuard};
use tracing::{debug, info};

use crate::config::{self, APP_ID, APPLICATION_NAME, RESOURCE_BASE_PATH};
use crate::error::Result;

mod about;
pub mod actions;
pub mod activation;
mod host;
pub mod inhibitor;
pub mod widgets;

pub use actions::AppAction;
pub use activation::{ActivationStep, MainWindowActivation, WindowState};
pub use host::ApplicationHost;
pub use inhibitor::{Inhibit, Inhibitor};

use widgets::KeepMeAwakeApplicationWindow;

glib::wrapper! {
    /// The application object.
    pub struct KeepMeAwakeApplication(ObjectSubclass<imp::KeepMeAwakeApplication>)
        @extends adw::Application, gtk::Application, gio::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl KeepMeAwakeApplication {
    /// The inhibitor of this application.
    pub fn inhibitor(&self) -> Inhibitor {
        self.imp()
            .inhibitor
            .get_or_init(|| Inhibitor::new(self))
            .clone()
    }

    fn setup_actions(&self) {
        let entries = AppAction::ALL.map(|action| {
            ActionEntry::builder(action.name())
                .activate(move |app: &Self, _, _| action.activate(app))
                .build()
        });
        self.add_action_entries(entries);
        for action in AppAction::ALL {
            let accels = action.accels();
            if !accels.is_empty() {
                self.set_accels_for_action(&action.detailed_name(), accels);
            }
        }
    }

    /// Construct the main window and bind it to the inhibitor.
    async fn create_main_window(&self) -> Result<gtk::Window> {
        KeepMeAwakeApplicationWindow::ensure_template()?;
        debug!("Creating main application window");
        let window = KeepMeAwakeApplicationWindow::new(self);
        self.inhibitor()
            .bind_property("inhibitors", &window, "inhibitors")
            .bidirectional()
            .sync_create()
            .build();
        Ok(window.upcast())
    }
}

impl Default for KeepMeAwakeApplication {
    fn default() -> Self {
        let app: Self = Object::builder()
            .property("application-id", APP_ID)
            .property("resource-base-path", RESOURCE_BASE_PATH)
            .build();
        // Reported by --version
        app.set_version(config::CARGO_PKG_VERSION);
        app
    }
}

impl ApplicationHost for KeepMeAwakeApplication {
    type Window = gtk::Window;
    type Hold = ApplicationHoldGuard;

    fn active_main_window(&self) -> Option<gtk::Window> {
        self.active_window()
    }

    fn keep_alive(&self) -> ApplicationHoldGuard {
        self.hold()
    }

    fn present_window(&self, window: &gtk::Window) {
        window.present();
    }

    fn mark_development_build(&self, window: &gtk::Window) {
        window.add_css_class("devel");
    }

    fn shutdown(&self) {
        self.quit();
    }

    fn show_about(&self) {
        about::about_dialog().present(self.active_window().as_ref());
    }
}

/// Bootstrap and run the application with `args`.
///
/// Fails if the resource bundle cannot be found or loaded; everything after
/// that is reported through the returned exit code.
pub fn run(args: &[String]) -> Result<glib::ExitCode> {
    debug!("Running in flatpak?: {}", config::running_in_flatpak());

    glib::set_application_name(&dpgettext2(None, "application-name", APPLICATION_NAME));
    config::load_and_register_resources()?;

    let app = KeepMeAwakeApplication::default();
    let exit_code = app.run_with_args(args);
    info!("Application exited with {exit_code:?}");
    Ok(exit_code)
}

mod imp {
    use std::cell::OnceCell;

    use adw::subclass::prelude::*;
    use tracing::{debug, info, warn};

    use crate::app::activation::{ActivationStep, MainWindowActivation};
    use crate::app::inhibitor::{Inhibit, Inhibitor};
    use crate::{config, utils};

    #[derive(Default)]
    pub struct KeepMeAwakeApplication {
        pub(super) inhibitor: OnceCell<Inhibitor>,
        pub(super) activation: MainWindowActivation,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for KeepMeAwakeApplication {
        const NAME: &'static str = "KeepMeAwakeApplication";

        type Type = super::KeepMeAwakeApplication;

        type ParentType = adw::Application;
    }

    impl ObjectImpl for KeepMeAwakeApplication {}

    impl ApplicationImpl for KeepMeAwakeApplication {
        fn startup(&self) {
            self.parent_startup();
            // Startup only runs in the primary instance; remote instances
            // forward their activation and keep logging to stderr.
            if let Err(error) = utils::start_log_file() {
                warn!("Logging to stderr only, log file unavailable: {error}");
            }
            info!(
                "Starting application, version {}, development? {}",
                config::CARGO_PKG_VERSION,
                config::is_development_build()
            );

            gtk::Window::set_default_icon_name(config::APP_ID);

            self.obj().setup_actions();
        }

        fn activate(&self) {
            self.parent_activate();
            debug!("Activating application");

            let app = self.obj().clone();
            if let ActivationStep::Construct(hold) = self.activation.begin(&app) {
                glib::spawn_future_local(async move {
                    app.imp()
                        .activation
                        .construct(&app, hold, config::is_development_build(), || {
                            app.create_main_window()
                        })
                        .await;
                });
            }
        }

        fn shutdown(&self) {
            // Uninhibit while the application is still registered
            if let Some(inhibitor) = self.inhibitor.get() {
                inhibitor.set_inhibitors(Inhibit::Nothing);
            }
            self.parent_shutdown();
        }
    }

    impl GtkApplicationImpl for KeepMeAwakeApplication {}

    impl AdwApplicationImpl for KeepMeAwakeApplication {}
}
