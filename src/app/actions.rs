//! Application menu actions.

use tracing::info;

use super::host::ApplicationHost;

/// All actions registered on the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Quit the application.
    Quit,
    /// Show the about dialog.
    About,
}

impl AppAction {
    /// Every action, in registration order.
    pub const ALL: [Self; 2] = [Self::Quit, Self::About];

    /// The action name, without the `app.` prefix.
    pub fn name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::About => "about",
        }
    }

    /// The detailed name, i.e. `app.<name>`.
    pub fn detailed_name(self) -> String {
        format!("app.{}", self.name())
    }

    /// Keyboard accelerators for this action.
    pub fn accels(self) -> &'static [&'static str] {
        match self {
            Self::Quit => &["<Control>q"],
            Self::About => &[],
        }
    }

    /// Look up an action by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Perform this action on `host`.
    pub fn activate<H: ApplicationHost>(self, host: &H) {
        match self {
            Self::Quit => {
                info!("Quitting on request");
                host.shutdown();
            }
            Self::About => host.show_about(),
        }
    }
}
