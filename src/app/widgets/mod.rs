//! Widgets of Keep Me Awake.

mod application_window;

pub use application_window::KeepMeAwakeApplicationWindow;
