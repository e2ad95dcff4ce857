//! The seam between application logic and the toolkit.

/// What the activation sequence and the menu actions need from the application.
///
/// [`KeepMeAwakeApplication`](super::KeepMeAwakeApplication) implements this on
/// top of GTK; tests substitute a fake.
pub trait ApplicationHost {
    /// The main window type.
    type Window;
    /// Guard which keeps the application alive until dropped.
    type Hold;

    /// The currently active main window, if any.
    fn active_main_window(&self) -> Option<Self::Window>;

    /// Keep the application alive until the returned guard is dropped.
    fn keep_alive(&self) -> Self::Hold;

    /// Bring `window` to the foreground.
    fn present_window(&self, window: &Self::Window);

    /// Visually mark `window` as belonging to a development build.
    fn mark_development_build(&self, window: &Self::Window);

    /// Quit the application.
    fn shutdown(&self);

    /// Show the about dialog.
    fn show_about(&self);
}
