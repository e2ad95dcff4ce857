//! The about dialog and its static metadata.

use glib::{dgettext, dpgettext2};

use crate::config::CARGO_PKG_VERSION;

/// Bundled metainfo the dialog reads name, license, website and release notes from.
pub const METAINFO_RESOURCE: &str = "/de/swsnr/keepmeawake/de.swsnr.keepmeawake.metainfo.xml";

/// Where to help translating the app.
pub const TRANSLATIONS_URL: &str = "https://translate.codeberg.org/engage/de-swsnr-keepmeawake/";

/// Developer credits.
pub const DEVELOPERS: &[&str] = &["Sebastian Wiesner https://swsnr.de"];

/// Designer credits.
pub const DESIGNERS: &[&str] = &["Sebastian Wiesner https://swsnr.de"];

/// Services acknowledged under "Helpful services".
pub const HELPFUL_SERVICES: &[&str] = &[
    "Codeberg https://codeberg.org",
    "Flathub https://flathub.org/",
    "Open Build Service https://build.opensuse.org/",
];

/// The message id translators put their credits into.
const TRANSLATOR_CREDITS: &str = "translator-credits";

/// A sibling application listed in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherApp {
    /// Application id.
    pub app_id: &'static str,
    /// Untranslated name.
    pub name: &'static str,
    /// Untranslated one-line summary.
    pub summary: &'static str,
}

/// Sibling applications, names and summaries as in their own metainfo.
pub const OTHER_APPS: &[OtherApp] = &[
    OtherApp {
        app_id: "de.swsnr.pictureoftheday",
        name: "Picture Of The Day",
        summary: "Your daily wallpaper",
    },
    OtherApp {
        app_id: "de.swsnr.turnon",
        name: "Turn On",
        summary: "Turn on devices in your network",
    },
];

/// Credits for translators of the current language.
///
/// Returns `None` if the message catalog has no translation, i.e. `translated`
/// is still the message id.
pub fn translator_credits(translated: &str) -> Option<&str> {
    let credits = translated.trim();
    (credits != TRANSLATOR_CREDITS && !credits.is_empty()).then_some(translated)
}

/// Build the about dialog.
pub fn about_dialog() -> adw::AboutDialog {
    let dialog = adw::AboutDialog::from_appdata(METAINFO_RESOURCE, Some(CARGO_PKG_VERSION));
    dialog.set_version(CARGO_PKG_VERSION);

    dialog.add_link(
        &dpgettext2(None, "about-dialog.link.label", "Translations"),
        TRANSLATIONS_URL,
    );

    dialog.set_developers(DEVELOPERS);
    dialog.set_designers(DESIGNERS);
    // Translators: one line per translator, e.g. "Jane Doe https://jdoe.example.com"
    let credits = dgettext(None, TRANSLATOR_CREDITS);
    if let Some(credits) = translator_credits(&credits) {
        dialog.set_translator_credits(credits);
    }
    dialog.add_acknowledgement_section(
        Some(&dpgettext2(
            None,
            "about-dialog.acknowledgment-section",
            "Helpful services",
        )),
        HELPFUL_SERVICES,
    );

    for app in OTHER_APPS {
        dialog.add_other_app(
            app.app_id,
            &dpgettext2(None, "about-dialog.other-app.name", app.name),
            &dpgettext2(None, "about-dialog.other-app.summary", app.summary),
        );
    }

    dialog
}
