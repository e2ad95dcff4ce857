use glib::object::IsA;
use gtk::gio;

use crate::error::{KeepMeAwakeError, Result};

glib::wrapper! {
    /// The main window, defined by a composite template.
    pub struct KeepMeAwakeApplicationWindow(ObjectSubclass<imp::KeepMeAwakeApplicationWindow>)
        @extends adw::ApplicationWindow, gtk::ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gio::ActionGroup, gio::ActionMap,
            gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget,
            gtk::Native, gtk::Root, gtk::ShortcutManager;
}

impl KeepMeAwakeApplicationWindow {
    /// Resource path of the window template.
    pub const TEMPLATE: &'static str = "/de/swsnr/keepmeawake/ui/application-window.ui";

    /// Create a new main window for `application`.
    ///
    /// The template must be registered, see [`Self::ensure_template`].
    pub fn new(application: &impl IsA<gtk::Application>) -> Self {
        glib::Object::builder()
            .property("application", application)
            .build()
    }

    /// Check that the window template is available in the registered resources.
    ///
    /// GTK aborts when initializing the window class without its template.
    pub fn ensure_template() -> Result<()> {
        gio::resources_get_info(Self::TEMPLATE, gio::ResourceLookupFlags::NONE)
            .map(|_| ())
            .map_err(|source| KeepMeAwakeError::TemplateMissing {
                path: Self::TEMPLATE.to_string(),
                source,
            })
    }
}

mod imp {
    use std::cell::Cell;

    use adw::subclass::prelude::*;
    use glib::prelude::*;
    use glib::subclass::InitializingObject;
    use gtk::CompositeTemplate;

    use crate::app::inhibitor::Inhibit;

    #[derive(Default, CompositeTemplate, glib::Properties)]
    #[properties(wrapper_type = super::KeepMeAwakeApplicationWindow)]
    #[template(resource = "/de/swsnr/keepmeawake/ui/application-window.ui")]
    pub struct KeepMeAwakeApplicationWindow {
        /// What the user chose to inhibit.
        #[property(get, set, builder(Inhibit::default()))]
        inhibitors: Cell<Inhibit>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for KeepMeAwakeApplicationWindow {
        const NAME: &'static str = "KeepMeAwakeApplicationWindow";

        type Type = super::KeepMeAwakeApplicationWindow;

        type ParentType = adw::ApplicationWindow;

        fn class_init(klass: &mut Self::Class) {
            klass.bind_template();
            // Stateful string action over the enum nicks, for the toggle buttons
            klass.install_property_action("win.inhibit", "inhibitors");
        }

        fn instance_init(obj: &InitializingObject<Self>) {
            obj.init_template();
        }
    }

    #[glib::derived_properties]
    impl ObjectImpl for KeepMeAwakeApplicationWindow {}

    impl WidgetImpl for KeepMeAwakeApplicationWindow {}

    impl WindowImpl for KeepMeAwakeApplicationWindow {}

    impl ApplicationWindowImpl for KeepMeAwakeApplicationWindow {}

    impl AdwApplicationWindowImpl for KeepMeAwakeApplicationWindow {}
}
