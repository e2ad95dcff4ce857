fn main() {
    // Compile the GResource bundle (UI templates, metainfo, styles)
    glib_build_tools::compile_resources(
        &["data"],
        "data/resources.gresource.xml",
        "resources.gresource",
    );

    // The app id is baked into the binary, see `config::APP_ID`
    println!("cargo:rerun-if-env-changed=KEEPMEAWAKE_APP_ID");
    println!("cargo:rerun-if-changed=data");
}
