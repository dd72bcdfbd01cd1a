use std::env;
use std::path::PathBuf;

// Records where data/properties.csv lives so installed binaries can still find
// the shipped table. CATALYST_DATA_ROOT_HINT overrides the manifest directory.
fn main() {
    println!("cargo:rerun-if-env-changed=CATALYST_DATA_ROOT_HINT");

    let Some(root) = env::var_os("CATALYST_DATA_ROOT_HINT")
        .filter(|hint| !hint.is_empty())
        .or_else(|| env::var_os("CARGO_MANIFEST_DIR"))
        .map(PathBuf::from)
    else {
        return;
    };

    if !root.join("data/properties.csv").is_file() {
        println!(
            "cargo:warning=no data/properties.csv under {}; the binary will need CATALYST_PROPERTIES",
            root.display()
        );
    }
    println!("cargo:rustc-env=CATALYST_DATA_ROOT_HINT={}", root.display());
}
