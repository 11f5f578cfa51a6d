use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IconPosition {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct BuiltinAppManifest {
    id: String,
    name: String,
    icon: String,
    surface: String,
    icon_position: IconPosition,
}

#[derive(Debug, Deserialize)]
struct BuiltinCatalog {
    schema_version: u32,
    apps: Vec<BuiltinAppManifest>,
}

fn surface_variant(surface: &str) -> &'static str {
    match surface {
        "settings" => "BuiltinSurface::Settings",
        "add-app" => "BuiltinSurface::AddApp",
        other => panic!("unknown builtin surface `{other}`"),
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("builtin_apps.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: BuiltinCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalog.schema_version != 1 {
        panic!(
            "builtin app schema mismatch in {}: expected 1 found {}",
            path.display(),
            catalog.schema_version
        );
    }

    let mut seen = HashSet::new();
    let mut entries = String::new();
    for app in &catalog.apps {
        if !seen.insert(app.id.as_str()) {
            panic!("duplicate builtin app id `{}`", app.id);
        }
        entries.push_str(&format!(
            "    BuiltinApp {{\n        id: {:?},\n        name: {:?},\n        icon: {:?},\n        surface: {},\n        icon_x: {:?},\n        icon_y: {:?},\n    }},\n",
            app.id,
            app.name,
            app.icon,
            surface_variant(&app.surface),
            app.icon_position.x,
            app.icon_position.y,
        ));
    }

    let generated = format!(
        "/// Build-time generated builtin application catalog.\n\
pub const BUILTIN_APPS: &[BuiltinApp] = &[\n{entries}];\n"
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("builtin_apps_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
