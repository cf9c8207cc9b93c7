use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR missing"));
    // Every file under template/ is copied verbatim into new projects.
    let template_root = manifest_dir.join("template");

    if !template_root.exists() {
        panic!("Template directory not found: {}", template_root.display());
    }

    println!("cargo:rerun-if-changed={}", template_root.display());

    let mut template_paths = Vec::new();
    collect_files(&template_root, &mut template_paths);
    template_paths.sort();

    for path in &template_paths {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    let generated = generate_template_rs(&template_root, &template_paths);

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR missing"));
    fs::write(out_dir.join("generated_template.rs"), generated)
        .expect("Failed to write generated_template.rs");
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("Failed to read dir {}: {}", dir.display(), err));

    for entry in entries {
        let entry = entry.unwrap_or_else(|err| panic!("Failed to read dir entry: {}", err));
        let path = entry.path();

        if path.is_dir() {
            println!("cargo:rerun-if-changed={}", path.display());
            collect_files(&path, out);
            continue;
        }

        out.push(path);
    }
}

fn generate_template_rs(template_root: &Path, template_paths: &[PathBuf]) -> String {
    let mut out = String::new();
    out.push_str("pub static TEMPLATE_FILES: &[(&str, &[u8])] = &[\n");

    for path in template_paths {
        let key = key_for_path(template_root, path);

        out.push_str("    (\"");
        out.push_str(&escape_rust_string(&key));
        out.push_str("\", include_bytes!(\"");
        out.push_str(&escape_rust_string(&path.to_string_lossy()));
        out.push_str("\")),\n");
    }

    out.push_str("];\n");
    out
}

fn key_for_path(template_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(template_root).unwrap_or_else(|_| {
        panic!(
            "Template path is not under template/: {}",
            path.display()
        )
    });

    relative.to_string_lossy().replace('\\', "/")
}

fn escape_rust_string(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}
