use std::env;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("pages.rs");

    let mut entries: Vec<(String, String)> = Vec::new();
    let pages_dir = Path::new("pages");

    if pages_dir.exists() {
        for entry in WalkDir::new(pages_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map_or(false, |ext| ext == "yaml" || ext == "yml")
            })
        {
            let path = entry.path();
            let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            if let Ok(content) = fs::read_to_string(path) {
                entries.push((slug, content));
            }
        }
    }

    // Stable order regardless of directory iteration order.
    entries.sort();

    let mut code = String::new();
    code.push_str("/// Embedded page records as (slug, yaml)\n");
    code.push_str("pub static PAGES: &[(&str, &str)] = &[\n");
    for (slug, content) in &entries {
        code.push_str(&format!("    ({:?}, {:?}),\n", slug, content));
    }
    code.push_str("];\n");

    fs::write(&dest_path, code).unwrap();

    println!("cargo:rerun-if-changed=pages");
}
