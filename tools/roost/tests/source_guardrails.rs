use std::fs;
use std::path::{Path, PathBuf};

/// Decision modules that must stay free of I/O and logging.
const PURE_CORE: &[&str] = &["classifier.rs", "fsm.rs", "steps.rs", "translator.rs", "types.rs"];

const IO_MARKERS: &[&str] = &[
    "append_run_log(",
    "std::fs::",
    "fs::",
    "OpenOptions::",
    ".write_line(",
    "println!(",
    "eprintln!(",
];

fn collect_rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).expect("read src dir");
    for entry in entries {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            collect_rust_files(&path, out);
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
            out.push(path);
        }
    }
}

/// Source up to the unit-test module, where `expect`/`unwrap` are allowed.
fn production_part(text: &str) -> &str {
    match text.find("#[cfg(test)]") {
        Some(index) => &text[..index],
        None => text,
    }
}

#[test]
fn production_code_never_unwraps() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    collect_rust_files(&src_root, &mut files);
    files.sort();
    assert!(!files.is_empty());

    let offenders = files
        .iter()
        .filter(|path| {
            let text = fs::read_to_string(path).expect("read source");
            production_part(&text).contains(".unwrap()")
        })
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>();
    assert!(offenders.is_empty(), "unwrap() in: {offenders:?}");
}

#[test]
fn pure_core_modules_do_no_io() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    for name in PURE_CORE {
        let text = fs::read_to_string(src_root.join(name)).expect("read source");
        let production = production_part(&text);
        for marker in IO_MARKERS {
            assert!(
                !production.contains(marker),
                "{name} contains `{marker}` outside its tests"
            );
        }
    }
}
