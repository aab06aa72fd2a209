//! Lint: keep the navigation engine free of browser bindings.
//!
//! Everything under `src/nav/`, plus `src/input.rs` and `src/layout.rs`, must
//! stay testable on the host target. Browser APIs belong in `dom.rs`,
//! `preload.rs`, `time.rs` and `main.rs`, which translate between the
//! document and `InputEvent` / `RenderOp`.
//!
//! This test scans those files and flags any line that names a browser
//! binding crate outside a comment. It also checks that `dom.rs` never
//! discards the result of a DOM write with `let _ =`.

use std::fs;
use std::path::{Path, PathBuf};

const FORBIDDEN: &[&str] = &["web_sys", "js_sys", "wasm_bindgen", "gloo"];

/// Return the forbidden crate named on this line, if any.
fn forbidden_crate(line: &str) -> Option<&'static str> {
    let trimmed = line.trim();
    if trimmed.starts_with("//") {
        return None;
    }
    // Ignore trailing comments.
    let code = match trimmed.find("//") {
        Some(i) => &trimmed[..i],
        None => trimmed,
    };
    FORBIDDEN.iter().copied().find(|name| {
        code.match_indices(name).any(|(i, _)| {
            let before = code[..i].chars().next_back();
            let after = code[i + name.len()..].chars().next();
            let ident = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
            !ident(before) && !ident(after)
        })
    })
}

fn find_violations(source: &str) -> Vec<(usize, &'static str)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| forbidden_crate(line).map(|name| (i + 1, name)))
        .collect()
}

fn engine_files(root: &Path) -> Vec<PathBuf> {
    let mut files = vec![root.join("src/input.rs"), root.join("src/layout.rs")];
    if let Ok(entries) = fs::read_dir(root.join("src/nav")) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "rs").unwrap_or(false) {
                files.push(path);
            }
        }
    }
    files
}

#[test]
fn engine_has_no_browser_bindings() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let files = engine_files(root);
    assert!(files.len() > 2, "src/nav/ not found");

    let mut msg = String::new();
    for path in &files {
        let Ok(source) = fs::read_to_string(path) else {
            panic!("cannot read {}", path.display());
        };
        for (line_num, name) in find_violations(&source) {
            msg.push_str(&format!("  {}:{}: uses {}\n", path.display(), line_num, name));
        }
    }

    if !msg.is_empty() {
        panic!(
            "Found browser bindings in engine code.\n\
             Move DOM access to dom.rs and pass data through InputEvent / RenderOp.\n\n{msg}"
        );
    }
}

/// Lines in the DOM layer that throw away a fallible call's result.
fn discarded_results(source: &str) -> Vec<usize> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let code = line.trim();
            !code.starts_with("//") && code.starts_with("let _ =")
        })
        .map(|(i, _)| i + 1)
        .collect()
}

#[test]
fn dom_layer_logs_failed_writes() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/dom.rs");
    let Ok(source) = fs::read_to_string(&path) else {
        panic!("cannot read {}", path.display());
    };
    let lines = discarded_results(&source);
    assert!(
        lines.is_empty(),
        "{} discards DOM results on lines {lines:?}; route them through a logging helper",
        path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_use_statement() {
        assert_eq!(forbidden_crate("use web_sys::Element;"), Some("web_sys"));
        assert_eq!(forbidden_crate("let t = gloo::timers::callback::Timeout::new(1, f);"), Some("gloo"));
    }

    #[test]
    fn ignores_comments() {
        assert_eq!(forbidden_crate("// web_sys is not allowed here"), None);
        assert_eq!(forbidden_crate("/// see wasm_bindgen docs"), None);
        assert_eq!(forbidden_crate("let x = 1; // not js_sys"), None);
    }

    #[test]
    fn ignores_longer_identifiers() {
        assert_eq!(forbidden_crate("let gloomy = 1;"), None);
        assert_eq!(forbidden_crate("fn my_web_sys_helper() {}"), None);
    }

    #[test]
    fn finds_discarded_results() {
        let source = "set_style(el, \"a\", \"b\");\n    let _ = el.focus();\n// let _ = x;\n";
        assert_eq!(discarded_results(source), vec![2]);
    }

    #[test]
    fn reports_line_numbers() {
        let source = "use crate::input::InputEvent;\n\nuse js_sys::Date;\n";
        assert_eq!(find_violations(source), vec![(3, "js_sys")]);
    }
}
