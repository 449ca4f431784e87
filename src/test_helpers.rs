//! Shared test utilities for the folio test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let doc = sample_document();          // parsed fixture content
//! let tmp = setup_fixtures();           // isolated copy of fixtures/content
//! let html = read_output(&out, "index.html");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::{ContentDocument, parse_content};

/// The fixture content document: 3 articles, 2 publications, no media.
pub const SAMPLE_CONTENT: &str = include_str!("../fixtures/content/assets/data/content.json");

// =========================================================================
// Fixture setup
// =========================================================================

pub fn sample_document() -> ContentDocument {
    parse_content(SAMPLE_CONTENT).unwrap()
}

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Output inspection: panics with a clear message on miss
// =========================================================================

/// Read a generated file as a string. Panics if missing.
pub fn read_output(dir: &Path, rel: &str) -> String {
    let path = dir.join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("expected output file {}: {e}", path.display()))
}

/// The `<… id="{id}" …>…` element's opening tag onwards, up to the next
/// element carrying `id="{stop}"`. Panics if `id` is absent.
pub fn section_between<'a>(html: &'a str, id: &str, stop: &str) -> &'a str {
    let start = html
        .find(&format!("id=\"{id}\""))
        .unwrap_or_else(|| panic!("id '{id}' not found in page"));
    let rest = &html[start..];
    let end = rest.find(&format!("id=\"{stop}\"")).unwrap_or(rest.len());
    &rest[..end]
}
