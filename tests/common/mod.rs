//! Shared helpers for the integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use solast::ast::{decode, SourceUnit};

/// Get path to a file under tests/fixtures/
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("Failed to load fixture {}: {}", name, err))
}

/// Decode `<name>.json` and return it with the text of `<name>.sol`.
pub fn load_unit(name: &str) -> (SourceUnit, String) {
    let json = load_fixture(&format!("{}.json", name));
    let unit = decode(&json).unwrap_or_else(|err| panic!("Failed to decode {}.json: {}", name, err));
    (unit, load_fixture(&format!("{}.sol", name)))
}

/// Discover all compiler output fixtures in tests/fixtures/
pub fn discover_fixtures() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture_path(""))
        .expect("Failed to read fixtures directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .collect();
    paths.sort();
    paths
}
