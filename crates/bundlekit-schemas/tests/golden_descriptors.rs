//! Golden tests for bundle descriptor validation
//!
//! Every `tests/fixtures/*.json` document is validated against the built-in
//! descriptor schema and the rendered error list is compared with the
//! sibling `*.errors.txt` file. Set `UPDATE_GOLDEN=1` to rewrite the
//! expected files from the current output.

use pretty_assertions::assert_eq;
use serde_json::Value;
use bundlekit_schemas::{bundle_descriptor_schema, validate, ValidationErrors};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn update_golden() -> bool {
    std::env::var("UPDATE_GOLDEN")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

fn render(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|e| format!("{} [{}] {}\n", e.path, e.kind, e.message))
        .collect()
}

fn fixtures() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(fixtures_dir())
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    paths
}

#[test]
fn golden_descriptor_errors() {
    let fixtures = fixtures();
    assert!(!fixtures.is_empty(), "no fixtures found in {:?}", fixtures_dir());

    let schema = bundle_descriptor_schema();
    for fixture in fixtures {
        let content = fs::read_to_string(&fixture).unwrap();
        let document: Value = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("invalid fixture {:?}: {}", fixture, e));
        let actual = render(&validate(&document, &schema));

        let expected_path = fixture.with_extension("errors.txt");
        if update_golden() {
            fs::write(&expected_path, &actual).unwrap();
            continue;
        }

        let expected = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("missing expectation {:?}: {}", expected_path, e));
        assert_eq!(expected, actual, "fixture {:?}", fixture);
    }
}

#[test]
fn golden_valid_fixture_parses_into_typed_model() {
    let content = fs::read_to_string(fixtures_dir().join("valid_bundle.json")).unwrap();
    let document: Value = serde_json::from_str(&content).unwrap();
    let descriptor = bundlekit_schemas::BundleDescriptor::from_value(&document).unwrap();
    assert_eq!(descriptor.name, "orders-bundle");
    assert_eq!(descriptor.microfrontends.len(), 2);
}
