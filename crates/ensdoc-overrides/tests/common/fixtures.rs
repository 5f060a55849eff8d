//! Override fixture helpers

use std::path::PathBuf;

/// Path to a file under `test_fixtures/overrides/`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures/overrides")
        .join(name)
}

/// Read an override source fixture
pub fn load_override_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}
