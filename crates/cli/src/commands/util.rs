use std::path::Path;

use sleuth_core::store::JsonFileStore;

/// Helper to print whether a directory exists.
pub fn print_dir_status(label: &str, path: &Path) {
    let exists = path.is_dir();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}

/// Helper to print whether a persisted artifact exists.
pub fn print_artifact_status(store: &JsonFileStore, key: &str) {
    let path = store.artifact_path(key);
    let exists = path.is_file();
    println!("- {key}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}
