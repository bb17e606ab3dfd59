use sleuth_core::model::BuildDebugMap;
use sleuth_core::store::{get_json, keys, put_json, ArtifactStore, JsonFileStore, MemoryStore, StoreError};
use tempfile::tempdir;

#[test]
fn file_store_round_trips_typed_artifacts() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("artifacts"));

    let mut map = BuildDebugMap::new();
    map.insert("20180201000000".to_string(), "XUL1".to_string());
    map.insert("20180202000000".to_string(), "XUL2".to_string());

    put_json(&store, keys::DEBUG_IDS, &map).expect("put");
    let loaded: BuildDebugMap =
        get_json(&store, keys::DEBUG_IDS).expect("get").expect("artifact present");
    assert_eq!(loaded, map);

    // The artifact lands as a JSON file named after its key.
    let path = store.artifact_path(keys::DEBUG_IDS);
    assert!(path.is_file(), "expected {}", path.display());
    assert!(path.file_name().and_then(|n| n.to_str()) == Some("debug_ids.json"));
}

#[test]
fn missing_keys_read_as_none() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("artifacts"));

    let loaded: Option<Vec<String>> = get_json(&store, keys::CANDIDATES).expect("get");
    assert_eq!(loaded, None);
}

#[test]
fn corrupt_payloads_surface_as_json_errors() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf());
    store.put(keys::BAD_SYMBOLS, "not json at all").expect("put");

    let err = get_json::<Vec<String>>(&store, keys::BAD_SYMBOLS).expect_err("must fail");
    assert!(matches!(err, StoreError::Json(_)), "err = {err:?}");
}

#[test]
fn memory_store_round_trips_and_overwrites() {
    let store = MemoryStore::new();

    put_json(&store, keys::CANDIDATES, &vec!["mozilla::Foo".to_string()]).expect("put");
    put_json(&store, keys::CANDIDATES, &vec!["mozilla::Bar".to_string()]).expect("put again");

    let loaded: Vec<String> =
        get_json(&store, keys::CANDIDATES).expect("get").expect("artifact present");
    assert_eq!(loaded, vec!["mozilla::Bar".to_string()]);
    assert_eq!(store.get("absent").expect("get"), None);
}
