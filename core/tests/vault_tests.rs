use notegrep_core::{DocumentStore, EngineConfig, FsVault, SearchEngine, Vault};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn list_notes_finds_note_files_recursively() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("projects/deep")).unwrap();
    fs::write(dir.path().join("top.md"), "top note").unwrap();
    fs::write(dir.path().join("projects/plan.markdown"), "plan").unwrap();
    fs::write(dir.path().join("projects/deep/log.txt"), "log").unwrap();
    fs::write(dir.path().join("projects/image.png"), [0u8; 4]).unwrap();
    fs::write(dir.path().join("noext"), "skipped").unwrap();

    let vault = FsVault::new(dir.path());
    let ids = vault.list_notes().unwrap();
    assert_eq!(
        ids,
        vec![
            "projects/deep/log.txt".to_string(),
            "projects/plan.markdown".to_string(),
            "top.md".to_string(),
        ]
    );
}

#[test]
fn read_note_returns_content_tags_and_mtime() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("tagged.md"),
        "---\ntags: [alpha]\n---\nbody with #inline-tag words",
    )
    .unwrap();

    let vault = FsVault::new(dir.path());
    let note = vault.read_note("tagged.md").unwrap().unwrap();
    assert!(note.content.contains("#inline-tag"));
    assert_eq!(note.tags, vec!["alpha", "inline-tag"]);
    assert!(note.last_modified > 0);

    assert!(vault.read_note("missing.md").unwrap().is_none());
}

#[test]
fn engine_indexes_an_on_disk_vault() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("projects")).unwrap();
    fs::write(dir.path().join("rust.md"), "rust borrow checker notes").unwrap();
    fs::write(dir.path().join("projects/search.md"), "inverted index sketch").unwrap();

    let store = DocumentStore::temporary().unwrap();
    let vault: Arc<dyn Vault> = Arc::new(FsVault::new(dir.path()));
    let engine = SearchEngine::new(store, vault, EngineConfig::default());
    engine.index_all_files();
    engine.wait_for_pending();

    assert_eq!(engine.document_count(), 2);
    let results = engine.search("inverted", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "projects/search.md");
    assert_eq!(results[0].file_name, "search.md");

    // deleting the file on disk and notifying drops it from the index
    fs::remove_file(dir.path().join("projects/search.md")).unwrap();
    engine.on_file_deleted("projects/search.md");
    engine.wait_for_pending();
    assert!(engine.search("inverted", 10).is_empty());
    assert_eq!(engine.document_count(), 1);
}
