use sagaspells::model::{SpellbookDraft, SpellbookPatch};
use sagaspells::store::backend::StorageBackend;
use sagaspells::store::fs::FileStore;
use sagaspells::store::fs_backend::FsBackend;
use sagaspells::store::CollectionStore;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const KEY: &str = "saga-spellbooks";

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

#[test]
fn test_fs_backend_slot_io() {
    let (_dir, backend) = setup();

    assert_eq!(backend.load_slot(KEY).unwrap(), None);

    backend.save_slot(KEY, "[]").unwrap();
    assert_eq!(backend.load_slot(KEY).unwrap(), Some("[]".to_string()));

    backend.save_slot(KEY, "[1]").unwrap();
    assert_eq!(backend.load_slot(KEY).unwrap(), Some("[1]".to_string()));
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();
    backend.save_slot(KEY, "[]").unwrap();

    let expected_path = dir.path().join("saga-spellbooks.json");
    assert_eq!(backend.slot_path(KEY), expected_path);
    assert_eq!(fs::read_to_string(&expected_path).unwrap(), "[]");

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_persisted_layout() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new_fs(dir.path().to_path_buf(), KEY);
    let book = store
        .create(SpellbookDraft::new("Test", "Mage").with_description("fire"))
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("saga-spellbooks.json")).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    let record = &json[0];

    assert_eq!(record["id"], book.id.as_str());
    assert_eq!(record["name"], "Test");
    assert_eq!(record["character"], "Mage");
    assert_eq!(record["description"], "fire");
    assert!(record["spells"].as_array().unwrap().is_empty());

    let created = record["createdAt"].as_str().unwrap();
    assert!(created.ends_with('Z'), "not UTC: {}", created);
    assert_eq!(created.len(), "2024-01-01T00:00:00.000Z".len());
    assert_eq!(record["createdAt"], record["updatedAt"]);
}

#[test]
fn test_externally_edited_file_is_repaired_on_load() {
    let dir = TempDir::new().unwrap();
    let edited = r#"[{
        "id": "b1",
        "name": "Edited",
        "character": "Mage",
        "description": "",
        "spells": [
            {"spellName": "Zap", "spellClass": "A", "school": "B", "complexity": 1, "flare": 0,
             "range": "", "target": "", "action": "", "duration": "", "check": "", "skill": "",
             "focus": "", "spellType": "", "keywords": null, "description": null, "altDescription": null},
            {"spellName": "Acid", "spellClass": "A", "school": "B", "complexity": "2", "flare": null,
             "range": "", "target": "", "action": "", "duration": "", "check": "", "skill": "",
             "focus": "", "spellType": "", "keywords": null, "description": null, "altDescription": null}
        ],
        "createdAt": "2024-05-01T12:00:00.000Z",
        "updatedAt": "2024-04-01T12:00:00.000Z"
    }]"#;
    fs::write(dir.path().join("saga-spellbooks.json"), edited).unwrap();

    let mut store = FileStore::new_fs(dir.path().to_path_buf(), KEY);
    let book = store.get("b1").unwrap().unwrap();
    assert_eq!(book.spell_names(), vec!["Acid", "Zap"]);
    assert_eq!(book.spells[0].complexity, 2);
    assert_eq!(book.updated_at, book.created_at);

    // The next write persists the repaired record.
    store
        .update("b1", SpellbookPatch::default().name("Fixed"))
        .unwrap();
    let reopened = FileStore::new_fs(dir.path().to_path_buf(), KEY);
    let book = reopened.get("b1").unwrap().unwrap();
    assert_eq!(book.name, "Fixed");
    assert_eq!(book.spell_names(), vec!["Acid", "Zap"]);
    assert!(book.updated_at > book.created_at);
}

#[test]
fn test_round_trip_preserves_collection() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new_fs(dir.path().to_path_buf(), KEY);
    for name in ["One", "Two", "Three"] {
        store.create(SpellbookDraft::new(name, "Mage")).unwrap();
    }
    let expected = store.list().unwrap();

    let reopened = FileStore::new_fs(dir.path().to_path_buf(), KEY);
    assert_eq!(reopened.list().unwrap(), expected);
}
