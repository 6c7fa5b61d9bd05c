//! Progress store tests - best scores, unlocks, and persistence

use crush::core::{Level, LevelCatalog};
use crush::progress::{JsonFileBackend, MemoryBackend, ProgressBackend, ProgressStore};

fn small_catalog() -> LevelCatalog {
    LevelCatalog::new(vec![
        Level::new(1, 50, 20, 50, 100, 150),
        Level::new(2, 100, 18, 100, 200, 300),
        Level::new(3, 200, 15, 200, 400, 600),
    ])
    .unwrap()
}

#[test]
fn test_best_score_never_decreases() {
    let mut store = ProgressStore::new(small_catalog(), MemoryBackend::new());

    let first = store.complete_level(1, 100).unwrap();
    assert!(first.is_new_high_score);
    assert_eq!(first.stars, 2);
    let writes_after_first = store.backend().write_count();

    let second = store.complete_level(1, 80).unwrap();
    assert!(!second.is_new_high_score);
    assert!(!second.unlocked_new_level);
    assert_eq!(second.stars, 1);

    let p = store.progress_for(1).unwrap();
    assert_eq!(p.best_score, 100);
    assert_eq!(p.stars, 2);
    assert_eq!(store.backend().write_count(), writes_after_first);
}

#[test]
fn test_stars_follow_best_result() {
    let mut store = ProgressStore::new(small_catalog(), MemoryBackend::new());
    store.complete_level(1, 60).unwrap();
    store.complete_level(1, 160).unwrap();

    let p = store.progress_for(1).unwrap();
    assert_eq!(p.stars, 3);
    assert_eq!(p.best_score, 160);
    assert_eq!(store.total_stars(), 3);
}

#[test]
fn test_unlock_chain() {
    let mut store = ProgressStore::new(small_catalog(), MemoryBackend::new());
    assert_eq!(store.unlocked_count(), 1);

    assert!(store.complete_level(1, 50).unwrap().unlocked_new_level);
    assert!(store.complete_level(2, 100).unwrap().unlocked_new_level);
    assert!(!store.complete_level(3, 200).unwrap().unlocked_new_level);

    assert_eq!(store.unlocked_count(), 3);
    assert_eq!(store.completed_count(), 3);

    // Replaying an already-unlocked predecessor unlocks nothing new.
    assert!(!store.complete_level(1, 150).unwrap().unlocked_new_level);
}

#[test]
fn test_accessors_are_snapshots_until_reload() {
    let mut backend = MemoryBackend::new();
    backend.put_bool("level_2_unlocked", true).unwrap();
    let mut store = ProgressStore::new(small_catalog(), backend);
    assert_eq!(store.unlocked_count(), 2);

    store.reset_progress().unwrap();
    assert_eq!(store.unlocked_count(), 1);
    assert_eq!(store.all_progress().len(), 3);
}

#[test]
fn test_progress_persists_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");

    {
        let backend = JsonFileBackend::open(&path).unwrap();
        let mut store = ProgressStore::with_standard_levels(backend);
        store.complete_level(1, 850).unwrap();
    }

    let store = ProgressStore::with_standard_levels(JsonFileBackend::open(&path).unwrap());
    let level1 = store.progress_for(1).unwrap();
    assert_eq!(level1.best_score, 850);
    assert_eq!(level1.stars, 2);
    assert!(store.progress_for(2).unwrap().is_unlocked);
    assert!(!store.progress_for(3).unwrap().is_unlocked);

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw["level_1_score"], 850);
    assert_eq!(raw["level_1_stars"], 2);
    assert_eq!(raw["level_2_unlocked"], true);
}

#[test]
fn test_reset_clears_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");

    let mut store = ProgressStore::with_standard_levels(JsonFileBackend::open(&path).unwrap());
    store.complete_level(1, 1200).unwrap();
    store.reset_progress().unwrap();

    let reopened = ProgressStore::with_standard_levels(JsonFileBackend::open(&path).unwrap());
    assert_eq!(reopened.total_stars(), 0);
    assert_eq!(reopened.unlocked_count(), 1);
}
