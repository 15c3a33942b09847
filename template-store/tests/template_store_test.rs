//! Integration tests for [`template_store::JsonTemplateStore`].
//!
//! Covers load from a missing file, upsert/get, overwrite semantics, insertion order,
//! reload from disk, validation, and persistence failure or timeout leaving the store unchanged.

use std::time::Duration;

use repost_core::RepostError;
use template_store::{JsonTemplateStore, SeriesTemplate, TemplateStore};

/// **Test: A fresh store with no file lists no names.**
///
/// **Setup:** Temp dir without a template file.
/// **Action:** `JsonTemplateStore::load`, then `list_names()`.
/// **Expected:** Empty list; no file is created by loading.
#[tokio::test]
async fn test_load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.json");

    let store = JsonTemplateStore::load(&path).await.unwrap();

    assert!(store.list_names().await.is_empty());
    assert!(!path.exists());
}

/// **Test: get after upsert returns exactly what was stored.**
#[tokio::test]
async fn test_upsert_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonTemplateStore::load(dir.path().join("templates.json"))
        .await
        .unwrap();

    store
        .upsert(SeriesTemplate::new(
            "MySeries",
            "Episode {episode} out now",
            "Backup {episode}",
        ))
        .await
        .unwrap();

    let t = store.get("MySeries").await.unwrap();
    assert_eq!(t.release, "Episode {episode} out now");
    assert_eq!(t.reserve, "Backup {episode}");
}

/// **Test: Names are case-sensitive and unknown names are NotFound.**
#[tokio::test]
async fn test_get_unknown_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonTemplateStore::load(dir.path().join("templates.json"))
        .await
        .unwrap();
    store
        .upsert(SeriesTemplate::new("Show", "r", "v"))
        .await
        .unwrap();

    match store.get("show").await {
        Err(RepostError::NotFound(name)) => assert_eq!(name, "show"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

/// **Test: A second upsert with the same name replaces the entry entirely, in place.**
///
/// **Expected:** New patterns returned; name list keeps original position and has no duplicate.
#[tokio::test]
async fn test_upsert_overwrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonTemplateStore::load(dir.path().join("templates.json"))
        .await
        .unwrap();

    store.upsert(SeriesTemplate::new("A", "a1", "a2")).await.unwrap();
    store.upsert(SeriesTemplate::new("B", "b1", "b2")).await.unwrap();
    store.upsert(SeriesTemplate::new("A", "new1", "new2")).await.unwrap();

    assert_eq!(store.list_names().await, vec!["A", "B"]);
    assert_eq!(
        store.get("A").await.unwrap(),
        SeriesTemplate::new("A", "new1", "new2")
    );
}

/// **Test: Upserts are durable and reload in insertion order.**
#[tokio::test]
async fn test_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.json");
    {
        let store = JsonTemplateStore::load(&path).await.unwrap();
        store.upsert(SeriesTemplate::new("Second", "s {episode}", "s")).await.unwrap();
        store.upsert(SeriesTemplate::new("First", "f", "f {episode}")).await.unwrap();
    }

    let reloaded = JsonTemplateStore::load(&path).await.unwrap();
    assert_eq!(reloaded.list_names().await, vec!["Second", "First"]);
    assert_eq!(reloaded.get("First").await.unwrap().reserve, "f {episode}");

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["Second"]["release"], "s {episode}");
}

/// **Test: Empty name or patterns are rejected without touching the store.**
#[tokio::test]
async fn test_upsert_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.json");
    let store = JsonTemplateStore::load(&path).await.unwrap();

    assert!(matches!(
        store.upsert(SeriesTemplate::new("  ", "r", "v")).await,
        Err(RepostError::Validation(_))
    ));
    assert!(matches!(
        store.upsert(SeriesTemplate::new("N", "", "v")).await,
        Err(RepostError::Validation(_))
    ));
    assert!(store.list_names().await.is_empty());
    assert!(!path.exists());
}

/// **Test: A failed write is reported as PersistenceError and the in-memory store is unchanged.**
///
/// **Setup:** After loading, a regular file is put where the store's directory should be.
#[tokio::test]
async fn test_persistence_failure_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonTemplateStore::load(dir.path().join("data").join("templates.json"))
        .await
        .unwrap();
    std::fs::write(dir.path().join("data"), "x").unwrap();

    let result = store.upsert(SeriesTemplate::new("A", "r", "v")).await;

    assert!(matches!(result, Err(RepostError::Persistence(_))));
    assert!(store.list_names().await.is_empty());
    assert!(matches!(store.get("A").await, Err(RepostError::NotFound(_))));
}

/// **Test: A write that outlasts the persist timeout is a PersistenceError.**
///
/// **Setup:** File holding template "A"; store loaded with a zero persist timeout.
/// **Action:** `upsert("B")`.
/// **Expected:** Timed-out PersistenceError; "B" is neither in memory nor in the file.
#[tokio::test]
async fn test_persist_timeout_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.json");
    let seed = r#"{"A": {"release": "r", "reserve": "v"}}"#;
    std::fs::write(&path, seed).unwrap();
    let store = JsonTemplateStore::load(&path)
        .await
        .unwrap()
        .with_persist_timeout(Duration::ZERO);

    let result = store.upsert(SeriesTemplate::new("B", "r2", "v2")).await;

    match result {
        Err(RepostError::Persistence(reason)) => assert!(reason.contains("timed out"), "{}", reason),
        other => panic!("expected a persistence timeout, got {:?}", other),
    }
    assert_eq!(store.list_names().await, vec!["A"]);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), seed);
}
