mod helpers;

use helpers::{seed, test_store};
use notemind::notes::NoteError;

#[tokio::test]
async fn insert_list_delete_round_trip() {
    let store = test_store();
    let existing = seed(&store, &["older note"]).await;

    let id = store.insert("round trip".to_string()).await.unwrap();
    assert!(!existing.contains(&id), "id must be previously unused");

    let notes = store.list().await.unwrap();
    let inserted = notes.iter().find(|n| n.id == id).expect("inserted note listed");
    assert_eq!(inserted.content, "round trip");

    store.delete(id).await.unwrap();
    let notes = store.list().await.unwrap();
    assert!(notes.iter().all(|n| n.id != id));
    assert_eq!(notes.len(), 1);

    let err = store.delete(id).await.unwrap_err();
    assert!(matches!(err, NoteError::NotFound(missing) if missing == id));
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let store = test_store();
    let ids = seed(&store, &["buy milk", "finish report", "call mom"]).await;

    let listed: Vec<(i64, String)> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|n| (n.id, n.content))
        .collect();

    assert_eq!(
        listed,
        vec![
            (ids[0], "buy milk".to_string()),
            (ids[1], "finish report".to_string()),
            (ids[2], "call mom".to_string()),
        ]
    );
}

#[tokio::test]
async fn edit_keeps_id_and_replaces_content() {
    let store = test_store();
    let ids = seed(&store, &["draft"]).await;

    let note = store.update(ids[0], "final".to_string()).await.unwrap();
    assert_eq!(note.id, ids[0]);
    assert_eq!(store.get(ids[0]).await.unwrap().content, "final");

    let err = store.update(ids[0] + 100, "nope".to_string()).await.unwrap_err();
    assert!(matches!(err, NoteError::NotFound(_)));
}

#[tokio::test]
async fn blank_content_is_rejected() {
    let store = test_store();
    let err = store.insert("  ".to_string()).await.unwrap_err();
    assert!(matches!(err, NoteError::InvalidInput(_)));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn store_handle_is_shared_between_clones() {
    let store = test_store();
    let other = store.clone();
    seed(&store, &["visible everywhere"]).await;
    assert_eq!(other.count().await.unwrap(), 1);
}
