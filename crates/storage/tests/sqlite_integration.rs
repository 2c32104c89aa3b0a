use storage::repository::{ClientStorageRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_items() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_client_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set_item("token", "demo-token").await.unwrap();
    assert_eq!(
        repo.get_item("token").await.unwrap().as_deref(),
        Some("demo-token")
    );

    repo.set_item("token", "rotated").await.unwrap();
    assert_eq!(
        repo.get_item("token").await.unwrap().as_deref(),
        Some("rotated")
    );
}

#[tokio::test]
async fn sqlite_remove_clears_item() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_client_remove?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set_item("token", "demo-token").await.unwrap();
    repo.remove_item("token").await.unwrap();
    repo.remove_item("token").await.unwrap();
    assert!(repo.get_item("token").await.unwrap().is_none());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_client_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn storage_sqlite_wires_client_repository() {
    let storage = Storage::sqlite("sqlite:file:memdb_client_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.client.set_item("theme", "high-contrast").await.unwrap();
    assert_eq!(
        storage.client.get_item("theme").await.unwrap().as_deref(),
        Some("high-contrast")
    );
}
