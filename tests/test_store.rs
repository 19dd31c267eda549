// tests/test_store.rs
// Store-level coverage for paths the HTTP walk cannot reach directly,
// in particular the optimistic-concurrency branches.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use organizador::db;
use organizador::tasks::{CreateTaskRequest, TaskStatus, TaskStore, UpdateOutcome, UpdateTaskRequest};

async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("create in-memory sqlite");
    db::run_migrations(&pool).await.expect("apply schema");
    pool
}

fn due(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn new_task(title: &str, due_date: DateTime<Utc>, status: TaskStatus) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: None,
        due_date,
        status,
    }
}

#[tokio::test]
async fn test_create_then_get_roundtrip() {
    let store = TaskStore::new(create_test_pool().await, true);

    let created = store
        .create(CreateTaskRequest {
            title: "Pay rent".to_string(),
            description: Some("before the 5th".to_string()),
            due_date: due(2024, 7, 5, 10),
            status: TaskStatus::Pending,
        })
        .await
        .unwrap();

    let fetched = store.get(created.id).await.unwrap().expect("task exists");
    assert_eq!(fetched, created);
    assert_eq!(fetched.description.as_deref(), Some("before the 5th"));

    assert!(store.get(created.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_stale_version_write_resolves_to_conflict() {
    let store = TaskStore::new(create_test_pool().await, true);

    let created = store
        .create(new_task("Race me", due(2024, 7, 5, 10), TaskStatus::Pending))
        .await
        .unwrap();

    let overwrite = UpdateTaskRequest {
        id: created.id,
        title: "Lost the race".to_string(),
        description: None,
        due_date: created.due_date,
        status: TaskStatus::Completed,
    };

    // A write carrying a stale token while the row survives is a conflict
    let outcome = store
        .update_at_version(created.id, 999, overwrite)
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Conflict);

    // And the row is untouched
    let current = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(current.title, "Race me");
    assert_eq!(current.status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_stale_write_against_deleted_row_is_not_found() {
    let store = TaskStore::new(create_test_pool().await, true);

    let created = store
        .create(new_task("Short-lived", due(2024, 7, 5, 10), TaskStatus::Pending))
        .await
        .unwrap();
    assert!(store.delete(created.id).await.unwrap());

    let overwrite = UpdateTaskRequest {
        id: created.id,
        title: "Too late".to_string(),
        description: None,
        due_date: created.due_date,
        status: TaskStatus::Completed,
    };

    let outcome = store
        .update_at_version(created.id, 1, overwrite.clone())
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::NotFound);

    let outcome = store.update(created.id, overwrite).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::NotFound);
}

#[tokio::test]
async fn test_sequential_updates_both_succeed() {
    let store = TaskStore::new(create_test_pool().await, true);

    let created = store
        .create(new_task("Twice", due(2024, 7, 5, 10), TaskStatus::Pending))
        .await
        .unwrap();

    for title in ["First pass", "Second pass"] {
        let outcome = store
            .update(
                created.id,
                UpdateTaskRequest {
                    id: created.id,
                    title: title.to_string(),
                    description: None,
                    due_date: created.due_date,
                    status: TaskStatus::Pending,
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);
    }

    let current = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(current.title, "Second pass");
}

#[tokio::test]
async fn test_title_search_collation_modes() {
    let pool = create_test_pool().await;
    let insensitive = TaskStore::new(pool.clone(), true);
    let sensitive = TaskStore::new(pool, false);

    insensitive
        .create(new_task("BUY MILK", due(2024, 7, 5, 10), TaskStatus::Pending))
        .await
        .unwrap();

    let hits = insensitive.search_by_title("milk").await.unwrap();
    assert_eq!(hits.len(), 1);

    let hits = sensitive.search_by_title("milk").await.unwrap();
    assert!(hits.is_empty());

    let hits = sensitive.search_by_title("MILK").await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_date_search_matches_calendar_date() {
    let store = TaskStore::new(create_test_pool().await, true);

    store
        .create(new_task("Morning", due(2024, 5, 1, 0), TaskStatus::Pending))
        .await
        .unwrap();
    store
        .create(new_task("Night", due(2024, 5, 1, 23), TaskStatus::Completed))
        .await
        .unwrap();
    store
        .create(new_task("Next day", due(2024, 5, 2, 0), TaskStatus::Pending))
        .await
        .unwrap();

    let first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let hits = store.search_by_date(first).await.unwrap();
    assert_eq!(hits.len(), 2);

    let empty = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    assert!(store.search_by_date(empty).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_filter_by_status_partitions_rows() {
    let store = TaskStore::new(create_test_pool().await, true);

    store
        .create(new_task("a", due(2024, 5, 1, 1), TaskStatus::Pending))
        .await
        .unwrap();
    store
        .create(new_task("b", due(2024, 5, 1, 2), TaskStatus::Completed))
        .await
        .unwrap();
    store
        .create(new_task("c", due(2024, 5, 1, 3), TaskStatus::Completed))
        .await
        .unwrap();

    let pending = store.filter_by_status(TaskStatus::Pending).await.unwrap();
    let completed = store.filter_by_status(TaskStatus::Completed).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(completed.len(), 2);
    assert!(completed.iter().all(|t| t.status == TaskStatus::Completed));
}

#[tokio::test]
async fn test_delete_twice() {
    let store = TaskStore::new(create_test_pool().await, true);

    let created = store
        .create(new_task("Gone soon", due(2024, 5, 1, 1), TaskStatus::Pending))
        .await
        .unwrap();

    assert!(store.delete(created.id).await.unwrap());
    assert!(!store.delete(created.id).await.unwrap());
    assert!(!store.exists(created.id).await.unwrap());
}
