use time::{Duration, OffsetDateTime};

use vigil_config::Postgres;
use vigil_storage::{Error, db::Db, models::NewEvent, queries};
use vigil_testkit::TestDatabase;

fn new_event(camera_id: &str, summary: &str) -> NewEvent {
	NewEvent {
		camera_id: camera_id.to_string(),
		started_at: OffsetDateTime::now_utc() - Duration::minutes(5),
		ended_at: None,
		risk_score: Some(40),
		risk_level: Some("medium".to_string()),
		summary: Some(summary.to_string()),
		reasoning: None,
		reviewed: false,
		object_types: Some("person".to_string()),
		detection_ids: Some("[1,2]".to_string()),
	}
}

async fn bootstrap(cfg: &Postgres) -> Db {
	let db = Db::connect(cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set VIGIL_PG_DSN to run."]
async fn db_connects_and_bootstraps_twice() {
	let Some(base_dsn) = vigil_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps_twice; set VIGIL_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db.postgres_config()).await;

	db.ensure_schema().await.expect("Schema bootstrap must be idempotent.");

	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name IN ('cameras', 'events')",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query schema tables.");

	assert_eq!(count, 2);

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set VIGIL_PG_DSN to run."]
async fn cameras_upsert_by_id() {
	let Some(base_dsn) = vigil_testkit::env_dsn() else {
		eprintln!("Skipping cameras_upsert_by_id; set VIGIL_PG_DSN to run this test.");

		return;
	};

	vigil_testkit::with_test_db(&base_dsn, |cfg| async move {
		let db = bootstrap(&cfg).await;

		queries::insert_camera(&db, "cam-1", "Garage").await.expect("Failed to insert camera.");

		let first = queries::get_camera(&db, "cam-1").await.expect("Failed to load camera.");

		queries::insert_camera(&db, "cam-1", "Garage Door").await.expect("Failed to rename camera.");

		let renamed = queries::get_camera(&db, "cam-1").await.expect("Failed to load camera.");

		assert_eq!(first.name, "Garage");
		assert_eq!(renamed.name, "Garage Door");
		assert_eq!(renamed.camera_id, "cam-1");
		assert_eq!(renamed.created_at, first.created_at);

		let err = queries::get_camera(&db, "cam-missing")
			.await
			.expect_err("Loading a missing camera must fail.");

		assert!(matches!(err, Error::NotFound(_)), "Unexpected error: {err}");

		db.pool.close().await;

		Ok(())
	})
	.await
	.expect("Test database lifecycle failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set VIGIL_PG_DSN to run."]
async fn inserted_events_start_unindexed_and_index_on_demand() {
	let Some(base_dsn) = vigil_testkit::env_dsn() else {
		eprintln!(
			"Skipping inserted_events_start_unindexed_and_index_on_demand; set VIGIL_PG_DSN to run."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db.postgres_config()).await;

	queries::insert_camera(&db, "cam-1", "Front Door").await.expect("Failed to insert camera.");

	let event_id = queries::insert_event(&db, &new_event("cam-1", "Person at the front door"))
		.await
		.expect("Failed to insert event.");
	let event = queries::get_event(&db, event_id).await.expect("Failed to load event.");

	assert!(!event.indexed);
	assert_eq!(event.detection_ids.as_deref(), Some("[1,2]"));

	queries::index_event(&db, event_id, "english").await.expect("Failed to index event.");

	let event = queries::get_event(&db, event_id).await.expect("Failed to load event.");

	assert!(event.indexed);

	let err = queries::index_event(&db, event_id + 1_000, "english")
		.await
		.expect_err("Indexing a missing event must fail.");

	assert!(matches!(err, Error::NotFound(_)), "Unexpected error: {err}");

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set VIGIL_PG_DSN to run."]
async fn backfill_indexes_every_missing_vector_in_batches() {
	let Some(base_dsn) = vigil_testkit::env_dsn() else {
		eprintln!(
			"Skipping backfill_indexes_every_missing_vector_in_batches; set VIGIL_PG_DSN to run."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db.postgres_config()).await;

	queries::insert_camera(&db, "cam-1", "Driveway").await.expect("Failed to insert camera.");

	for ordinal in 0..7 {
		queries::insert_event(&db, &new_event("cam-1", &format!("Vehicle pass {ordinal}")))
			.await
			.expect("Failed to insert event.");
	}

	let err = queries::backfill_search_vectors(&db, "english", 0)
		.await
		.expect_err("A zero batch size must be rejected.");

	assert!(matches!(err, Error::InvalidArgument(_)), "Unexpected error: {err}");

	let indexed = queries::backfill_search_vectors(&db, "english", 3)
		.await
		.expect("Failed to backfill search vectors.");

	assert_eq!(indexed, 7);

	let missing: i64 =
		sqlx::query_scalar("SELECT count(*) FROM events WHERE search_vector IS NULL")
			.fetch_one(&db.pool)
			.await
			.expect("Failed to count unindexed events.");

	assert_eq!(missing, 0);

	let indexed = queries::backfill_search_vectors(&db, "english", 3)
		.await
		.expect("Failed to rerun backfill.");

	assert_eq!(indexed, 0);

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
