use crate::{
	Error, Result,
	db::Db,
	models::{Camera, Event, NewEvent},
};

/// Weighted document for an event: summary (A), object types (B), reasoning (C).
/// `$1` is the text search configuration.
const SEARCH_VECTOR_EXPR: &str = "\
setweight(to_tsvector($1::regconfig, COALESCE(summary, '')), 'A')
	|| setweight(to_tsvector($1::regconfig, COALESCE(object_types, '')), 'B')
	|| setweight(to_tsvector($1::regconfig, COALESCE(reasoning, '')), 'C')";

pub async fn insert_camera(db: &Db, camera_id: &str, name: &str) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO cameras (camera_id, name)
VALUES ($1, $2)
ON CONFLICT (camera_id) DO UPDATE SET name = EXCLUDED.name",
	)
	.bind(camera_id)
	.bind(name)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn get_camera(db: &Db, camera_id: &str) -> Result<Camera> {
	sqlx::query_as::<_, Camera>(
		"SELECT camera_id, name, created_at FROM cameras WHERE camera_id = $1",
	)
	.bind(camera_id)
	.fetch_optional(&db.pool)
	.await?
	.ok_or_else(|| Error::NotFound(format!("camera {camera_id}")))
}

pub async fn insert_event(db: &Db, event: &NewEvent) -> Result<i64> {
	let event_id: i64 = sqlx::query_scalar(
		"\
INSERT INTO events (
	camera_id,
	started_at,
	ended_at,
	risk_score,
	risk_level,
	summary,
	reasoning,
	reviewed,
	object_types,
	detection_ids
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
RETURNING event_id",
	)
	.bind(event.camera_id.as_str())
	.bind(event.started_at)
	.bind(event.ended_at)
	.bind(event.risk_score)
	.bind(event.risk_level.as_deref())
	.bind(event.summary.as_deref())
	.bind(event.reasoning.as_deref())
	.bind(event.reviewed)
	.bind(event.object_types.as_deref())
	.bind(event.detection_ids.as_deref())
	.fetch_one(&db.pool)
	.await?;

	Ok(event_id)
}

pub async fn get_event(db: &Db, event_id: i64) -> Result<Event> {
	sqlx::query_as::<_, Event>(
		"\
SELECT
	event_id,
	camera_id,
	started_at,
	ended_at,
	risk_score,
	risk_level,
	summary,
	reasoning,
	reviewed,
	object_types,
	detection_ids,
	search_vector IS NOT NULL AS indexed
FROM events
WHERE event_id = $1",
	)
	.bind(event_id)
	.fetch_optional(&db.pool)
	.await?
	.ok_or_else(|| Error::NotFound(format!("event {event_id}")))
}

/// Builds (or rebuilds) the search vector for one event.
pub async fn index_event(db: &Db, event_id: i64, text_search_config: &str) -> Result<()> {
	let sql = format!("UPDATE events SET search_vector = {SEARCH_VECTOR_EXPR} WHERE event_id = $2");
	let result =
		sqlx::query(&sql).bind(text_search_config).bind(event_id).execute(&db.pool).await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!("event {event_id}")));
	}

	Ok(())
}

/// Populates `search_vector` for every event that does not have one yet, `batch_size` rows at a
/// time. Returns the number of events indexed.
pub async fn backfill_search_vectors(
	db: &Db,
	text_search_config: &str,
	batch_size: u32,
) -> Result<u64> {
	if batch_size == 0 {
		return Err(Error::InvalidArgument("batch_size must be greater than zero.".to_string()));
	}

	let sql = format!(
		"\
UPDATE events
SET search_vector = {SEARCH_VECTOR_EXPR}
WHERE event_id IN (
	SELECT event_id
	FROM events
	WHERE search_vector IS NULL
	ORDER BY event_id
	LIMIT $2
)"
	);
	let mut total = 0_u64;

	loop {
		let indexed = sqlx::query(&sql)
			.bind(text_search_config)
			.bind(i64::from(batch_size))
			.execute(&db.pool)
			.await?
			.rows_affected();

		if indexed == 0 {
			break;
		}

		total += indexed;

		tracing::info!(indexed, total, "Backfilled event search vectors.");
	}

	Ok(total)
}
