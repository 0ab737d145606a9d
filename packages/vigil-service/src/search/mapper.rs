use time::OffsetDateTime;

use crate::{Result, search::SearchResult};
use vigil_domain::detections;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EventSearchRow {
	pub(crate) event_id: i64,
	pub(crate) camera_id: String,
	pub(crate) camera_name: String,
	pub(crate) started_at: OffsetDateTime,
	pub(crate) ended_at: Option<OffsetDateTime>,
	pub(crate) risk_score: Option<i32>,
	pub(crate) risk_level: Option<String>,
	pub(crate) summary: Option<String>,
	pub(crate) reasoning: Option<String>,
	pub(crate) reviewed: bool,
	pub(crate) object_types: Option<String>,
	pub(crate) detection_ids: Option<String>,
	pub(crate) relevance_score: f64,
}

pub(crate) fn map_row(row: EventSearchRow) -> Result<SearchResult> {
	let detection_ids = detections::decode_detection_ids(row.detection_ids.as_deref())?;

	Ok(SearchResult {
		id: row.event_id,
		camera_id: row.camera_id,
		camera_name: row.camera_name,
		started_at: row.started_at,
		ended_at: row.ended_at,
		risk_score: row.risk_score,
		risk_level: row.risk_level,
		summary: row.summary,
		reasoning: row.reasoning,
		reviewed: row.reviewed,
		detection_count: detection_ids.len(),
		detection_ids,
		object_types: row.object_types,
		relevance_score: clamp_score(row.relevance_score),
	})
}

pub(crate) fn map_rows(rows: Vec<EventSearchRow>) -> Result<Vec<SearchResult>> {
	rows.into_iter().map(map_row).collect()
}

fn clamp_score(score: f64) -> f64 {
	if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 }
}
