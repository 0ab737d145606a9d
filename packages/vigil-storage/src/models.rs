use time::OffsetDateTime;

#[derive(Debug, sqlx::FromRow)]
pub struct Camera {
	pub camera_id: String,
	pub name: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct Event {
	pub event_id: i64,
	pub camera_id: String,
	pub started_at: OffsetDateTime,
	pub ended_at: Option<OffsetDateTime>,
	pub risk_score: Option<i32>,
	pub risk_level: Option<String>,
	pub summary: Option<String>,
	pub reasoning: Option<String>,
	pub reviewed: bool,
	pub object_types: Option<String>,
	/// JSON array of ids, or a legacy comma-separated list.
	pub detection_ids: Option<String>,
	/// Whether the row has a populated `search_vector`.
	pub indexed: bool,
}

/// Columns written when an event is first recorded. The search index starts empty.
#[derive(Debug, Clone)]
pub struct NewEvent {
	pub camera_id: String,
	pub started_at: OffsetDateTime,
	pub ended_at: Option<OffsetDateTime>,
	pub risk_score: Option<i32>,
	pub risk_level: Option<String>,
	pub summary: Option<String>,
	pub reasoning: Option<String>,
	pub reviewed: bool,
	pub object_types: Option<String>,
	pub detection_ids: Option<String>,
}
