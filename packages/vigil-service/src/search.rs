pub mod filter;
pub mod relevance;

mod mapper;

pub use filter::{FilterCondition, build_conditions};
pub use relevance::{RelevancePlan, TextMatch};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;

use crate::{Error, Result, VigilService, search::mapper::EventSearchRow};
use vigil_domain::query;

const EVENT_COLUMNS: &str = "\
SELECT
	e.event_id,
	e.camera_id,
	c.name AS camera_name,
	e.started_at,
	e.ended_at,
	e.risk_score,
	e.risk_level,
	e.summary,
	e.reasoning,
	e.reviewed,
	e.object_types,
	e.detection_ids,
	";
const EVENT_SOURCE: &str = " FROM events e JOIN cameras c ON c.camera_id = e.camera_id";

/// Structured constraints on a search. Unset fields and empty sets do not constrain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
	/// Inclusive lower bound on `started_at`.
	#[serde(default, with = "crate::time_serde::option")]
	pub start_date: Option<OffsetDateTime>,
	/// Exclusive upper bound on `started_at`.
	#[serde(default, with = "crate::time_serde::option")]
	pub end_date: Option<OffsetDateTime>,
	#[serde(default)]
	pub camera_ids: BTreeSet<String>,
	#[serde(default)]
	pub severity: BTreeSet<String>,
	/// Matched case-insensitively as substrings of the event's object types; any one suffices.
	#[serde(default)]
	pub object_types: BTreeSet<String>,
	#[serde(default)]
	pub reviewed: Option<bool>,
}
impl SearchFilters {
	pub fn with_start_date(mut self, start: OffsetDateTime) -> Self {
		self.start_date = Some(start);

		self
	}

	pub fn with_end_date(mut self, end: OffsetDateTime) -> Self {
		self.end_date = Some(end);

		self
	}

	pub fn with_camera(mut self, camera_id: impl Into<String>) -> Self {
		self.camera_ids.insert(camera_id.into());

		self
	}

	pub fn with_severity(mut self, level: impl Into<String>) -> Self {
		self.severity.insert(level.into());

		self
	}

	pub fn with_object_type(mut self, object_type: impl Into<String>) -> Self {
		self.object_types.insert(object_type.into());

		self
	}

	pub fn with_reviewed(mut self, reviewed: bool) -> Self {
		self.reviewed = Some(reviewed);

		self
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	pub id: i64,
	pub camera_id: String,
	pub camera_name: String,
	#[serde(with = "crate::time_serde")]
	pub started_at: OffsetDateTime,
	#[serde(with = "crate::time_serde::option")]
	pub ended_at: Option<OffsetDateTime>,
	pub risk_score: Option<i32>,
	pub risk_level: Option<String>,
	pub summary: Option<String>,
	pub reasoning: Option<String>,
	pub reviewed: bool,
	pub detection_count: usize,
	pub detection_ids: Vec<i64>,
	pub object_types: Option<String>,
	pub relevance_score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SearchResult>,
	pub total_count: u64,
	pub limit: u32,
	pub offset: u32,
}

impl VigilService {
	/// Runs a ranked, filtered, paginated search over events.
	///
	/// Query text never causes an error: unusable input simply yields no text condition and the
	/// results fall back to recency order. `total_count` covers the whole filtered set.
	pub async fn search(
		&self,
		query: &str,
		filters: &SearchFilters,
		limit: u32,
		offset: u32,
	) -> Result<SearchResponse> {
		let compiled = query::compile(query);
		let plan = RelevancePlan::new(&compiled, query, &self.cfg.search);
		let conditions = build_conditions(filters);

		tracing::debug!(
			match_mode = plan.mode().map(|mode| mode.as_str()),
			fragment_count = compiled.fragment_count(),
			has_predicate = !compiled.is_empty(),
			condition_count = conditions.len(),
			"Compiled event search."
		);

		let mut count_query = build_count_query(&plan, &conditions);
		let total: i64 = count_query.build_query_scalar().fetch_one(&self.db.pool).await?;
		let total_count = u64::try_from(total)
			.map_err(|_| Error::Storage { message: format!("Negative event count {total}.") })?;
		let results = if limit == 0 || u64::from(offset) >= total_count {
			Vec::new()
		} else {
			let mut page_query = build_page_query(&plan, &conditions, limit, offset);
			let rows: Vec<EventSearchRow> =
				page_query.build_query_as().fetch_all(&self.db.pool).await?;

			mapper::map_rows(rows)?
		};

		tracing::debug!(total_count, page_size = results.len(), limit, offset, "Event search done.");

		Ok(SearchResponse { results, total_count, limit, offset })
	}
}

fn push_where(
	builder: &mut QueryBuilder<'_, Postgres>,
	plan: &RelevancePlan,
	conditions: &[FilterCondition],
) {
	builder.push(" WHERE ");

	if !plan.push_condition(builder) {
		builder.push("TRUE");
	}

	for condition in conditions {
		builder.push(" AND ");
		condition.push_sql(builder);
	}
}

fn build_count_query(
	plan: &RelevancePlan,
	conditions: &[FilterCondition],
) -> QueryBuilder<'static, Postgres> {
	let mut builder = QueryBuilder::new("SELECT COUNT(*)");

	builder.push(EVENT_SOURCE);
	plan.push_from_extra(&mut builder);
	push_where(&mut builder, plan, conditions);

	builder
}

fn build_page_query(
	plan: &RelevancePlan,
	conditions: &[FilterCondition],
	limit: u32,
	offset: u32,
) -> QueryBuilder<'static, Postgres> {
	let mut builder = QueryBuilder::new(EVENT_COLUMNS);

	plan.push_score(&mut builder);
	builder.push(EVENT_SOURCE);
	plan.push_from_extra(&mut builder);
	push_where(&mut builder, plan, conditions);
	plan.push_order_by(&mut builder);
	builder.push(" LIMIT ");
	builder.push_bind(i64::from(limit));
	builder.push(" OFFSET ");
	builder.push_bind(i64::from(offset));

	builder
}

#[cfg(test)]
mod tests {
	use super::*;
	use vigil_config::Search;

	fn plan(raw: &str) -> RelevancePlan {
		RelevancePlan::new(&query::compile(raw), raw, &Search::default())
	}

	#[test]
	fn count_query_without_text_or_filters_scans_everything() {
		let builder = build_count_query(&plan(""), &[]);

		assert_eq!(
			builder.sql(),
			"SELECT COUNT(*) FROM events e JOIN cameras c ON c.camera_id = e.camera_id WHERE TRUE"
		);
	}

	#[test]
	fn count_and_page_share_the_same_where_clause() {
		let plan = plan("person OR vehicle");
		let conditions = build_conditions(&SearchFilters::default().with_reviewed(false));
		let count_sql = build_count_query(&plan, &conditions).sql().to_string();
		let page_sql = build_page_query(&plan, &conditions, 20, 0).sql().to_string();
		let count_where = &count_sql[count_sql.find(" WHERE").expect("count WHERE")..];
		let page_where = &page_sql[page_sql.find(" WHERE").expect("page WHERE")..];

		// Page parameters are shifted by the score's rank-scale bind.
		assert!(count_where.ends_with("e.reviewed = $6"), "count sql: {count_sql}");
		assert!(page_where.contains("e.reviewed = $7"), "page sql: {page_sql}");
		assert!(count_sql.contains("CROSS JOIN to_tsquery($1::regconfig, $2) AS q(tsq)"));
		assert!(page_sql.contains("CROSS JOIN to_tsquery($2::regconfig, $3) AS q(tsq)"));
	}

	#[test]
	fn page_query_orders_by_relevance_then_recency_with_text() {
		let sql = build_page_query(&plan("person"), &[], 10, 30).sql().to_string();

		assert!(
			sql.ends_with(
				" ORDER BY relevance_score DESC, e.started_at DESC, e.event_id DESC LIMIT $7 OFFSET $8"
			),
			"page sql: {sql}"
		);
	}

	#[test]
	fn page_query_orders_by_recency_without_text() {
		let sql = build_page_query(&plan("AND OR"), &[], 10, 0).sql().to_string();

		assert!(sql.contains("0.0::float8 AS relevance_score"), "page sql: {sql}");
		assert!(
			sql.ends_with(" ORDER BY e.started_at DESC, e.event_id DESC LIMIT $1 OFFSET $2"),
			"page sql: {sql}"
		);
	}

	#[test]
	fn filters_round_trip_through_json() {
		let filters: SearchFilters = serde_json::from_str(
			r#"{"start_date":"2024-01-01T00:00:00Z","camera_ids":["cam-1"],"reviewed":true}"#,
		)
		.expect("filters should parse");

		assert_eq!(filters.camera_ids.len(), 1);
		assert_eq!(filters.reviewed, Some(true));
		assert!(filters.end_date.is_none());
		assert!(filters.object_types.is_empty());
	}
}
