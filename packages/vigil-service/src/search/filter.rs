use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;

use crate::search::SearchFilters;
use vigil_domain::like;

/// One structured constraint on the event set. Conditions are ANDed together.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterCondition {
	/// `started_at >= start` (inclusive).
	StartedAtOrAfter(OffsetDateTime),
	/// `started_at < end` (exclusive).
	StartedBefore(OffsetDateTime),
	CameraIn(Vec<String>),
	SeverityIn(Vec<String>),
	/// Escaped `ILIKE` contains-patterns; any one matching is enough.
	ObjectTypeMatchesAny(Vec<String>),
	Reviewed(bool),
}
impl FilterCondition {
	pub(crate) fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
		match self {
			Self::StartedAtOrAfter(start) => {
				builder.push("e.started_at >= ");
				builder.push_bind(*start);
			},
			Self::StartedBefore(end) => {
				builder.push("e.started_at < ");
				builder.push_bind(*end);
			},
			Self::CameraIn(camera_ids) => {
				builder.push("e.camera_id = ANY(");
				builder.push_bind(camera_ids.clone());
				builder.push(")");
			},
			Self::SeverityIn(levels) => {
				builder.push("e.risk_level = ANY(");
				builder.push_bind(levels.clone());
				builder.push(")");
			},
			Self::ObjectTypeMatchesAny(patterns) => {
				builder.push("(");

				for (idx, pattern) in patterns.iter().enumerate() {
					if idx > 0 {
						builder.push(" OR ");
					}

					builder.push("e.object_types ILIKE ");
					builder.push_bind(pattern.clone());
					builder.push(" ESCAPE '\\'");
				}

				builder.push(")");
			},
			Self::Reviewed(reviewed) => {
				builder.push("e.reviewed = ");
				builder.push_bind(*reviewed);
			},
		}
	}
}

/// Lowers caller filters into conditions, in a fixed order: start, end, cameras, severity,
/// object types, reviewed. Unset fields and empty sets emit nothing.
pub fn build_conditions(filters: &SearchFilters) -> Vec<FilterCondition> {
	let mut conditions = Vec::new();

	if let Some(start) = filters.start_date {
		conditions.push(FilterCondition::StartedAtOrAfter(start));
	}
	if let Some(end) = filters.end_date {
		conditions.push(FilterCondition::StartedBefore(end));
	}
	if !filters.camera_ids.is_empty() {
		conditions.push(FilterCondition::CameraIn(filters.camera_ids.iter().cloned().collect()));
	}
	if !filters.severity.is_empty() {
		conditions.push(FilterCondition::SeverityIn(filters.severity.iter().cloned().collect()));
	}

	let patterns: Vec<String> = filters
		.object_types
		.iter()
		.map(|object_type| object_type.trim())
		.filter(|object_type| !object_type.is_empty())
		.map(like::contains_pattern)
		.collect();

	if !patterns.is_empty() {
		conditions.push(FilterCondition::ObjectTypeMatchesAny(patterns));
	}
	if let Some(reviewed) = filters.reviewed {
		conditions.push(FilterCondition::Reviewed(reviewed));
	}

	conditions
}
