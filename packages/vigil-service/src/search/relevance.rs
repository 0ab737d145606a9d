use sqlx::{Postgres, QueryBuilder};

use vigil_config::Search;
use vigil_domain::{
	like,
	query::{CompiledPredicate, MatchMode},
};

/// Columns searched literally when an event has no search vector yet.
const FALLBACK_COLUMNS: [&str; 3] = ["e.summary", "e.reasoning", "e.object_types"];

/// The text side of a search: how to build the `tsquery`, and how to match rows that have no
/// search vector yet.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMatch {
	pub mode: MatchMode,
	/// The compiled predicate for `ExplicitBoolean`, the raw query for `ImplicitText`.
	pub tsquery_input: String,
	/// Escaped contains-pattern over the trimmed raw query.
	pub fallback_pattern: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelevancePlan {
	text: Option<TextMatch>,
	text_search_config: String,
	rank_scale: f64,
}
impl RelevancePlan {
	pub fn new(compiled: &CompiledPredicate, raw_query: &str, cfg: &Search) -> Self {
		let text = (!compiled.is_empty()).then(|| {
			let mode = compiled.mode();
			let tsquery_input = match mode {
				MatchMode::ExplicitBoolean => compiled.as_str().to_string(),
				MatchMode::ImplicitText => raw_query.to_string(),
			};
			let fallback_pattern = like::contains_pattern(raw_query.trim());

			TextMatch { mode, tsquery_input, fallback_pattern }
		});

		Self {
			text,
			text_search_config: cfg.text_search_config.clone(),
			rank_scale: cfg.rank_scale,
		}
	}

	pub fn text(&self) -> Option<&TextMatch> {
		self.text.as_ref()
	}

	pub fn mode(&self) -> Option<MatchMode> {
		self.text.as_ref().map(|text| text.mode)
	}

	/// Joins the parsed `tsquery` once as `q.tsq` so the rank and the match share it.
	pub(crate) fn push_from_extra(&self, builder: &mut QueryBuilder<'_, Postgres>) {
		let Some(text) = &self.text else { return };
		let function = match text.mode {
			MatchMode::ExplicitBoolean => "to_tsquery",
			MatchMode::ImplicitText => "websearch_to_tsquery",
		};

		builder.push(" CROSS JOIN ");
		builder.push(function);
		builder.push("(");
		builder.push_bind(self.text_search_config.clone());
		builder.push("::regconfig, ");
		builder.push_bind(text.tsquery_input.clone());
		builder.push(") AS q(tsq)");
	}

	/// Emits the relevance column, always in [0, 1].
	pub(crate) fn push_score(&self, builder: &mut QueryBuilder<'_, Postgres>) {
		if self.text.is_none() {
			builder.push("0.0::float8 AS relevance_score");

			return;
		}

		builder.push("LEAST(COALESCE(ts_rank(e.search_vector, q.tsq), 0)::float8 * ");
		builder.push_bind(self.rank_scale);
		builder.push(", 1.0::float8) AS relevance_score");
	}

	/// Emits the text condition, or nothing when the query carried no terms. Returns whether a
	/// condition was written.
	pub(crate) fn push_condition(&self, builder: &mut QueryBuilder<'_, Postgres>) -> bool {
		let Some(text) = &self.text else { return false };

		builder.push("(e.search_vector @@ q.tsq OR (e.search_vector IS NULL AND (");

		for (idx, column) in FALLBACK_COLUMNS.into_iter().enumerate() {
			if idx > 0 {
				builder.push(" OR ");
			}

			builder.push(column);
			builder.push(" ILIKE ");
			builder.push_bind(text.fallback_pattern.clone());
			builder.push(" ESCAPE '\\'");
		}

		builder.push(")))");

		true
	}

	pub(crate) fn push_order_by(&self, builder: &mut QueryBuilder<'_, Postgres>) {
		if self.text.is_some() {
			builder.push(" ORDER BY relevance_score DESC, e.started_at DESC, e.event_id DESC");
		} else {
			builder.push(" ORDER BY e.started_at DESC, e.event_id DESC");
		}
	}
}
