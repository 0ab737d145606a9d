//! Compiles free-text event queries into PostgreSQL `tsquery` predicates.
//!
//! The pipeline is tokenize (phrase extraction), translate (boolean operators), then
//! assemble (join fragments). Every stage is total: malformed input degrades to a smaller
//! predicate, never an error.

mod assemble;
mod tokenize;
mod translate;

pub use assemble::assemble;
pub use tokenize::{TokenizedQuery, tokenize};
pub use translate::{Fragment, translate};

/// How the backend should interpret the text side of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
	/// The predicate carries explicit operators and is handed to `to_tsquery` as-is.
	ExplicitBoolean,
	/// The predicate is a bare term; the raw query goes to `websearch_to_tsquery`.
	ImplicitText,
}
impl MatchMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::ExplicitBoolean => "explicit_boolean",
			Self::ImplicitText => "implicit_text",
		}
	}

	fn detect(predicate: &str) -> Self {
		let explicit = predicate.contains("<->")
			|| predicate.chars().any(|ch| matches!(ch, '&' | '|' | '!'));

		if explicit { Self::ExplicitBoolean } else { Self::ImplicitText }
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledPredicate {
	predicate: String,
	fragment_count: usize,
	mode: MatchMode,
}
impl CompiledPredicate {
	/// True when the query produced no usable terms and must not constrain text.
	pub fn is_empty(&self) -> bool {
		self.predicate.is_empty()
	}

	pub fn as_str(&self) -> &str {
		self.predicate.as_str()
	}

	pub fn fragment_count(&self) -> usize {
		self.fragment_count
	}

	pub fn mode(&self) -> MatchMode {
		self.mode
	}
}

pub fn compile(raw: &str) -> CompiledPredicate {
	let tokenized = tokenize(raw);
	let fragments = translate(&tokenized);
	let predicate = assemble(&fragments);
	let mode = MatchMode::detect(&predicate);

	CompiledPredicate { predicate, fragment_count: fragments.len(), mode }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_and_degenerate_queries_compile_to_nothing() {
		for raw in ["", "   ", "NOT", "OR", "AND OR NOT", "!!! ???", r#""""#] {
			let compiled = compile(raw);

			assert!(compiled.is_empty(), "expected empty predicate for {raw:?}");
			assert_eq!(compiled.fragment_count(), 0);
		}
	}

	#[test]
	fn single_bare_word_uses_implicit_text_mode() {
		let compiled = compile("person");

		assert_eq!(compiled.as_str(), "person");
		assert_eq!(compiled.mode(), MatchMode::ImplicitText);
	}

	#[test]
	fn operators_select_explicit_boolean_mode() {
		for (raw, expected) in [
			("a b", "a & b"),
			("a AND b", "a & b"),
			("a OR b", "a | b"),
			("NOT cat", "!cat"),
			(r#""front door""#, "(front <-> door)"),
		] {
			let compiled = compile(raw);

			assert_eq!(compiled.as_str(), expected, "raw query {raw:?}");
			assert_eq!(compiled.mode(), MatchMode::ExplicitBoolean, "raw query {raw:?}");
		}
	}

	#[test]
	fn mixed_query_compiles_with_grouped_or() {
		let compiled = compile(r#""front door" AND person OR vehicle NOT cat"#);

		assert_eq!(compiled.as_str(), "(front <-> door) & (person | vehicle) & !cat");
		assert_eq!(compiled.fragment_count(), 4);
	}

	#[test]
	fn leading_or_is_dropped_from_the_predicate() {
		assert_eq!(compile("OR person").as_str(), "person");
	}

	#[test]
	fn literal_wildcards_compile_to_a_word() {
		let compiled = compile("50%_off");

		assert_eq!(compiled.as_str(), "50_off");
		assert_eq!(compiled.mode(), MatchMode::ImplicitText);
	}
}
