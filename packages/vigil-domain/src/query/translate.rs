use crate::query::tokenize::{self, TokenizedQuery};

/// Joins the words of a phrase so they must appear next to each other.
const ADJACENT: &str = " <-> ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
	pub text: String,
	/// Set when the next fragment joins this one with OR instead of the default AND.
	pub or_next: bool,
}
impl Fragment {
	fn new(text: String) -> Self {
		Self { text, or_next: false }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
	Placeholder,
	And,
	Or,
	Not,
	Word,
}
impl TokenKind {
	fn classify(token: &str) -> Self {
		if tokenize::is_placeholder(token) {
			return Self::Placeholder;
		}
		if token.eq_ignore_ascii_case("and") {
			return Self::And;
		}
		if token.eq_ignore_ascii_case("or") {
			return Self::Or;
		}
		if token.eq_ignore_ascii_case("not") {
			return Self::Not;
		}

		Self::Word
	}
}

/// Walks the token stream left to right and emits predicate fragments.
///
/// Malformed operator sequences never fail: stray `OR`s and dangling `NOT`s are dropped
/// token by token.
pub fn translate(query: &TokenizedQuery) -> Vec<Fragment> {
	let tokens = query.tokens.as_slice();
	let mut phrases = query.phrases.iter();
	let mut fragments: Vec<Fragment> = Vec::new();
	let mut cursor = 0;

	while cursor < tokens.len() {
		let token = tokens[cursor].as_str();

		match TokenKind::classify(token) {
			TokenKind::Placeholder => {
				if let Some(text) = phrases.next().and_then(|phrase| phrase_fragment(phrase)) {
					fragments.push(Fragment::new(text));
				}

				cursor += 1;
			},
			TokenKind::And => cursor += 1,
			TokenKind::Or => {
				if let Some(last) = fragments.last_mut() {
					last.or_next = true;
				}

				cursor += 1;
			},
			TokenKind::Not => {
				let next = tokens.get(cursor + 1).map(String::as_str);

				match next {
					Some(next) if TokenKind::classify(next) == TokenKind::Word => {
						let word = tokenize::strip_non_word(next);

						if !word.is_empty() {
							fragments.push(Fragment::new(format!("!{word}")));
						}

						cursor += 2;
					},
					_ => cursor += 1,
				}
			},
			TokenKind::Word => {
				let word = tokenize::strip_non_word(token);

				if !word.is_empty() {
					fragments.push(Fragment::new(word));
				}

				cursor += 1;
			},
		}
	}

	fragments
}

fn phrase_fragment(phrase: &str) -> Option<String> {
	let words: Vec<String> = phrase
		.split_whitespace()
		.map(tokenize::strip_non_word)
		.filter(|word| !word.is_empty())
		.collect();

	if words.is_empty() {
		return None;
	}

	Some(format!("({})", words.join(ADJACENT)))
}
