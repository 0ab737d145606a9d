/// Marks the position of one extracted phrase inside the token stream.
///
/// The character sits in a Unicode private-use block and is stripped from caller input
/// before extraction, so ordinary query text can never produce this token.
pub(crate) const PHRASE_PLACEHOLDER: &str = "\u{E000}";

const PLACEHOLDER_CHAR: char = '\u{E000}';

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenizedQuery {
	/// Contents of each closed double-quoted span, in order of appearance.
	pub phrases: Vec<String>,
	/// Whitespace-separated tokens with every phrase replaced by one placeholder.
	pub tokens: Vec<String>,
}

pub fn tokenize(raw: &str) -> TokenizedQuery {
	let sanitized: String = raw.chars().filter(|ch| *ch != PLACEHOLDER_CHAR).collect();
	let mut phrases = Vec::new();
	let mut rewritten = String::with_capacity(sanitized.len());
	let mut rest = sanitized.as_str();

	while let Some(open) = rest.find('"') {
		let after_open = &rest[open + 1..];
		let Some(close) = after_open.find('"') else { break };

		rewritten.push_str(&rest[..open]);
		rewritten.push(' ');
		rewritten.push_str(PHRASE_PLACEHOLDER);
		rewritten.push(' ');
		phrases.push(after_open[..close].to_string());

		rest = &after_open[close + 1..];
	}

	// An unterminated quote falls through here and is tokenized literally.
	rewritten.push_str(rest);

	let tokens = rewritten.split_whitespace().map(str::to_string).collect();

	TokenizedQuery { phrases, tokens }
}

pub(crate) fn is_placeholder(token: &str) -> bool {
	token == PHRASE_PLACEHOLDER
}

/// Keeps word characters only: Unicode alphanumerics and `_`.
pub(crate) fn strip_non_word(token: &str) -> String {
	token.chars().filter(|ch| ch.is_alphanumeric() || *ch == '_').collect()
}
