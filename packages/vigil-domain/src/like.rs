/// The escape character used with `LIKE ... ESCAPE '\'`.
pub const LIKE_ESCAPE: char = '\\';

/// Escapes `LIKE`/`ILIKE` metacharacters so the input matches literally.
pub fn escape_like(input: &str) -> String {
	let mut out = String::with_capacity(input.len());

	for ch in input.chars() {
		if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
			out.push(LIKE_ESCAPE);
		}

		out.push(ch);
	}

	out
}

/// Wraps an escaped substring for a contains-style `ILIKE` match.
pub fn contains_pattern(input: &str) -> String {
	format!("%{}%", escape_like(input))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escapes_wildcards_and_the_escape_character() {
		assert_eq!(escape_like("50%_off"), r"50\%\_off");
		assert_eq!(escape_like(r"C:\cam"), r"C:\\cam");
	}

	#[test]
	fn plain_text_is_unchanged() {
		assert_eq!(escape_like("front door"), "front door");
	}

	#[test]
	fn contains_pattern_wraps_the_escaped_text() {
		assert_eq!(contains_pattern("person"), "%person%");
		assert_eq!(contains_pattern("a_b"), r"%a\_b%");
	}
}
