use crate::query::translate::Fragment;

const AND: &str = " & ";
const OR: &str = " | ";

/// Joins fragments into one `tsquery` predicate.
///
/// A fragment marked `or_next` is OR-joined to the one after it; everything else is
/// AND-joined. `tsquery` binds `&` tighter than `|`, so OR runs are parenthesized when the
/// predicate also contains an AND join.
pub fn assemble(fragments: &[Fragment]) -> String {
	let mut groups: Vec<Vec<&str>> = Vec::new();
	let mut join_with_previous = false;

	for fragment in fragments {
		match groups.last_mut() {
			Some(group) if join_with_previous => group.push(fragment.text.as_str()),
			_ => groups.push(vec![fragment.text.as_str()]),
		}

		join_with_previous = fragment.or_next;
	}

	if groups.len() == 1 {
		return groups[0].join(OR);
	}

	groups
		.iter()
		.map(|group| match group.as_slice() {
			[single] => (*single).to_string(),
			members => format!("({})", members.join(OR)),
		})
		.collect::<Vec<_>>()
		.join(AND)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fragment(text: &str, or_next: bool) -> Fragment {
		Fragment { text: text.to_string(), or_next }
	}

	#[test]
	fn empty_fragment_list_gives_empty_predicate() {
		assert_eq!(assemble(&[]), "");
	}

	#[test]
	fn default_join_is_and() {
		assert_eq!(assemble(&[fragment("a", false), fragment("b", false)]), "a & b");
	}

	#[test]
	fn single_or_run_needs_no_grouping() {
		assert_eq!(
			assemble(&[fragment("a", true), fragment("b", true), fragment("c", false)]),
			"a | b | c"
		);
	}

	#[test]
	fn or_binds_tighter_than_implicit_and() {
		assert_eq!(
			assemble(&[fragment("a", true), fragment("b", false), fragment("c", false)]),
			"(a | b) & c"
		);
		assert_eq!(
			assemble(&[fragment("c", false), fragment("a", true), fragment("b", false)]),
			"c & (a | b)"
		);
	}

	#[test]
	fn trailing_or_marker_is_ignored() {
		assert_eq!(assemble(&[fragment("a", false), fragment("b", true)]), "a & b");
		assert_eq!(assemble(&[fragment("a", true)]), "a");
	}

	#[test]
	fn phrase_fragments_keep_their_own_parentheses() {
		assert_eq!(
			assemble(&[fragment("(front <-> door)", false), fragment("person", false)]),
			"(front <-> door) & person"
		);
	}
}
