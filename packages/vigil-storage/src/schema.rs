pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_cameras.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_cameras.sql")),
				"tables/002_events.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_events.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn includes_are_expanded() {
		let sql = render_schema();

		assert!(!sql.contains("\\ir "));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS cameras"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS events"));
		assert!(sql.contains("USING GIN (search_vector)"));
	}

	#[test]
	fn statements_split_cleanly_on_semicolons() {
		let sql = render_schema();
		let statements: Vec<&str> =
			sql.split(';').map(str::trim).filter(|s| !s.is_empty()).collect();

		assert!(statements.iter().all(|s| s.starts_with("CREATE ")));
		assert_eq!(statements.len(), 7);
	}
}
