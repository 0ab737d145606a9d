use serde_json::Value;

use crate::{Error, Result};

/// Decodes the detection id list stored on an event row.
///
/// A JSON array is the current encoding. Older rows hold a comma-separated list. A missing
/// or blank value decodes to an empty list; any element that is not an integer is an error.
pub fn decode_detection_ids(raw: Option<&str>) -> Result<Vec<i64>> {
	let Some(raw) = raw else { return Ok(Vec::new()) };
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return Ok(Vec::new());
	}
	if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
		return items.iter().map(|item| coerce_json_id(raw, item)).collect();
	}

	let mut ids = Vec::new();

	for element in trimmed.split(',') {
		let element = element.trim();

		if element.is_empty() {
			continue;
		}

		ids.push(parse_id(raw, element)?);
	}

	Ok(ids)
}

pub fn encode_detection_ids(ids: &[i64]) -> String {
	Value::Array(ids.iter().map(|id| Value::from(*id)).collect()).to_string()
}

fn coerce_json_id(raw: &str, item: &Value) -> Result<i64> {
	match item {
		Value::Number(number) => {
			if let Some(id) = number.as_i64() {
				return Ok(id);
			}

			match number.as_f64() {
				Some(value)
					if value.fract() == 0.0
						&& value >= i64::MIN as f64
						&& value < i64::MAX as f64 =>
					Ok(value as i64),
				_ => Err(invalid(raw, &number.to_string())),
			}
		},
		Value::String(text) => parse_id(raw, text.trim()),
		other => Err(invalid(raw, &other.to_string())),
	}
}

fn parse_id(raw: &str, element: &str) -> Result<i64> {
	element.parse::<i64>().map_err(|_| invalid(raw, element))
}

fn invalid(raw: &str, element: &str) -> Error {
	Error::InvalidDetectionIds { raw: raw.to_string(), element: element.to_string() }
}
