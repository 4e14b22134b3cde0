//! Basic storage objects as loosely-typed JSON maps.

// self
use crate::{_prelude::*, error::ConfigError};

/// A storage object: `id`, `payload`, `sortindex`, `ttl`, and whatever else the caller sends.
pub type Record = Map<String, Value>;

/// Splits `record` into its path id and a body copy without `id`.
///
/// The caller's record is left untouched.
pub(crate) fn split_record(record: &Record) -> Result<(String, Record), ConfigError> {
	let id = match record.get("id") {
		None | Some(Value::Null) => return Err(ConfigError::MissingRecordId),
		Some(Value::String(id)) => id.clone(),
		Some(Value::Number(id)) => id.to_string(),
		Some(_) => return Err(ConfigError::InvalidRecordId),
	};
	let mut body = record.clone();

	body.remove("id");

	Ok((id, body))
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn record(value: Value) -> Record {
		match value {
			Value::Object(map) => map,
			other => panic!("Fixture should be an object, got {other}."),
		}
	}

	#[test]
	fn split_record_strips_id_from_a_copy() {
		let original = record(json!({"id": "abc", "payload": "x", "sortindex": 5}));
		let (id, body) = split_record(&original).expect("Record with id should split.");

		assert_eq!(id, "abc");
		assert_eq!(Value::Object(body), json!({"payload": "x", "sortindex": 5}));
		assert_eq!(original.get("id"), Some(&json!("abc")));
	}

	#[test]
	fn numeric_ids_render_as_path_segments() {
		let (id, _) = split_record(&record(json!({"id": 17, "payload": ""})))
			.expect("Numeric id should split.");

		assert_eq!(id, "17");
	}

	#[test]
	fn missing_or_structured_ids_are_rejected() {
		assert!(matches!(
			split_record(&record(json!({"payload": "x"}))),
			Err(ConfigError::MissingRecordId)
		));
		assert!(matches!(
			split_record(&record(json!({"id": ["a"]}))),
			Err(ConfigError::InvalidRecordId)
		));
	}
}
