//! Per-call passthrough options threaded untouched to the transport.

// std
use std::time::Duration as StdDuration;
// crates.io
use http::HeaderMap;
// self
use crate::{_prelude::*, error::ConfigError, transport};

/// Extra headers, query parameters, body fields, and timeout for a single storage call.
///
/// Every operation on [`crate::storage::StorageClient`] takes one by value; use
/// `RequestOptions::default()` when nothing extra is needed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
	/// Headers appended to the request before signing.
	pub headers: Vec<(String, String)>,
	/// Query pairs appended after the ones the operation builds.
	pub query: Vec<(String, String)>,
	/// Fields merged into an object body (or forming the body when there is none).
	pub body_fields: Map<String, Value>,
	/// Timeout forwarded to the transport.
	pub timeout: Option<StdDuration>,
}
impl RequestOptions {
	/// Adds a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Adds a query pair.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Adds a body field.
	pub fn with_body_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.body_fields.insert(key.into(), value.into());

		self
	}

	/// Sets the transport timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	pub(crate) fn header_map(&self) -> Result<HeaderMap, ConfigError> {
		let mut headers = HeaderMap::new();

		for (name, value) in &self.headers {
			transport::insert_header(&mut headers, name, value)?;
		}

		Ok(headers)
	}
}

/// Merges extra fields into `body`. Non-object bodies are left as they are.
pub(crate) fn merge_body(body: Option<Value>, fields: Map<String, Value>) -> Option<Value> {
	if fields.is_empty() {
		return body;
	}

	match body {
		None => Some(Value::Object(fields)),
		Some(Value::Object(mut map)) => {
			map.extend(fields);

			Some(Value::Object(map))
		},
		other => other,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn merge_body_extends_objects_and_fills_empty_bodies() {
		let fields = RequestOptions::default().with_body_field("ttl", 3600).body_fields;

		assert_eq!(
			merge_body(Some(json!({"payload": "x"})), fields.clone()),
			Some(json!({"payload": "x", "ttl": 3600}))
		);
		assert_eq!(merge_body(None, fields.clone()), Some(json!({"ttl": 3600})));
		assert_eq!(merge_body(Some(json!([1, 2])), fields), Some(json!([1, 2])));
		assert_eq!(merge_body(None, Map::new()), None);
	}

	#[test]
	fn header_map_keeps_every_caller_header() {
		let options = RequestOptions::default()
			.with_header("X-If-Unmodified-Since", "1233702554.25")
			.with_header("X-Confirm-Delete", "1");
		let headers = options.header_map().expect("Headers should be valid.");

		assert_eq!(headers.len(), 2);
		assert_eq!(
			headers.get("x-if-unmodified-since").and_then(|v| v.to_str().ok()),
			Some("1233702554.25")
		);
	}
}
