//! Query parameters accepted by `GET /storage/{collection}`.

// self
use crate::_prelude::*;

/// Orderings the storage service understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortOrder {
	/// Last-modified time, largest first.
	Newest,
	/// Sort index, highest weight first.
	Index,
}
impl SortOrder {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			SortOrder::Newest => "newest",
			SortOrder::Index => "index",
		}
	}

	/// Parses a wire label; anything else yields `None`.
	pub fn parse(label: &str) -> Option<Self> {
		match label {
			"newest" => Some(SortOrder::Newest),
			"index" => Some(SortOrder::Index),
			_ => None,
		}
	}
}
impl Display for SortOrder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Filters for listing a collection.
///
/// Limits such as the 100-id cap are enforced by the server, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordsQuery {
	/// Return full objects instead of ids. Defaults to `true`.
	pub full: bool,
	/// Only return these ids.
	pub ids: Option<Vec<String>>,
	/// Only return objects modified strictly after this timestamp.
	pub newer: Option<f64>,
	/// Return at most this many objects.
	pub limit: Option<u64>,
	/// Continuation token from a previous `X-Weave-Next-Offset`.
	pub offset: Option<String>,
	/// Result ordering.
	pub sort: Option<SortOrder>,
}
impl RecordsQuery {
	/// Toggles full objects.
	pub fn full(mut self, full: bool) -> Self {
		self.full = full;

		self
	}

	/// Restricts the listing to `ids`.
	pub fn ids<I, T>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Display,
	{
		self.ids = Some(ids.into_iter().map(|id| id.to_string()).collect());

		self
	}

	/// Only returns objects newer than `timestamp`.
	pub fn newer(mut self, timestamp: f64) -> Self {
		self.newer = Some(timestamp);

		self
	}

	/// Caps the number of returned objects.
	pub fn limit(mut self, limit: u64) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Resumes from a continuation token.
	pub fn offset(mut self, offset: impl Into<String>) -> Self {
		self.offset = Some(offset.into());

		self
	}

	/// Sets the ordering.
	pub fn sort(mut self, sort: SortOrder) -> Self {
		self.sort = Some(sort);

		self
	}

	/// Sets the ordering from a wire label; unknown labels clear it silently.
	pub fn sort_label(mut self, label: &str) -> Self {
		self.sort = SortOrder::parse(label);

		self
	}

	/// Renders the query pairs in wire order.
	pub fn to_query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();

		if self.full {
			pairs.push(("full".into(), "true".into()));
		}
		if let Some(ids) = &self.ids {
			pairs.push(("ids".into(), ids.join(",")));
		}
		if let Some(newer) = self.newer {
			pairs.push(("newer".into(), newer.to_string()));
		}
		if let Some(limit) = self.limit {
			pairs.push(("limit".into(), limit.to_string()));
		}
		if let Some(offset) = &self.offset {
			pairs.push(("offset".into(), offset.clone()));
		}
		if let Some(sort) = self.sort {
			pairs.push(("sort".into(), sort.as_str().into()));
		}

		pairs
	}
}
impl Default for RecordsQuery {
	fn default() -> Self {
		Self { full: true, ids: None, newer: None, limit: None, offset: None, sort: None }
	}
}
