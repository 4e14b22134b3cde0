//! Storage responses and the `X-Weave-*` metadata riding along with them.

// self
use crate::{_prelude::*, transport::HttpResponse};

/// Storage service headers worth surfacing to callers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseMetadata {
	/// HTTP status code.
	pub status: u16,
	/// `X-Weave-Timestamp`: server time when the request was processed.
	pub timestamp: Option<f64>,
	/// `X-Last-Modified`: last modification time of the touched resource.
	pub last_modified: Option<f64>,
	/// `X-Weave-Records`: number of records in a listing.
	pub records: Option<u64>,
	/// `X-Weave-Next-Offset`: continuation token for the next page.
	pub next_offset: Option<String>,
	/// `X-Weave-Quota-Remaining`: remaining quota in KB.
	pub quota_remaining: Option<f64>,
	/// `X-Weave-Alert`: service alert text.
	pub alert: Option<String>,
}
impl ResponseMetadata {
	/// Reads the storage headers from `response`; malformed numbers are treated as absent.
	pub fn from_response(response: &HttpResponse) -> Self {
		let parsed = |name: &str| response.header_str(name).and_then(|v| v.trim().parse().ok());
		let text = |name: &str| response.header_str(name).map(str::to_owned);

		Self {
			status: response.status.as_u16(),
			timestamp: parsed("x-weave-timestamp"),
			last_modified: parsed("x-last-modified"),
			records: response.header_str("x-weave-records").and_then(|v| v.trim().parse().ok()),
			next_offset: text("x-weave-next-offset"),
			quota_remaining: parsed("x-weave-quota-remaining"),
			alert: text("x-weave-alert"),
		}
	}
}

/// Decoded body plus metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageResponse<T = Value> {
	/// Decoded JSON body.
	pub body: T,
	/// Storage headers.
	pub metadata: ResponseMetadata,
}

/// One page of a collection listing.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordsPage {
	/// Records (or ids when `full` was off) on this page.
	pub records: Value,
	/// Token to pass as `offset` for the next page; `None` on the last page.
	pub next_offset: Option<String>,
	/// Storage headers.
	pub metadata: ResponseMetadata,
}
impl From<StorageResponse> for RecordsPage {
	fn from(response: StorageResponse) -> Self {
		Self {
			records: response.body,
			next_offset: response.metadata.next_offset.clone(),
			metadata: response.metadata,
		}
	}
}
