//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `sync_client.operation` with the
//!   `operation` and `stage` fields.
//! - Enable `metrics` to increment the `sync_client_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`, and
//!   `sync_client_http_responses_total` for every HTTP answer, labeled by `operation` + status
//!   `class`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Identity provider login + key fetch.
	IdentityExchange,
	/// Assertion-for-credentials exchange at the token server.
	TokenExchange,
	/// `GET /info/collections`.
	InfoCollections,
	/// `GET /info/quota`.
	InfoQuota,
	/// `GET /info/collection_usage`.
	CollectionUsage,
	/// `GET /info/collection_counts`.
	CollectionCounts,
	/// `DELETE /`.
	DeleteAllRecords,
	/// `GET /storage/{collection}`.
	GetRecords,
	/// `GET /storage/{collection}/{id}`.
	GetRecord,
	/// `DELETE /storage/{collection}/{id}`.
	DeleteRecord,
	/// `PUT /storage/{collection}/{id}`.
	PutRecord,
	/// Batch upload; never dispatched.
	PostRecords,
	/// Caller-built request through [`crate::storage::StorageClient::request`].
	Request,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::IdentityExchange => "identity_exchange",
			Operation::TokenExchange => "token_exchange",
			Operation::InfoCollections => "info_collections",
			Operation::InfoQuota => "info_quota",
			Operation::CollectionUsage => "collection_usage",
			Operation::CollectionCounts => "collection_counts",
			Operation::DeleteAllRecords => "delete_all_records",
			Operation::GetRecords => "get_records",
			Operation::GetRecord => "get_record",
			Operation::DeleteRecord => "delete_record",
			Operation::PutRecord => "put_record",
			Operation::PostRecords => "post_records",
			Operation::Request => "request",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}

	/// Maps a result onto its terminal outcome.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => Outcome::Success,
			Err(_) => Outcome::Failure,
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
