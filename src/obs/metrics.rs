// self
use crate::obs::{Operation, Outcome};

/// Counts one outcome on `sync_client_operation_total{operation, outcome}`.
pub fn record_outcome(operation: Operation, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"sync_client_operation_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Counts one HTTP answer on `sync_client_http_responses_total{operation, class}`.
///
/// Storage and token server answers are bucketed by status class so quota (`4xx`) and
/// node failures (`5xx`) show up without per-code cardinality.
pub fn record_status(operation: Operation, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"sync_client_http_responses_total",
			"operation" => operation.as_str(),
			"class" => status_class(status)
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, status);
	}
}

/// Buckets a status code into its `Nxx` class label.
pub const fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}
