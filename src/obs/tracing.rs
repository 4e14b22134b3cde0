// self
use crate::{_prelude::*, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type Instrumented<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type Instrumented<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("sync_client.operation", operation = operation.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Emits a debug event inside the span describing an outbound request.
	pub fn dispatch(&self, method: &http::Method, url: &Url) {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(|| tracing::debug!(%method, %url, "dispatching request"));
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, url);
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn dispatch_noop_without_subscriber() {
		let url = Url::parse("http://example.org/info/quota").expect("Fixture URL should parse.");

		OperationSpan::new(Operation::InfoQuota, "test").dispatch(&http::Method::GET, &url);
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new(Operation::GetRecords, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
