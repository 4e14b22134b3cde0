//! Token server exchange: trade an identity assertion for storage credentials.
//!
//! [`TokenServerClient::negotiate`] issues exactly one `GET {server}/1.0/sync/1.5` carrying
//! `Authorization: BrowserID <assertion>` and `X-Client-State`. Any non-2xx answer surfaces as
//! [`Error::RemoteAuth`]; nothing is retried or cached.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	auth::{Assertion, ClientState, SessionDescriptor},
	config,
	error::{ConfigError, HttpError},
	obs::{self, Operation, OperationSpan, Outcome},
	transport::{self, HttpRequest, HttpTransport},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;

/// Discovery path for Sync 1.5 storage credentials.
pub const TOKEN_PATH: &str = "/1.0/sync/1.5";

#[cfg(feature = "reqwest")]
/// Token server client specialized for the crate's default reqwest transport.
pub type ReqwestTokenServerClient = TokenServerClient<ReqwestHttpClient>;

/// Client for the token server.
pub struct TokenServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP transport used for the exchange.
	pub http_client: Arc<C>,
	/// Token server base URL.
	pub server_url: Url,
}
impl<C> TokenServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(server_url: Url, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), server_url }
	}

	/// Builds the discovery URL, appending `duration` when requested.
	pub fn discovery_url(&self, duration: Option<Duration>) -> Result<Url> {
		let raw = format!("{}{TOKEN_PATH}", self.server_url.as_str().trim_end_matches('/'));
		let mut url = config::parse_url(&raw)?;

		if let Some(duration) = duration {
			let seconds = duration.whole_seconds();

			if seconds <= 0 {
				return Err(ConfigError::NonPositiveDuration.into());
			}

			url.query_pairs_mut().append_pair("duration", &seconds.to_string());
		}

		Ok(url)
	}

	/// Exchanges `assertion` + `client_state` for a [`SessionDescriptor`].
	pub async fn negotiate(
		&self,
		assertion: &Assertion,
		client_state: &ClientState,
		duration: Option<Duration>,
	) -> Result<SessionDescriptor> {
		const OP: Operation = Operation::TokenExchange;

		let span = OperationSpan::new(OP, "negotiate");

		obs::record_outcome(OP, Outcome::Attempt);

		let result = span
			.instrument(async {
				let mut request = HttpRequest::new(Method::GET, self.discovery_url(duration)?);

				transport::insert_header(
					&mut request.headers,
					"Authorization",
					assertion.authorization(),
				)?;
				transport::insert_header(
					&mut request.headers,
					"X-Client-State",
					client_state.as_str(),
				)?;
				span.dispatch(&request.method, &request.url);

				let response = self.http_client.execute(request).await?;

				obs::record_status(OP, response.status.as_u16());

				if !response.status.is_success() {
					return Err(Error::RemoteAuth(HttpError::from_response(&response)));
				}

				response.json::<SessionDescriptor>()
			})
			.await;

		obs::record_outcome(OP, Outcome::of(&result));

		result
	}
}
#[cfg(feature = "reqwest")]
impl TokenServerClient<ReqwestHttpClient> {
	/// Creates a client for `server_url` with its own reqwest transport.
	pub fn new(server_url: Url) -> Self {
		Self::with_http_client(server_url, ReqwestHttpClient::default())
	}
}
#[cfg(feature = "reqwest")]
impl Default for TokenServerClient<ReqwestHttpClient> {
	fn default() -> Self {
		Self::new(config::ServiceEndpoints::default().token_server)
	}
}
impl<C> Clone for TokenServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), server_url: self.server_url.clone() }
	}
}
impl<C> Debug for TokenServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenServerClient").field("server_url", &self.server_url).finish()
	}
}
