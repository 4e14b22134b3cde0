//! Transport primitives for token server and storage calls.
//!
//! The module exposes [`HttpTransport`] alongside the owned [`HttpRequest`] and
//! [`HttpResponse`] values so downstream crates can plug in their own HTTP stack. The
//! client never interprets transport failures; whatever the transport reports is surfaced
//! as [`TransportError`].

// std
use std::time::Duration as StdDuration;
// crates.io
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute a single request.
///
/// Implementations must be `Send + Sync + 'static` so a client can be shared across tasks.
/// Each call maps to exactly one request on the wire; redirects, pooling, and timeouts are
/// the implementation's business.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves with the raw response, whatever its status.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Fully-formed outbound request handed to an [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL including the query string.
	pub url: Url,
	/// Headers, signature included.
	pub headers: HeaderMap,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
	/// Per-request timeout forwarded to the transport.
	pub timeout: Option<StdDuration>,
}
impl HttpRequest {
	/// Creates a body-less request without headers.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: None, timeout: None }
	}
}

/// Raw response captured from an [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct HttpResponse {
	/// Response status.
	pub status: StatusCode,
	/// Final URL after any redirects.
	pub url: Url,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Whether the status is a 2xx other than `304 Not Modified`.
	pub fn is_success(&self) -> bool {
		self.status.is_success() && self.status != StatusCode::NOT_MODIFIED
	}

	/// Returns a header value as text, if present and valid UTF-8.
	pub fn header_str(&self, name: &str) -> Option<&str> {
		self.headers.get(name)?.to_str().ok()
	}

	/// Decodes the body as JSON; a blank body decodes as `null`.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let body: &[u8] =
			if self.body.iter().all(u8::is_ascii_whitespace) { b"null" } else { &self.body };
		let mut deserializer = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { url: self.url.clone(), source })
	}
}

/// Normalizes raw header material into text; invalid UTF-8 sequences are replaced.
pub fn header_text(value: &[u8]) -> std::borrow::Cow<'_, str> {
	String::from_utf8_lossy(value)
}

/// Builds a validated header value from text or bytes.
pub fn header_value(name: &str, value: impl AsRef<[u8]>) -> Result<HeaderValue, ConfigError> {
	HeaderValue::from_bytes(header_text(value.as_ref()).as_bytes())
		.map_err(|source| ConfigError::InvalidHeaderValue { name: name.to_owned(), source })
}

/// Inserts a caller-supplied header pair into `headers`, replacing any previous value.
pub fn insert_header(
	headers: &mut HeaderMap,
	name: &str,
	value: impl AsRef<[u8]>,
) -> Result<(), ConfigError> {
	let header_name = HeaderName::from_bytes(name.as_bytes())
		.map_err(|source| ConfigError::InvalidHeaderName { name: name.to_owned(), source })?;

	headers.insert(header_name, header_value(name, value)?);

	Ok(())
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl std::ops::Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let HttpRequest { method, url, headers, body, timeout } = request;
			let mut builder = self.0.request(method, url.clone()).headers(headers);

			if let Some(body) = body {
				builder = builder.body(body);
			}
			if let Some(timeout) = timeout {
				builder = builder.timeout(timeout);
			}

			let response =
				builder.send().await.map_err(|e| TransportError::network(url.clone(), e))?;
			let status = response.status();
			let final_url = response.url().clone();
			let headers = response.headers().to_owned();
			let body = response
				.bytes()
				.await
				.map_err(|e| TransportError::network(final_url.clone(), e))?
				.to_vec();

			Ok(HttpResponse { status, url: final_url, headers, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16) -> HttpResponse {
		HttpResponse {
			status: StatusCode::from_u16(status).expect("Fixture status should be valid."),
			url: Url::parse("http://example.org/").expect("Fixture URL should parse."),
			headers: HeaderMap::new(),
			body: Vec::new(),
		}
	}

	#[test]
	fn not_modified_is_never_success() {
		assert!(response(200).is_success());
		assert!(response(204).is_success());
		assert!(!response(304).is_success());
		assert!(!response(404).is_success());
	}

	#[test]
	fn json_decodes_blank_body_as_null() {
		let mut blank = response(200);

		assert_eq!(blank.json::<Value>().expect("Blank body should decode."), Value::Null);

		blank.body = b"{\"modified\": 1233702554.25}".to_vec();

		let body: Value = blank.json().expect("JSON body should decode.");

		assert_eq!(body["modified"], 1233702554.25);

		blank.body = b"<html>".to_vec();

		assert!(matches!(blank.json::<Value>(), Err(Error::Decode { .. })));
	}

	#[test]
	fn header_text_accepts_bytes_and_text() {
		assert_eq!(header_text(b"Toto"), "Toto");
		assert_eq!(header_text("Rémy".as_bytes()), "Rémy");
		assert_eq!(header_text(&[0x66, 0xFF]), "f\u{FFFD}");
	}

	#[test]
	fn insert_header_rejects_control_characters() {
		let mut headers = HeaderMap::new();

		insert_header(&mut headers, "X-Client-State", "abcd").expect("Plain value should pass.");

		assert_eq!(headers.get("x-client-state").map(|v| v.as_bytes()), Some(&b"abcd"[..]));
		assert!(matches!(
			insert_header(&mut headers, "X-Bad", "line\nbreak"),
			Err(ConfigError::InvalidHeaderValue { .. })
		));
		assert!(matches!(
			insert_header(&mut headers, "bad name", "value"),
			Err(ConfigError::InvalidHeaderName { .. })
		));
	}
}
