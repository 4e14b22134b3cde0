//! Client-level error types shared by the token server exchange, signer, and storage calls.

// self
use crate::{_prelude::*, sign::SignError, transport::HttpResponse};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used where an upstream collaborator owns the concrete type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request signing failed.
	#[error(transparent)]
	Sign(#[from] SignError),

	/// Token server refused to issue storage credentials.
	#[error("Token server rejected the credential exchange: {0}")]
	RemoteAuth(#[source] HttpError),
	/// Storage service answered with a non-success status (304 included).
	#[error(transparent)]
	Http(#[from] HttpError),
	/// Response body could not be decoded into the expected JSON shape.
	#[error("Response from {url} is not valid JSON.")]
	Decode {
		/// URL of the response that failed to decode.
		url: Url,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Identity provider failed while logging in or issuing material.
	#[error("Identity provider failed.")]
	IdentityProvider {
		/// Failure reported by the identity provider collaborator.
		#[source]
		source: BoxError,
	},
	/// Operation is deliberately not implemented by this client.
	#[error("The {operation} operation is not implemented.")]
	Unsupported {
		/// Operation label.
		operation: &'static str,
	},
}
impl Error {
	/// Returns the HTTP status carried by [`Error::Http`] or [`Error::RemoteAuth`].
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http(e) | Self::RemoteAuth(e) => Some(e.status),
			_ => None,
		}
	}
}

/// Non-success HTTP response, preserved for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{status} Client Error: {reason} for url: {url}")]
pub struct HttpError {
	/// HTTP status code.
	pub status: u16,
	/// Canonical reason phrase, empty when the status has none.
	pub reason: String,
	/// Final URL of the request.
	pub url: Url,
}
impl HttpError {
	/// Captures status, reason, and URL from a response.
	pub fn from_response(response: &HttpResponse) -> Self {
		Self {
			status: response.status.as_u16(),
			reason: response.status.canonical_reason().unwrap_or_default().to_owned(),
			url: response.url.clone(),
		}
	}

	/// Whether the server answered `304 Not Modified`.
	pub fn is_not_modified(&self) -> bool {
		self.status == 304
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Neither credential mode was fully supplied.
	#[error(
		"You should either provide an identity assertion and a client state or complete storage credentials (uid, api_endpoint, hashalg, id, key); missing: {}.",
		.missing.join(", ")
	)]
	IncompleteCredentials {
		/// Direct-credential keys that were not supplied.
		missing: Vec<&'static str>,
	},
	/// URL cannot be parsed.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL text.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Header name cannot be used on the wire.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
		/// Underlying validation failure.
		#[source]
		source: http::header::InvalidHeaderName,
	},
	/// Header value cannot be used on the wire.
	#[error("Value for header `{name}` is invalid.")]
	InvalidHeaderValue {
		/// Header the value was destined for.
		name: String,
		/// Underlying validation failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// Client state is not a hex fingerprint.
	#[error("Client state must be a non-empty hex string.")]
	InvalidClientState,
	/// Record has no `id` field to address it by.
	#[error("Record is missing its `id` field.")]
	MissingRecordId,
	/// Record `id` is neither a string nor a number.
	#[error("Record `id` must be a string or a number.")]
	InvalidRecordId,
	/// Requested token lifetime is zero or negative.
	#[error("The requested token duration must be positive.")]
	NonPositiveDuration,
	/// Token server handed out credentials for an algorithm the signer lacks.
	#[error("Hash algorithm `{algorithm}` is not supported.")]
	UnsupportedHashAlgorithm {
		/// Algorithm label as received.
		algorithm: String,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be encoded as JSON.")]
	BodyEncode(#[source] serde_json::Error),
}
impl ConfigError {
	pub(crate) fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
		Self::InvalidUrl { url: url.into(), source }
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Request URL.
		url: Url,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(url: Url, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { url, source: Box::new(src) }
	}
}
