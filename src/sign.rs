//! Request signing contracts plus the Hawk scheme used by the storage service.

pub mod hawk;

pub use hawk::*;

// crates.io
use http::{HeaderMap, Method, header::InvalidHeaderValue};
// self
use crate::_prelude::*;

/// Request parts a signer may cover with its MAC.
#[derive(Clone, Copy, Debug)]
pub struct SigningRequest<'a> {
	/// HTTP method.
	pub method: &'a Method,
	/// Absolute URL including the query string.
	pub url: &'a Url,
	/// Headers already attached to the request.
	pub headers: &'a HeaderMap,
	/// Request body, if any.
	pub body: Option<&'a [u8]>,
}

/// Produces the authentication headers for an outbound storage request.
///
/// Implementations receive the request headers and return the full header set to send,
/// leaving caller-supplied headers in place.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Signs `request` and returns the headers to send with it.
	fn sign(&self, request: &SigningRequest<'_>) -> Result<HeaderMap, SignError>;
}

/// Failures raised while signing a request.
#[derive(Debug, ThisError)]
pub enum SignError {
	/// MAC key cannot initialize the HMAC.
	#[error("MAC key is invalid.")]
	InvalidKey,
	/// URL has no host to cover with the MAC.
	#[error("URL `{url}` has no host to sign.")]
	MissingHost {
		/// URL that failed.
		url: Url,
	},
	/// Produced header cannot be sent.
	#[error("Signed header value is invalid.")]
	Header(#[from] InvalidHeaderValue),
}
