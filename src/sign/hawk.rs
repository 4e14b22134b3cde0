//! Hawk request signing (`hawk.1.header`, HMAC over method, resource, host, and time).

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use http::{HeaderMap, HeaderValue, header::{AUTHORIZATION, CONTENT_TYPE}};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::{HashAlgorithm, HawkCredentials},
	sign::{RequestSigner, SignError, SigningRequest},
};

const NONCE_LEN: usize = 8;

/// Hawk signer bound to one set of credentials.
#[derive(Clone, Debug)]
pub struct HawkSigner {
	credentials: HawkCredentials,
	ext: Option<String>,
}
impl HawkSigner {
	/// Creates a signer for `credentials`.
	pub fn new(credentials: HawkCredentials) -> Self {
		Self { credentials, ext: None }
	}

	/// Attaches application-specific `ext` data to every signature.
	pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
		self.ext = Some(ext.into());

		self
	}

	/// Credentials the signer uses.
	pub fn credentials(&self) -> &HawkCredentials {
		&self.credentials
	}

	/// Builds the `Authorization` header value for a fixed timestamp and nonce.
	pub fn header_at(
		&self,
		request: &SigningRequest<'_>,
		ts: i64,
		nonce: &str,
	) -> Result<String, SignError> {
		let url = request.url;
		let host = url.host_str().ok_or_else(|| SignError::MissingHost { url: url.clone() })?;
		let port = url.port_or_known_default().unwrap_or_default();
		let resource = match url.query() {
			Some(query) => format!("{}?{query}", url.path()),
			None => url.path().to_owned(),
		};
		let hash = request.body.map(|body| {
			let content_type = request
				.headers
				.get(CONTENT_TYPE)
				.and_then(|value| value.to_str().ok())
				.unwrap_or_default();

			payload_hash(self.credentials.algorithm, content_type, body)
		});
		let ext = self.ext.as_deref().unwrap_or_default();
		let normalized = format!(
			"hawk.1.header\n{ts}\n{nonce}\n{method}\n{resource}\n{host}\n{port}\n{hash}\n{ext}\n",
			method = request.method.as_str().to_ascii_uppercase(),
			host = host.to_ascii_lowercase(),
			hash = hash.as_deref().unwrap_or_default(),
		);
		let mac = self.mac(normalized.as_bytes())?;
		let mut header = format!(
			"Hawk id=\"{}\", ts=\"{ts}\", nonce=\"{nonce}\"",
			escape_attribute(&self.credentials.id)
		);

		if let Some(hash) = hash {
			header.push_str(&format!(", hash=\"{hash}\""));
		}
		if !ext.is_empty() {
			header.push_str(&format!(", ext=\"{}\"", escape_attribute(ext)));
		}

		header.push_str(&format!(", mac=\"{mac}\""));

		Ok(header)
	}

	fn mac(&self, normalized: &[u8]) -> Result<String, SignError> {
		let key = self.credentials.key.as_bytes();
		let digest = match self.credentials.algorithm {
			HashAlgorithm::Sha1 => hmac_digest::<Hmac<Sha1>>(key, normalized)?,
			HashAlgorithm::Sha256 => hmac_digest::<Hmac<Sha256>>(key, normalized)?,
		};

		Ok(STANDARD.encode(digest))
	}
}
impl RequestSigner for HawkSigner {
	fn sign(&self, request: &SigningRequest<'_>) -> Result<HeaderMap, SignError> {
		let ts = OffsetDateTime::now_utc().unix_timestamp();
		let header = self.header_at(request, ts, &nonce())?;
		let mut headers = request.headers.clone();

		headers.insert(AUTHORIZATION, HeaderValue::from_str(&header)?);

		Ok(headers)
	}
}

/// Hawk payload hash: `base64(H("hawk.1.payload\n{content-type}\n{body}\n"))`.
///
/// Only the MIME type of `content_type` is covered; parameters such as `charset` are dropped.
pub fn payload_hash(algorithm: HashAlgorithm, content_type: &str, body: &[u8]) -> String {
	let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
	let digest = match algorithm {
		HashAlgorithm::Sha1 => payload_digest::<Sha1>(&mime, body),
		HashAlgorithm::Sha256 => payload_digest::<Sha256>(&mime, body),
	};

	STANDARD.encode(digest)
}

fn payload_digest<D>(mime: &str, body: &[u8]) -> Vec<u8>
where
	D: Digest,
{
	let mut hasher = D::new();

	hasher.update(b"hawk.1.payload\n");
	hasher.update(mime.as_bytes());
	hasher.update(b"\n");
	hasher.update(body);
	hasher.update(b"\n");

	hasher.finalize().to_vec()
}

fn hmac_digest<M>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, SignError>
where
	M: Mac + hmac::digest::KeyInit,
{
	let mut mac =
		<M as hmac::digest::KeyInit>::new_from_slice(key).map_err(|_| SignError::InvalidKey)?;

	mac.update(message);

	Ok(mac.finalize().into_bytes().to_vec())
}

fn nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

fn escape_attribute(value: &str) -> String {
	value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const TS: i64 = 1353832234;
	const NONCE: &str = "j4h3g2";

	fn signer() -> HawkSigner {
		HawkSigner::new(HawkCredentials::new(
			HashAlgorithm::Sha256,
			"dh37fgj492je",
			"werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn",
		))
		.with_ext("some-app-ext-data")
	}

	fn resource_url() -> Url {
		Url::parse("http://example.com:8000/resource/1?b=1&a=2")
			.expect("Protocol example URL should parse.")
	}

	#[test]
	fn header_matches_protocol_example() {
		let url = resource_url();
		let headers = HeaderMap::new();
		let request =
			SigningRequest { method: &http::Method::GET, url: &url, headers: &headers, body: None };
		let header = signer().header_at(&request, TS, NONCE).expect("Signing should succeed.");

		assert_eq!(
			header,
			"Hawk id=\"dh37fgj492je\", ts=\"1353832234\", nonce=\"j4h3g2\", \
			ext=\"some-app-ext-data\", mac=\"6R4rV5iE+NPoym+WwjeHzjAGXUtLNIxmo1vpMofpLAE=\""
		);
	}

	#[test]
	fn payload_is_covered_by_hash() {
		let url = resource_url();
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

		let request = SigningRequest {
			method: &http::Method::POST,
			url: &url,
			headers: &headers,
			body: Some(&b"Thank you for flying Hawk"[..]),
		};
		let header = signer().header_at(&request, TS, NONCE).expect("Signing should succeed.");

		assert_eq!(
			payload_hash(
				HashAlgorithm::Sha256,
				"text/plain; charset=utf-8",
				b"Thank you for flying Hawk"
			),
			"Yi9LfIIFRtBEPt74PVmbTF/xVAwPn7ub15ePICfgnuY="
		);
		assert!(header.contains("hash=\"Yi9LfIIFRtBEPt74PVmbTF/xVAwPn7ub15ePICfgnuY=\""));
		assert!(header.ends_with("mac=\"aSe1DERmZuRl3pI36/9BdZmnErTw3sNzOOAUlfeKjVw=\""));
	}

	#[test]
	fn sign_keeps_existing_headers_and_adds_authorization() {
		let url = resource_url();
		let mut headers = HeaderMap::new();

		headers.insert("x-if-unmodified-since", HeaderValue::from_static("1234"));

		let request =
			SigningRequest { method: &http::Method::GET, url: &url, headers: &headers, body: None };
		let signed = signer().sign(&request).expect("Signing should succeed.");
		let authorization = signed
			.get(AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.expect("Authorization header should be present.");

		assert!(authorization.starts_with("Hawk id=\"dh37fgj492je\", ts=\""));
		assert_eq!(signed.get("x-if-unmodified-since"), headers.get("x-if-unmodified-since"));
	}

	#[test]
	fn sha1_credentials_use_hmac_sha1() {
		let url = resource_url();
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

		let signer = HawkSigner::new(HawkCredentials::new(
			HashAlgorithm::Sha1,
			"dh37fgj492je",
			"werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn",
		))
		.with_ext("some-app-ext-data");
		let get =
			SigningRequest { method: &http::Method::GET, url: &url, headers: &headers, body: None };
		let post = SigningRequest {
			method: &http::Method::POST,
			url: &url,
			headers: &headers,
			body: Some(&b"Thank you for flying Hawk"[..]),
		};

		assert!(
			signer
				.header_at(&get, TS, NONCE)
				.expect("Signing should succeed.")
				.ends_with("mac=\"KqOejc9yo2NAQlM29iSeYQEzwmE=\"")
		);

		let header = signer.header_at(&post, TS, NONCE).expect("Signing should succeed.");

		assert!(header.contains("hash=\"lXEo8X7vjnRab2zfS4qKWLFIQAQ=\""));
		assert!(header.ends_with("mac=\"bkmsaQtJNgNADJ5Dk5fkWiHSyvU=\""));
	}

	#[test]
	fn nonces_differ_between_calls() {
		assert_eq!(nonce().len(), NONCE_LEN);
		assert_ne!(nonce(), nonce());
	}
}
