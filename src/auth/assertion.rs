//! Identity assertions and the client-state fingerprint sent alongside them.

// crates.io
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, auth::Secret, error::ConfigError, transport};

const CLIENT_STATE_BYTES: usize = 16;

/// Opaque identity proof issued by the identity provider; never inspected locally.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assertion(Secret);
impl Assertion {
	/// Wraps assertion text.
	pub fn new(value: impl Into<String>) -> Self {
		Self(Secret::new(value))
	}

	/// Wraps assertion bytes, replacing invalid UTF-8 sequences.
	pub fn from_bytes(value: &[u8]) -> Self {
		Self::new(transport::header_text(value))
	}

	/// Returns the raw assertion. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		self.0.expose()
	}

	/// Formats the `Authorization` header value expected by the token server.
	pub fn authorization(&self) -> String {
		format!("BrowserID {}", self.expose())
	}
}
impl Debug for Assertion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Assertion").field(&"<redacted>").finish()
	}
}

/// Hex fingerprint of the account's sync key, sent as `X-Client-State`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientState(String);
impl ClientState {
	/// Validates caller-supplied client state text.
	pub fn new(value: impl AsRef<str>) -> Result<Self, ConfigError> {
		let view = value.as_ref();

		if view.is_empty() || !view.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(ConfigError::InvalidClientState);
		}

		Ok(Self(view.to_owned()))
	}

	/// Returns the hex text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ClientState {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<ClientState> for String {
	fn from(value: ClientState) -> Self {
		value.0
	}
}
impl TryFrom<String> for ClientState {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for ClientState {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for ClientState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ClientState({})", self.0)
	}
}
impl Display for ClientState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Derives the client state from raw `kB` key material: `hex(sha256(kB)[0..16])`.
///
/// The storage service recomputes the same value, so the output is part of the wire
/// contract and must stay byte-for-byte stable.
pub fn derive_client_state(key_material: &[u8]) -> ClientState {
	let digest = Sha256::digest(key_material);

	ClientState(hex::encode(&digest[..CLIENT_STATE_BYTES]))
}
