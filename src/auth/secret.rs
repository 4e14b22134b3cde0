//! Key material that must never reach logs.

// self
use crate::_prelude::*;

/// Hawk MAC key or assertion text, redacted in every formatter.
///
/// Serialization is transparent so session descriptors round-trip through the token server's
/// JSON unchanged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	/// Wraps key material.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the text. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns the raw bytes fed to the MAC.
	pub fn as_bytes(&self) -> &[u8] {
		self.0.as_bytes()
	}

	/// Whether no material was supplied.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Secret({} bytes)", self.0.len())
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
