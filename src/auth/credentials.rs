//! Storage credentials and the two mutually exclusive ways of obtaining them.

// self
use crate::{
	_prelude::*,
	auth::{Assertion, ClientState, Secret},
	config::ServiceEndpoints,
	error::ConfigError,
};

/// Keys a directly supplied credential set must carry, in wire order.
pub const DIRECT_CREDENTIAL_KEYS: [&str; 5] = ["uid", "api_endpoint", "hashalg", "id", "key"];

/// MAC algorithms defined by Hawk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
	/// HMAC-SHA1, still accepted by older deployments.
	Sha1,
	#[default]
	/// HMAC-SHA256, what the token server hands out.
	Sha256,
}
impl HashAlgorithm {
	/// Returns the label used by the token server.
	pub const fn as_str(self) -> &'static str {
		match self {
			HashAlgorithm::Sha1 => "sha1",
			HashAlgorithm::Sha256 => "sha256",
		}
	}
}
impl Display for HashAlgorithm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HashAlgorithm {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"sha1" => Ok(Self::Sha1),
			"sha256" => Ok(Self::Sha256),
			_ => Err(ConfigError::UnsupportedHashAlgorithm { algorithm: s.to_owned() }),
		}
	}
}

/// Storage user identifier; the token server emits it as a number.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
	/// Numeric identifier.
	Numeric(u64),
	/// Textual identifier.
	Text(String),
}
impl From<u64> for UserId {
	fn from(value: u64) -> Self {
		Self::Numeric(value)
	}
}
impl From<&str> for UserId {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for UserId {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl Debug for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "UserId({self})")
	}
}
impl Display for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Numeric(value) => write!(f, "{value}"),
			Self::Text(value) => f.write_str(value),
		}
	}
}

/// Hawk credentials used to sign every storage request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HawkCredentials {
	/// MAC algorithm.
	pub algorithm: HashAlgorithm,
	/// Hawk key identifier.
	pub id: String,
	/// Shared MAC key.
	pub key: Secret,
}
impl HawkCredentials {
	/// Creates credentials from already-parsed parts.
	pub fn new(algorithm: HashAlgorithm, id: impl Into<String>, key: impl Into<String>) -> Self {
		Self { algorithm, id: id.into(), key: Secret::new(key) }
	}
}

/// Credentials issued by the token server for one storage node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
	/// Storage user identifier.
	pub uid: UserId,
	/// Base URL of the user's storage endpoint.
	pub api_endpoint: Url,
	/// Hawk MAC algorithm label (`sha256`).
	pub hashalg: String,
	/// Hawk key identifier.
	pub id: String,
	/// Hawk MAC key.
	pub key: Secret,
	/// Lifetime of the credentials in seconds, when reported.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub duration: Option<u64>,
	/// Hashed account identifier, when reported.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hashed_fxa_uid: Option<String>,
}
impl SessionDescriptor {
	/// Creates a descriptor from the five required fields.
	pub fn new(
		uid: impl Into<UserId>,
		api_endpoint: Url,
		hashalg: impl Into<String>,
		id: impl Into<String>,
		key: impl Into<String>,
	) -> Self {
		Self {
			uid: uid.into(),
			api_endpoint,
			hashalg: hashalg.into(),
			id: id.into(),
			key: Secret::new(key),
			duration: None,
			hashed_fxa_uid: None,
		}
	}

	/// Parses the Hawk credentials carried by the descriptor.
	pub fn hawk_credentials(&self) -> Result<HawkCredentials, ConfigError> {
		Ok(HawkCredentials {
			algorithm: self.hashalg.parse()?,
			id: self.id.clone(),
			key: self.key.clone(),
		})
	}
}

/// The two accepted ways of building a storage client.
#[derive(Clone, Debug)]
pub enum Credentials {
	/// Exchange an identity assertion at the token server.
	FromAssertion {
		/// Identity assertion whose audience is the token server.
		assertion: Assertion,
		/// Fingerprint of the account's sync key.
		client_state: ClientState,
		/// Token server base URL.
		token_server: Url,
		/// Requested credential lifetime.
		duration: Option<Duration>,
	},
	/// Adopt credentials obtained earlier.
	Direct(SessionDescriptor),
}
impl Credentials {
	/// Assertion-based credentials against the default token server.
	pub fn from_assertion(assertion: Assertion, client_state: ClientState) -> Self {
		Self::FromAssertion {
			assertion,
			client_state,
			token_server: ServiceEndpoints::default().token_server,
			duration: None,
		}
	}

	/// Directly supplied credentials; no network call is made.
	pub fn direct(session: SessionDescriptor) -> Self {
		Self::Direct(session)
	}

	/// Starts a builder for loosely-typed inputs.
	pub fn builder() -> CredentialsBuilder {
		CredentialsBuilder::default()
	}
}
impl From<SessionDescriptor> for Credentials {
	fn from(session: SessionDescriptor) -> Self {
		Self::Direct(session)
	}
}

/// Builder that picks the credential mode from whichever inputs were supplied.
///
/// An assertion together with a client state selects [`Credentials::FromAssertion`];
/// otherwise every key in [`DIRECT_CREDENTIAL_KEYS`] must be present.
#[derive(Clone, Debug, Default)]
pub struct CredentialsBuilder {
	/// Identity assertion.
	pub assertion: Option<Assertion>,
	/// Client state fingerprint.
	pub client_state: Option<ClientState>,
	/// Token server override.
	pub token_server: Option<Url>,
	/// Requested credential lifetime.
	pub duration: Option<Duration>,
	/// Storage user identifier.
	pub uid: Option<UserId>,
	/// Storage endpoint.
	pub api_endpoint: Option<Url>,
	/// Hawk MAC algorithm label.
	pub hashalg: Option<String>,
	/// Hawk key identifier.
	pub id: Option<String>,
	/// Hawk MAC key.
	pub key: Option<Secret>,
}
impl CredentialsBuilder {
	/// Sets the identity assertion.
	pub fn assertion(mut self, assertion: Assertion) -> Self {
		self.assertion = Some(assertion);

		self
	}

	/// Sets the client state.
	pub fn client_state(mut self, client_state: ClientState) -> Self {
		self.client_state = Some(client_state);

		self
	}

	/// Overrides the token server URL.
	pub fn token_server(mut self, url: Url) -> Self {
		self.token_server = Some(url);

		self
	}

	/// Requests a specific credential lifetime.
	pub fn duration(mut self, duration: Duration) -> Self {
		self.duration = Some(duration);

		self
	}

	/// Sets the storage user identifier.
	pub fn uid(mut self, uid: impl Into<UserId>) -> Self {
		self.uid = Some(uid.into());

		self
	}

	/// Sets the storage endpoint.
	pub fn api_endpoint(mut self, url: Url) -> Self {
		self.api_endpoint = Some(url);

		self
	}

	/// Sets the Hawk algorithm label.
	pub fn hashalg(mut self, hashalg: impl Into<String>) -> Self {
		self.hashalg = Some(hashalg.into());

		self
	}

	/// Sets the Hawk key identifier.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());

		self
	}

	/// Sets the Hawk MAC key.
	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(Secret::new(key));

		self
	}

	/// Resolves the credential mode or reports what is missing.
	pub fn build(self) -> Result<Credentials, ConfigError> {
		if let (Some(assertion), Some(client_state)) = (self.assertion, self.client_state) {
			return Ok(Credentials::FromAssertion {
				assertion,
				client_state,
				token_server: self
					.token_server
					.unwrap_or_else(|| ServiceEndpoints::default().token_server),
				duration: self.duration,
			});
		}

		match (self.uid, self.api_endpoint, self.hashalg, self.id, self.key) {
			(Some(uid), Some(api_endpoint), Some(hashalg), Some(id), Some(key)) =>
				Ok(Credentials::Direct(SessionDescriptor {
					uid,
					api_endpoint,
					hashalg,
					id,
					key,
					duration: None,
					hashed_fxa_uid: None,
				})),
			(uid, api_endpoint, hashalg, id, key) => {
				let present = [
					uid.is_some(),
					api_endpoint.is_some(),
					hashalg.is_some(),
					id.is_some(),
					key.is_some(),
				];
				let missing = DIRECT_CREDENTIAL_KEYS
					.iter()
					.zip(present)
					.filter_map(|(name, present)| (!present).then_some(*name))
					.collect();

				Err(ConfigError::IncompleteCredentials { missing })
			},
		}
	}
}
