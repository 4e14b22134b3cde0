//! Service endpoints used when callers do not override them.

// self
use crate::{
	_prelude::*,
	auth::{Assertion, ClientState},
	error::ConfigError,
	identity::{self, IdentityProvider},
};

/// Production token server (credential discovery) endpoint.
pub const DEFAULT_TOKEN_SERVER_URL: &str = "https://token.services.mozilla.com/";
/// Production identity provider endpoint.
pub const DEFAULT_IDENTITY_PROVIDER_URL: &str = "https://api.accounts.firefox.com";

/// Endpoint pair consulted by [`crate::identity::trade_assertion`] and the token exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
	/// Token server base URL.
	pub token_server: Url,
	/// Identity provider base URL.
	pub identity_provider: Url,
}
impl ServiceEndpoints {
	/// Parses both endpoints from text.
	pub fn parse(token_server: &str, identity_provider: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			token_server: parse_url(token_server)?,
			identity_provider: parse_url(identity_provider)?,
		})
	}

	/// Overrides the token server URL.
	pub fn with_token_server(mut self, url: Url) -> Self {
		self.token_server = url;

		self
	}

	/// Overrides the identity provider URL.
	pub fn with_identity_provider(mut self, url: Url) -> Self {
		self.identity_provider = url;

		self
	}

	/// Logs in at [`Self::identity_provider`] and trades the login for an assertion scoped to
	/// [`Self::token_server`]; see [`identity::trade_assertion`].
	pub async fn trade_assertion<P>(
		&self,
		provider: &P,
		login: &str,
		password: &str,
	) -> Result<(Assertion, ClientState)>
	where
		P: ?Sized + IdentityProvider,
	{
		identity::trade_assertion(
			provider,
			login,
			password,
			&self.identity_provider,
			&self.token_server,
		)
		.await
	}
}
impl Default for ServiceEndpoints {
	fn default() -> Self {
		Self::parse(DEFAULT_TOKEN_SERVER_URL, DEFAULT_IDENTITY_PROVIDER_URL)
			.expect("Default service endpoints must be valid URLs.")
	}
}

pub(crate) fn parse_url(value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::invalid_url(value, source))
}
