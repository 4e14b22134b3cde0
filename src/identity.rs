//! Identity provider contracts and the login-to-assertion exchange.
//!
//! The crate does not speak the identity provider's protocol itself. Callers plug in an
//! [`IdentityProvider`] (a Firefox Accounts client, a test double, ...) and
//! [`trade_assertion`] drives it: log in, request an assertion scoped to the token server,
//! fetch the account keys, and derive the client state from `kB`.

// self
use crate::{
	_prelude::*,
	auth::{self, Assertion, ClientState},
	error::BoxError,
	obs::{self, Operation, OperationSpan, Outcome},
};

/// Boxed future returned by identity provider collaborators.
pub type IdentityFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, BoxError>> + 'a + Send>>;

/// Account key pair released by the identity provider after login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountKeys {
	/// `kA`, unused by the storage exchange.
	pub key_a: Vec<u8>,
	/// `kB`, the sync key the client state is derived from.
	pub key_b: Vec<u8>,
}
impl Debug for AccountKeys {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("AccountKeys(..)")
	}
}

/// Logs accounts in against an identity provider endpoint.
pub trait IdentityProvider
where
	Self: Send + Sync,
{
	/// Authenticated session type.
	type Session: IdentitySession;

	/// Logs in with email + password, requesting key material.
	fn login<'a>(
		&'a self,
		server_url: &'a Url,
		email: &'a str,
		password: &'a str,
	) -> IdentityFuture<'a, Self::Session>;
}

/// Session obtained from [`IdentityProvider::login`].
pub trait IdentitySession
where
	Self: Send + Sync,
{
	/// Issues an identity assertion for `audience`.
	fn identity_assertion<'a>(&'a self, audience: &'a Url) -> IdentityFuture<'a, Assertion>;

	/// Fetches the account key pair.
	fn fetch_keys(&self) -> IdentityFuture<'_, AccountKeys>;
}

/// Trades a login and password for an identity assertion and the client state.
///
/// The assertion's audience is `discovery_url`, the token server that will verify it. To use the
/// production endpoints (or a configured pair), call
/// [`ServiceEndpoints::trade_assertion`](crate::config::ServiceEndpoints::trade_assertion).
/// Provider failures are surfaced as [`Error::IdentityProvider`] without classification.
pub async fn trade_assertion<P>(
	provider: &P,
	login: &str,
	password: &str,
	identity_provider_url: &Url,
	discovery_url: &Url,
) -> Result<(Assertion, ClientState)>
where
	P: ?Sized + IdentityProvider,
{
	const OP: Operation = Operation::IdentityExchange;

	let span = OperationSpan::new(OP, "trade_assertion");

	obs::record_outcome(OP, Outcome::Attempt);

	let result = span
		.instrument(async {
			let session = provider
				.login(identity_provider_url, login, password)
				.await
				.map_err(|source| Error::IdentityProvider { source })?;
			let assertion = session
				.identity_assertion(discovery_url)
				.await
				.map_err(|source| Error::IdentityProvider { source })?;
			let keys =
				session.fetch_keys().await.map_err(|source| Error::IdentityProvider { source })?;

			Ok((assertion, auth::derive_client_state(&keys.key_b)))
		})
		.await;

	obs::record_outcome(OP, Outcome::of(&result));

	result
}
