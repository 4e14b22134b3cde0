//! Async client for the Firefox Sync 1.5 storage service: trade an identity assertion for
//! short-lived Hawk credentials at the token server, then read and write Basic Storage Objects
//! through signed requests against the per-user storage endpoint.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod obs;
pub mod sign;
pub mod storage;
pub mod tokenserver;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests that talk to `httpmock` servers; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::SessionDescriptor,
		storage::{ReqwestStorageClient, StorageClient},
		tokenserver::{ReqwestTokenServerClient, TokenServerClient},
		transport::ReqwestHttpClient,
	};

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock`.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Token server client over [`test_reqwest_http_client`].
	pub fn build_reqwest_test_token_server(server_url: Url) -> ReqwestTokenServerClient {
		TokenServerClient::with_http_client(server_url, test_reqwest_http_client())
	}

	/// Storage client adopting `session` over [`test_reqwest_http_client`].
	pub fn build_reqwest_test_storage_client(session: SessionDescriptor) -> ReqwestStorageClient {
		StorageClient::<ReqwestHttpClient>::from_session(session, test_reqwest_http_client())
			.expect("Test session should use a supported hash algorithm.")
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};

pub use crate::{
	auth::{
		Assertion, ClientState, Credentials, CredentialsBuilder, HawkCredentials, SessionDescriptor,
		derive_client_state,
	},
	config::{DEFAULT_IDENTITY_PROVIDER_URL, DEFAULT_TOKEN_SERVER_URL, ServiceEndpoints},
	error::{ConfigError, Error, HttpError, Result},
	identity::{AccountKeys, IdentityProvider, IdentitySession, trade_assertion},
	storage::{
		Record, RecordsPage, RecordsQuery, RequestOptions, ResponseMetadata, SortOrder,
		StorageClient, StorageResponse,
	},
	tokenserver::TokenServerClient,
};
