//! Hawk-signed storage client mapping the Sync 1.5 REST surface onto typed calls.
//!
//! Every operation issues exactly one HTTP request against `{api_endpoint}/{path}`, signs it
//! with the session's Hawk credentials, and decodes the JSON answer. Non-2xx answers (and
//! `304 Not Modified`) surface as [`Error::Http`] carrying the status, reason, and URL.

pub mod options;
pub mod query;
pub mod record;
pub mod response;

pub use options::*;
pub use query::*;
pub use record::Record;
pub use response::*;

// crates.io
use http::{HeaderValue, Method, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, HawkCredentials, SessionDescriptor, UserId},
	config,
	error::{ConfigError, HttpError},
	obs::{self, Operation, OperationSpan, Outcome},
	sign::{HawkSigner, RequestSigner, SigningRequest},
	tokenserver::TokenServerClient,
	transport::{HttpRequest, HttpTransport},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Storage client specialized for the crate's default reqwest transport.
pub type ReqwestStorageClient = StorageClient<ReqwestHttpClient>;

/// Signed client for one user's storage node.
pub struct StorageClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Storage user identifier.
	pub user_id: UserId,
	/// Base URL every path is joined onto.
	pub api_endpoint: Url,
	/// HTTP transport.
	pub http_client: Arc<C>,
	credentials: HawkCredentials,
	signer: Arc<dyn RequestSigner>,
}
impl<C> StorageClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Builds a client from either credential mode.
	///
	/// [`Credentials::FromAssertion`] performs one token server exchange over `http_client`;
	/// [`Credentials::Direct`] makes no network call.
	pub async fn connect_with(
		credentials: Credentials,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let http_client = http_client.into();
		let session = match credentials {
			Credentials::FromAssertion { assertion, client_state, token_server, duration } =>
				TokenServerClient::<C>::with_http_client(token_server, Arc::clone(&http_client))
					.negotiate(&assertion, &client_state, duration)
					.await?,
			Credentials::Direct(session) => session,
		};

		Ok(Self::from_session(session, http_client)?)
	}

	/// Adopts a session descriptor without any network call.
	pub fn from_session(
		session: SessionDescriptor,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		let credentials = session.hawk_credentials()?;

		Ok(Self {
			user_id: session.uid,
			api_endpoint: session.api_endpoint,
			http_client: http_client.into(),
			signer: Arc::new(HawkSigner::new(credentials.clone())),
			credentials,
		})
	}

	/// Replaces the default Hawk signer.
	pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
		self.signer = signer;

		self
	}

	/// Hawk credentials adopted from the session.
	pub fn credentials(&self) -> &HawkCredentials {
		&self.credentials
	}

	/// Joins `path` onto the endpoint with exactly one slash and appends `query` in order.
	pub fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
		let raw = format!(
			"{}/{}",
			self.api_endpoint.as_str().trim_end_matches('/'),
			path.trim_start_matches('/')
		);
		let mut url = config::parse_url(&raw)?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		Ok(url)
	}

	/// Sends a signed request to `path` and decodes the JSON answer.
	pub async fn request(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
		options: RequestOptions,
	) -> Result<Value> {
		Ok(self.request_raw(method, path, body, options).await?.body)
	}

	/// Like [`StorageClient::request`] but also returns the storage headers.
	pub async fn request_raw(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
		options: RequestOptions,
	) -> Result<StorageResponse> {
		self.dispatch(Operation::Request, method, path, Vec::new(), body, options).await
	}

	/// `GET /info/collections`: collection name to last-modified timestamp.
	pub async fn info_collections(&self, options: RequestOptions) -> Result<Value> {
		self.call(Operation::InfoCollections, Method::GET, "/info/collections", options).await
	}

	/// `GET /info/quota`: `[used, quota]` in KB.
	pub async fn info_quota(&self, options: RequestOptions) -> Result<Value> {
		self.call(Operation::InfoQuota, Method::GET, "/info/quota", options).await
	}

	/// `GET /info/collection_usage`: collection name to size in KB.
	pub async fn collection_usage(&self, options: RequestOptions) -> Result<Value> {
		self.call(Operation::CollectionUsage, Method::GET, "/info/collection_usage", options).await
	}

	/// `GET /info/collection_counts`: collection name to item count.
	pub async fn collection_counts(&self, options: RequestOptions) -> Result<Value> {
		self.call(Operation::CollectionCounts, Method::GET, "/info/collection_counts", options)
			.await
	}

	/// `DELETE /`: removes every collection for the user.
	pub async fn delete_all_records(&self, options: RequestOptions) -> Result<Value> {
		self.call(Operation::DeleteAllRecords, Method::DELETE, "/", options).await
	}

	/// `GET /storage/{collection}` with the listing filters in `query`.
	pub async fn get_records(
		&self,
		collection: &str,
		query: &RecordsQuery,
		options: RequestOptions,
	) -> Result<Value> {
		Ok(self.list(Operation::GetRecords, collection, query, options).await?.body)
	}

	/// Like [`StorageClient::get_records`] but also returns the `X-Weave-Next-Offset` token.
	pub async fn get_records_page(
		&self,
		collection: &str,
		query: &RecordsQuery,
		options: RequestOptions,
	) -> Result<RecordsPage> {
		Ok(self.list(Operation::GetRecords, collection, query, options).await?.into())
	}

	/// `GET /storage/{collection}/{id}`.
	pub async fn get_record(
		&self,
		collection: &str,
		id: impl Display,
		options: RequestOptions,
	) -> Result<Value> {
		let path = record_path(collection, id);

		self.call(Operation::GetRecord, Method::GET, &path, options).await
	}

	/// `DELETE /storage/{collection}/{id}`.
	pub async fn delete_record(
		&self,
		collection: &str,
		id: impl Display,
		options: RequestOptions,
	) -> Result<Value> {
		let path = record_path(collection, id);

		self.call(Operation::DeleteRecord, Method::DELETE, &path, options).await
	}

	/// `PUT /storage/{collection}/{record.id}` with the record minus its `id` as the body.
	///
	/// The caller's record is not modified.
	pub async fn put_record(
		&self,
		collection: &str,
		record: &Record,
		options: RequestOptions,
	) -> Result<Value> {
		const OP: Operation = Operation::PutRecord;

		let (id, body) = match record::split_record(record) {
			Ok(parts) => parts,
			Err(e) => {
				obs::record_outcome(OP, Outcome::Attempt);
				obs::record_outcome(OP, Outcome::Failure);

				return Err(e.into());
			},
		};
		let path = record_path(collection, id);

		Ok(self
			.dispatch(OP, Method::PUT, &path, Vec::new(), Some(Value::Object(body)), options)
			.await?
			.body)
	}

	/// Batch upload. Not implemented: always fails without touching the network.
	pub async fn post_records(
		&self,
		collection: &str,
		records: &[Record],
		options: RequestOptions,
	) -> Result<Value> {
		const OP: Operation = Operation::PostRecords;

		let _ = (collection, records, options);

		obs::record_outcome(OP, Outcome::Attempt);
		obs::record_outcome(OP, Outcome::Failure);

		Err(Error::Unsupported { operation: OP.as_str() })
	}

	async fn call(
		&self,
		operation: Operation,
		method: Method,
		path: &str,
		options: RequestOptions,
	) -> Result<Value> {
		Ok(self.dispatch(operation, method, path, Vec::new(), None, options).await?.body)
	}

	async fn list(
		&self,
		operation: Operation,
		collection: &str,
		query: &RecordsQuery,
		options: RequestOptions,
	) -> Result<StorageResponse> {
		let path = format!("/storage/{}", collection.to_lowercase());

		self.dispatch(operation, Method::GET, &path, query.to_query_pairs(), None, options).await
	}

	async fn dispatch(
		&self,
		operation: Operation,
		method: Method,
		path: &str,
		mut query: Vec<(String, String)>,
		body: Option<Value>,
		options: RequestOptions,
	) -> Result<StorageResponse> {
		let span = OperationSpan::new(operation, "dispatch");

		obs::record_outcome(operation, Outcome::Attempt);

		let result = span
			.instrument(async {
				let mut headers = options.header_map()?;
				let RequestOptions { query: extra_query, body_fields, timeout, .. } = options;

				query.extend(extra_query);

				let url = self.url_for(path, &query)?;
				let body = options::merge_body(body, body_fields)
					.map(|value| serde_json::to_vec(&value))
					.transpose()
					.map_err(ConfigError::BodyEncode)?;

				if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
					headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
				}

				let headers = self.signer.sign(&SigningRequest {
					method: &method,
					url: &url,
					headers: &headers,
					body: body.as_deref(),
				})?;

				span.dispatch(&method, &url);

				let response = self
					.http_client
					.execute(HttpRequest { method, url, headers, body, timeout })
					.await?;

				obs::record_status(operation, response.status.as_u16());

				if !response.is_success() {
					return Err(HttpError::from_response(&response).into());
				}

				Ok(StorageResponse {
					body: response.json()?,
					metadata: ResponseMetadata::from_response(&response),
				})
			})
			.await;

		obs::record_outcome(operation, Outcome::of(&result));

		result
	}
}
#[cfg(feature = "reqwest")]
impl StorageClient<ReqwestHttpClient> {
	/// Builds a client over a fresh reqwest transport.
	pub async fn connect(credentials: Credentials) -> Result<Self> {
		Self::connect_with(credentials, ReqwestHttpClient::default()).await
	}
}
impl<C> Clone for StorageClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			user_id: self.user_id.clone(),
			api_endpoint: self.api_endpoint.clone(),
			http_client: Arc::clone(&self.http_client),
			credentials: self.credentials.clone(),
			signer: Arc::clone(&self.signer),
		}
	}
}
impl<C> Debug for StorageClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StorageClient")
			.field("user_id", &self.user_id)
			.field("api_endpoint", &self.api_endpoint)
			.field("credentials", &self.credentials)
			.finish()
	}
}

fn record_path(collection: &str, id: impl Display) -> String {
	format!("/storage/{}/{id}", collection.to_lowercase())
}
