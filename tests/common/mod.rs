#![allow(dead_code)]

// std
use std::sync::{
	Mutex,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use http::{HeaderMap, StatusCode};
use httpmock::MockServer;
// self
use sync_storage_client::{
	SessionDescriptor, StorageClient,
	reqwest::Client,
	storage::ReqwestStorageClient,
	tokenserver::{ReqwestTokenServerClient, TokenServerClient},
	transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestHttpClient, TransportFuture},
	url::Url,
};

pub const HAWK_ID: &str = "hawk-id";
pub const HAWK_KEY: &str = "hawk-key";

pub fn endpoint(server: &MockServer) -> Url {
	Url::parse(&server.url("/1.5/42")).expect("Mock storage endpoint should parse.")
}

pub fn session(api_endpoint: Url) -> SessionDescriptor {
	SessionDescriptor::new(42_u64, api_endpoint, "sha256", HAWK_ID, HAWK_KEY)
}

/// Reqwest transport accepting httpmock's self-signed certificates.
///
/// Mirrors `sync_storage_client::_preludet::test_reqwest_http_client`, which is only compiled
/// with the `test` feature.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

pub fn token_server_url(server: &MockServer) -> Url {
	Url::parse(&server.base_url()).expect("Mock token server URL should parse.")
}

pub fn reqwest_token_server(server: &MockServer) -> ReqwestTokenServerClient {
	TokenServerClient::with_http_client(token_server_url(server), test_reqwest_http_client())
}

pub fn reqwest_storage_client(server: &MockServer) -> ReqwestStorageClient {
	StorageClient::<ReqwestHttpClient>::from_session(
		session(endpoint(server)),
		test_reqwest_http_client(),
	)
	.expect("Mock session should be adopted.")
}

/// Transport that records every request and answers with a canned response.
pub struct RecordingTransport {
	status: StatusCode,
	body: Vec<u8>,
	calls: AtomicUsize,
	requests: Mutex<Vec<HttpRequest>>,
}
impl RecordingTransport {
	pub fn new(status: StatusCode, body: &str) -> Self {
		Self {
			status,
			body: body.as_bytes().to_vec(),
			calls: AtomicUsize::new(0),
			requests: Mutex::new(Vec::new()),
		}
	}

	pub fn ok(body: &str) -> Self {
		Self::new(StatusCode::OK, body)
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn last_request(&self) -> HttpRequest {
		self.requests
			.lock()
			.expect("Request log should not be poisoned.")
			.last()
			.cloned()
			.expect("At least one request should have been recorded.")
	}
}
impl HttpTransport for RecordingTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.requests.lock().expect("Request log should not be poisoned.").push(request.clone());

		let response = HttpResponse {
			status: self.status,
			url: request.url,
			headers: HeaderMap::new(),
			body: self.body.clone(),
		};

		Box::pin(async move { Ok(response) })
	}
}
