mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::Duration;
// self
use sync_storage_client::{
	Assertion, ClientState, Credentials, Error, StorageClient,
	auth::UserId,
	http::StatusCode,
	storage::ReqwestStorageClient,
	url::Url,
};

use common::RecordingTransport;

fn client_state() -> ClientState {
	ClientState::new("150f31b9371fc568c3db43cec037ad02")
		.expect("Fixture client state should validate.")
}

fn token_body(server: &MockServer) -> serde_json::Value {
	json!({
		"id": "hawk-id",
		"key": "hawk-key",
		"uid": 42,
		"api_endpoint": server.url("/1.5/42"),
		"hashalg": "sha256",
		"duration": 3600,
	})
}

#[tokio::test]
async fn negotiate_sends_browserid_and_client_state() {
	let server = MockServer::start_async().await;
	let body = token_body(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/1.0/sync/1.5")
				.header("authorization", "BrowserID bid-assertion")
				.header("x-client-state", "150f31b9371fc568c3db43cec037ad02");
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await;
	let session = common::reqwest_token_server(&server)
		.negotiate(&Assertion::new("bid-assertion"), &client_state(), None)
		.await
		.expect("Token exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(session.uid, UserId::Numeric(42));
	assert_eq!(session.id, "hawk-id");
	assert_eq!(session.key.expose(), "hawk-key");
	assert_eq!(session.hashalg, "sha256");
	assert_eq!(session.duration, Some(3600));
	assert_eq!(session.api_endpoint.as_str(), server.url("/1.5/42"));
}

#[tokio::test]
async fn negotiate_forwards_requested_duration() {
	let server = MockServer::start_async().await;
	let body = token_body(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/sync/1.5").query_param("duration", "300");
			then.status(200).json_body(body);
		})
		.await;

	common::reqwest_token_server(&server)
		.negotiate(&Assertion::new("bid-assertion"), &client_state(), Some(Duration::seconds(300)))
		.await
		.expect("Token exchange with duration should succeed.");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn negotiate_maps_rejection_to_remote_auth() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/sync/1.5");
			then.status(401).json_body(json!({"status": "invalid-credentials"}));
		})
		.await;
	let err = common::reqwest_token_server(&server)
		.negotiate(&Assertion::new("expired"), &client_state(), None)
		.await
		.expect_err("A rejected assertion must fail.");

	mock.assert_calls_async(1).await;

	assert!(matches!(err, Error::RemoteAuth(_)));
	assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn negotiate_reports_malformed_body_as_decode_error() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/sync/1.5");
			then.status(200).json_body(json!({"id": "hawk-id"}));
		})
		.await;

	let err = common::reqwest_token_server(&server)
		.negotiate(&Assertion::new("bid-assertion"), &client_state(), None)
		.await
		.expect_err("A body without storage credentials must fail.");

	assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn assertion_mode_negotiates_once_then_signs_storage_calls() {
	let server = MockServer::start_async().await;
	let body = token_body(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/sync/1.5");
			then.status(200).json_body(body);
		})
		.await;
	let collections = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.5/42/info/collections").header_exists("authorization");
			then.status(200).json_body(json!({"bookmarks": 1233702554.25}));
		})
		.await;
	let credentials = Credentials::builder()
		.assertion(Assertion::new("bid-assertion"))
		.client_state(client_state())
		.token_server(common::token_server_url(&server))
		.build()
		.expect("Assertion credentials should build.");
	let client = ReqwestStorageClient::connect_with(credentials, common::test_reqwest_http_client())
		.await
		.expect("Client should connect.");
	let body = client
		.info_collections(Default::default())
		.await
		.expect("info/collections should succeed.");

	token.assert_calls_async(1).await;
	collections.assert_calls_async(1).await;

	assert_eq!(client.user_id, UserId::Numeric(42));
	assert_eq!(body, json!({"bookmarks": 1233702554.25}));
}

#[tokio::test]
async fn direct_mode_makes_no_network_call() {
	let transport = std::sync::Arc::new(RecordingTransport::new(StatusCode::OK, "{}"));
	let credentials = Credentials::direct(common::session(
		Url::parse("https://sync-1.example.com/1.5/42").expect("Fixture endpoint should parse."),
	));
	let client = StorageClient::<RecordingTransport>::connect_with(credentials, transport.clone())
		.await
		.expect("Direct credentials should be adopted.");

	assert_eq!(transport.calls(), 0);
	assert_eq!(client.api_endpoint.as_str(), "https://sync-1.example.com/1.5/42");
	assert_eq!(client.credentials().id, common::HAWK_ID);
}
