//! Demonstrates the assertion flow end to end against a mock token server and storage node:
//! exchange a BrowserID assertion for Hawk credentials, then list collections and page through
//! one of them.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use sync_storage_client::{
	Assertion, Credentials, RecordsQuery, RequestOptions, derive_client_state,
	reqwest::Client,
	storage::ReqwestStorageClient,
	transport::ReqwestHttpClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/sync/1.5").header_exists("x-client-state");
			then.status(200).json_body(json!({
				"id": "demo-hawk-id",
				"key": "demo-hawk-key",
				"uid": 42,
				"api_endpoint": server.url("/1.5/42"),
				"hashalg": "sha256",
				"duration": 3600,
			}));
		})
		.await;
	let collections_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.5/42/info/collections");
			then.status(200).json_body(json!({"bookmarks": 1233702554.25, "tabs": 1233702560.0}));
		})
		.await;
	let bookmarks_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.5/42/storage/bookmarks");
			then.status(200)
				.header("x-weave-next-offset", "page-2")
				.json_body(json!(["menu", "toolbar"]));
		})
		.await;
	let credentials = Credentials::builder()
		.assertion(Assertion::new("demo-assertion"))
		.client_state(derive_client_state(b"demo sync key"))
		.token_server(Url::parse(&server.base_url())?)
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestStorageClient::connect_with(credentials, http_client).await?;
	let collections = client.info_collections(RequestOptions::default()).await?;
	let page = client
		.get_records_page(
			"Bookmarks",
			&RecordsQuery::default().full(false).limit(2),
			RequestOptions::default(),
		)
		.await?;

	println!("user {} has collections {collections}", client.user_id);
	println!("first bookmark ids {}; next offset {:?}", page.records, page.next_offset);

	token_mock.assert_async().await;
	collections_mock.assert_async().await;
	bookmarks_mock.assert_async().await;

	Ok(())
}
