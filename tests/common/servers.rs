//! Service fixtures
//!
//! Every store fixture gets its own in-memory SQLite database, so tests never
//! share users.

use std::net::SocketAddr;
use std::time::Duration;

use axum_test::TestServer;
use credgate::gateway::{self, GatewayState, LoginService, TokenIssuer, UserServiceClient};
use credgate::store::{self, CredentialStore, Database, PasswordHasher, StoreState};
use reqwest::Url;
use tokio::net::TcpListener;

/// Secret shared by every test gateway
pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Token lifetime of every test gateway
pub const TEST_TTL: Duration = Duration::from_secs(1800);

/// Store state over a fresh, migrated in-memory database
pub async fn memory_store() -> StoreState {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    db.migrate().await.expect("Failed to run migrations");

    let credentials = CredentialStore::with_hasher(db, PasswordHasher::with_cost(4));
    StoreState::new(credentials, Duration::from_secs(5))
}

/// In-process store server (both route sets)
pub fn store_server(state: StoreState) -> TestServer {
    TestServer::new(store::create_app(state)).expect("Failed to build store test server")
}

/// Serve the store on an ephemeral port until the test ends
pub async fn spawn_store(state: StoreState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(store::server::serve_on(
        state,
        listener,
        None,
        std::future::pending(),
    ));
    addr
}

/// Serve the store split across a public and an internal port
pub async fn spawn_split_store(state: StoreState) -> (SocketAddr, SocketAddr) {
    let public = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let internal = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addrs = (public.local_addr().unwrap(), internal.local_addr().unwrap());
    tokio::spawn(store::server::serve_on(
        state,
        public,
        Some(internal),
        std::future::pending(),
    ));
    addrs
}

/// Gateway state pointing at `base_url`
pub fn gateway_state(base_url: &str, upstream_timeout: Duration) -> GatewayState {
    let client = UserServiceClient::new(Url::parse(base_url).unwrap(), upstream_timeout).unwrap();
    let issuer = TokenIssuer::new(TEST_SECRET, TEST_TTL).unwrap();
    GatewayState::new(LoginService::new(client, issuer))
}

/// In-process gateway server
pub fn gateway_server(state: GatewayState) -> TestServer {
    TestServer::new(gateway::create_app(state)).expect("Failed to build gateway test server")
}

/// Issuer matching the test gateways, for checking their tokens
pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, TEST_TTL).unwrap()
}

/// A URL on which nothing is listening
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
