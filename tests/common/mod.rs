//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests:
//! a stub gateway standing in for the backend microservices, a TestServer
//! that runs the real ranking server against it, and an HTTP client wrapper.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{GatewayFixtures, TestClient, TestServer};
//!
//! #[tokio::test]
//! async fn test_ranking() {
//!     let mut fixtures = GatewayFixtures::new();
//!     fixtures.song_review("r1", "s1", 5, 0);
//!     let server = TestServer::spawn(fixtures).await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.get_ranking("mostCommented").await;
//!     assert_eq!(response.status(), reqwest::StatusCode::OK);
//! }
//! ```

// Each e2e binary compiles this module separately and uses a different
// subset of it.
#![allow(dead_code)]

mod client;
mod constants;
mod fixtures;
mod gateway;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use constants::*;
pub use fixtures::GatewayFixtures;
pub use server::TestServer;
