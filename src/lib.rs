//! Typed async client for the TestRail API v2.
//!
//! Every operation funnels through one engine: build the endpoint path, send
//! a single request, then classify the reply. Expected failures (bad input,
//! auth, missing entities, server errors) come back as an [`Outcome`] or
//! [`MutationResult`] carrying a [`StatusCode`]; only failures the client
//! cannot classify escape as [`ClientError`].
//!
//! ```rust,no_run
//! use testrail_client::{ClientConfig, TestRailClient};
//! use testrail_client::models::Run;
//!
//! # async fn demo() -> Result<(), testrail_client::ClientError> {
//! let config = ClientConfig::new("https://acme.testrail.io", "qa@acme.io", "api-key");
//! let client = TestRailClient::new(&config)?;
//!
//! let run = Run {
//!     suite_id: Some(4),
//!     case_ids: Some(vec![10, 20]),
//!     ..Run::named("Nightly")
//! };
//! let created = client.add_run(1, &run, None).await?;
//! if !created.succeeded {
//!     eprintln!("run rejected: {}", created.status);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod http;
pub mod models;
pub mod outcome;
pub mod payload;
pub mod testing;
mod validate;

pub use client::TestRailClient;
pub use config::ClientConfig;
pub use engine::uri::{Command, Resource, Verb};
pub use error::{ClientError, Fault, TransportFault};
pub use events::EngineEvent;
pub use http::{ReqwestTransport, Transport};
pub use outcome::{MutationResult, Outcome, StatusCode};
