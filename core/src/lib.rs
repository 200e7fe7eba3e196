//! Synchronous client for repository tag protection rules.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values; a pluggable
//! `Transport` performs the actual round-trip. `UreqTransport` is the default,
//! and tests substitute scripted transports without touching the network.
//!
//! # Design
//! - `ApiClient` is the generic layer: URL joining, default headers, JSON
//!   encoding, status mapping. It holds configuration and a transport, and no
//!   mutable state.
//! - `RepositoriesService` maps list / create / delete onto
//!   `repos/{owner}/{repo}/tags/protection[/{id}]` and nothing else.
//! - Successful calls return the decoded value plus `Response` metadata
//!   (status and headers). Failures after a response arrived carry the same
//!   metadata inside `ApiError`.
//!
//! ```no_run
//! use tag_protection::{ApiClient, ClientConfig};
//!
//! let client = ApiClient::from_config(ClientConfig::from_env()?);
//! let (rule, _) = client.repositories().create_tag_protection("octo", "hello", "v*")?;
//! let (rules, meta) = client.repositories().list_tag_protection("octo", "hello")?;
//! println!("{} rules, status {}", rules.len(), meta.status);
//! if let Some(id) = rule.id {
//!     client.repositories().delete_tag_protection("octo", "hello", id)?;
//! }
//! # Ok::<(), tag_protection::ApiError>(())
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod repos;
pub mod transport;
pub mod types;

pub use client::{ApiClient, ClientConfig};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Rate, Response};
pub use repos::RepositoriesService;
pub use transport::{Transport, UreqTransport};
pub use types::{TagProtection, TagProtectionRequest};
