//! Remote authority client for caching-capability negotiation
//!
//! The host server is the single source of truth for whether a node type may
//! become caching. This module defines the [`Authority`] contract and an HTTP
//! implementation speaking the host's two capability endpoints.

pub mod error;
pub mod http;

pub use error::AuthorityError;
pub use http::{HttpAuthority, HttpAuthorityConfig};

use async_trait::async_trait;

/// A remote authority that decides caching capability per node type.
///
/// Calls are single-shot: no retry, no timeout handling, and no caching of
/// outcomes inside the client (remembering an affirmative answer is the
/// registry's job). A transport or parse failure surfaces as an error which
/// callers must treat as "not granted" without mutating any state.
#[async_trait]
pub trait Authority: Send + Sync {
    /// Ask whether the given node type is already caching-enabled server-side.
    async fn query(&self, type_id: &str) -> Result<bool, AuthorityError>;

    /// Ask the server to grant conversion to caching for the given node type.
    async fn convert(&self, type_id: &str) -> Result<bool, AuthorityError>;
}
