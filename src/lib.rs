//! # Cachenode
//!
//! Client-side caching-capability negotiation for node-based editors: ask the
//! host server whether a node type may become caching, remember the answer for
//! the session, and reflect it on every live instance of that type.
//!
//! ## Features
//!
//! - **Explicit registry**: per-type capability lives in an injectable
//!   [`CapabilityRegistry`], not ambient global state
//! - **Guarded negotiation**: one conversion request per type at a time; a
//!   second invocation while one is in flight is a no-op
//! - **Composed decoration**: titles gain their `" (caching)"` suffix through
//!   a [`TitleProvider`] decorator installed once per instance
//! - **Pluggable authority**: the server sits behind the [`Authority`] trait,
//!   so tests run against scripted in-memory authorities
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cachenode::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), cachenode::AuthorityError> {
//! let registry = CapabilityRegistry::new();
//! let authority = Arc::new(HttpAuthority::new());
//! let controller = ConversionController::new(registry, authority);
//!
//! // Host setup hook, once per node type.
//! controller.setup_type("ImageBlur").await?;
//!
//! // Host creation hook, once per node placed on the canvas.
//! let mut graph = Graph::new();
//! let mut node = NodeInstance::new("ImageBlur", StaticTitle::new("Image Blur"));
//! controller.node_created(&mut node);
//! graph.add(node);
//!
//! // Menu-click handler.
//! if controller.convert("ImageBlur", &graph).await? == ConversionOutcome::Granted {
//!     assert!(graph.nodes().all(|n| n.title().ends_with("(caching)")));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`authority`]: the remote authority contract and its HTTP client
//! - [`prelude`]: commonly used types (import with `use cachenode::prelude::*`)

// ============================================================================
// Core Module
// ============================================================================

mod core;

pub mod authority;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

// Authority client
pub use authority::{Authority, AuthorityError, HttpAuthority, HttpAuthorityConfig};

// Registry
pub use core::registry::{CapabilityRegistry, TypeState};

// Graph model and title decoration
pub use core::node::{
    CACHING_SUFFIX, CachingTitle, Graph, InstanceFlag, NodeInstance, StaticTitle, TitleProvider,
};

// Menu contribution
pub use core::menu::{CONVERT_LABEL, MenuAction, MenuContributor, MenuEntry};

// Controller
pub use core::controller::{ConversionController, ConversionOutcome};

// ============================================================================
// Prelude Module - Convenient Bulk Imports
// ============================================================================

/// The prelude: imports everything needed to wire the extension into a host.
///
/// # Example
/// ```rust
/// use cachenode::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        // Authority
        Authority,
        AuthorityError,
        // Registry
        CapabilityRegistry,
        CachingTitle,
        // Controller
        ConversionController,
        ConversionOutcome,
        // Graph model
        Graph,
        HttpAuthority,
        HttpAuthorityConfig,
        InstanceFlag,
        // Menu
        MenuAction,
        MenuContributor,
        MenuEntry,
        NodeInstance,
        StaticTitle,
        TitleProvider,
        TypeState,
    };
}

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
