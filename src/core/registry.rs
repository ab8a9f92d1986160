//! Process-wide registry of per-type caching capability
//!
//! One registry serves a whole editor session. It is created at extension
//! initialization, handed to the controller, and dropped at session end;
//! there is no ambient global state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Conversion state of a node type.
///
/// `Caching` is terminal: within a session a type never leaves it.
/// `Requesting` marks an in-flight conversion request so a second invocation
/// can no-op instead of issuing a duplicate call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeState {
    /// No conversion granted; the menu action is offered.
    #[default]
    Idle,
    /// A conversion request is in flight.
    Requesting,
    /// The type is caching-enabled.
    Caching,
}

/// Shared registry mapping node-type identifiers to their conversion state.
///
/// Cloning is cheap and clones observe the same underlying state. A type the
/// registry has never seen reads as [`TypeState::Idle`].
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    inner: Arc<RwLock<HashMap<String, TypeState>>>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the given types already marked caching.
    ///
    /// Mirrors host deployments that pre-convert a configured list of types
    /// before any node is registered.
    pub fn seed<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let map = types
            .into_iter()
            .map(|t| (t.into(), TypeState::Caching))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns the conversion state of a type; absence reads as `Idle`.
    pub fn state(&self, type_id: &str) -> TypeState {
        self.inner
            .read()
            .unwrap()
            .get(type_id)
            .copied()
            .unwrap_or_default()
    }

    /// Returns true iff the type is caching-enabled.
    pub fn is_caching(&self, type_id: &str) -> bool {
        self.state(type_id) == TypeState::Caching
    }

    /// Marks a type as caching. Idempotent; there is no way back to `Idle`.
    pub fn mark_caching(&self, type_id: &str) {
        self.inner
            .write()
            .unwrap()
            .insert(type_id.to_string(), TypeState::Caching);
    }

    /// `Idle` -> `Requesting`. Returns false (and leaves the state untouched)
    /// from any other state.
    pub(crate) fn begin_request(&self, type_id: &str) -> bool {
        let mut map = self.inner.write().unwrap();
        let state = map.entry(type_id.to_string()).or_default();
        if *state == TypeState::Idle {
            *state = TypeState::Requesting;
            true
        } else {
            false
        }
    }

    /// `Requesting` -> `Idle`. Never downgrades `Caching`.
    pub(crate) fn end_request(&self, type_id: &str) {
        let mut map = self.inner.write().unwrap();
        if let Some(state) = map.get_mut(type_id) {
            if *state == TypeState::Requesting {
                *state = TypeState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_reads_as_idle() {
        let registry = CapabilityRegistry::new();
        assert_eq!(registry.state("Unknown"), TypeState::Idle);
        assert!(!registry.is_caching("Unknown"));
    }

    #[test]
    fn test_mark_caching_is_idempotent() {
        let registry = CapabilityRegistry::new();
        registry.mark_caching("ImageBlur");
        registry.mark_caching("ImageBlur");
        assert!(registry.is_caching("ImageBlur"));
    }

    #[test]
    fn test_clones_share_state() {
        let registry = CapabilityRegistry::new();
        let view = registry.clone();
        registry.mark_caching("ImageBlur");
        assert!(view.is_caching("ImageBlur"));
    }

    #[test]
    fn test_begin_request_only_from_idle() {
        let registry = CapabilityRegistry::new();
        assert!(registry.begin_request("ImageBlur"));
        assert_eq!(registry.state("ImageBlur"), TypeState::Requesting);
        assert!(!registry.begin_request("ImageBlur"));

        registry.end_request("ImageBlur");
        assert_eq!(registry.state("ImageBlur"), TypeState::Idle);
        assert!(registry.begin_request("ImageBlur"));
    }

    #[test]
    fn test_begin_request_refused_once_caching() {
        let registry = CapabilityRegistry::new();
        registry.mark_caching("ImageBlur");
        assert!(!registry.begin_request("ImageBlur"));
        assert_eq!(registry.state("ImageBlur"), TypeState::Caching);
    }

    #[test]
    fn test_end_request_never_downgrades_caching() {
        let registry = CapabilityRegistry::new();
        registry.begin_request("ImageBlur");
        registry.mark_caching("ImageBlur");
        registry.end_request("ImageBlur");
        assert!(registry.is_caching("ImageBlur"));
    }

    #[test]
    fn test_seeded_types_are_caching() {
        let registry = CapabilityRegistry::seed(["ImageBlur", "ImageSharpen"]);
        assert!(registry.is_caching("ImageBlur"));
        assert!(registry.is_caching("ImageSharpen"));
        assert!(!registry.is_caching("ImageInvert"));
    }
}
