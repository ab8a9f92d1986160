//! The conversion controller: per-type capability negotiation and fan-out

use std::sync::Arc;

use crate::authority::{Authority, AuthorityError};
use crate::core::menu::{MenuContributor, MenuEntry};
use crate::core::node::{Graph, NodeInstance};
use crate::core::registry::CapabilityRegistry;

/// Outcome of a conversion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The authority granted the conversion; the type is now caching.
    Granted,
    /// The authority declined; the type stays unconverted and the action can
    /// be retried.
    Denied,
    /// The type was already caching; no request was issued.
    AlreadyCaching,
    /// A conversion request for this type is still in flight; no second
    /// request was issued.
    RequestInFlight,
}

/// Drives the per-type conversion state machine.
///
/// One controller serves the whole session and is the only component that
/// mutates the registry. It plugs into the host's two lifecycle hooks
/// ([`setup_type`](Self::setup_type) and [`node_created`](Self::node_created))
/// and handles the conversion menu action ([`convert`](Self::convert)).
#[derive(Clone)]
pub struct ConversionController {
    registry: CapabilityRegistry,
    authority: Arc<dyn Authority>,
}

impl ConversionController {
    pub fn new(registry: CapabilityRegistry, authority: Arc<dyn Authority>) -> Self {
        ConversionController {
            registry,
            authority,
        }
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Per-type setup hook, invoked once before a type becomes usable.
    ///
    /// Queries the authority; an affirmative answer marks the type caching
    /// immediately, so the conversion menu entry is never offered for it.
    /// Returns whether the type is caching after the hook. On failure the
    /// type stays unconverted and no state is mutated.
    pub async fn setup_type(&self, type_id: &str) -> Result<bool, AuthorityError> {
        if self.registry.is_caching(type_id) {
            return Ok(true);
        }

        match self.authority.query(type_id).await {
            Ok(true) => {
                self.registry.mark_caching(type_id);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                log::warn!("Capability query for {} failed: {}", type_id, e);
                Err(e)
            }
        }
    }

    /// Per-instance creation hook, invoked once per node placed on the canvas.
    ///
    /// Installs the title decorator and seeds the instance flag from the
    /// registry, so an instance of an already-caching type shows the suffix
    /// from its first render without a server round-trip.
    pub fn node_created(&self, node: &mut NodeInstance) {
        node.decorate_title();
        if self.registry.is_caching(node.type_id()) {
            node.set_caching();
        }
    }

    /// Issues a conversion request for a node type and, on grant, fans the
    /// flag out to every instance of that type currently in the graph.
    ///
    /// Denials and transport failures leave all state untouched and the
    /// action safely retryable; a transport failure is returned to the caller
    /// to decide on UI feedback. Invoking again while a request is in flight
    /// is a no-op.
    pub async fn convert(
        &self,
        type_id: &str,
        graph: &Graph,
    ) -> Result<ConversionOutcome, AuthorityError> {
        if self.registry.is_caching(type_id) {
            return Ok(ConversionOutcome::AlreadyCaching);
        }
        if !self.registry.begin_request(type_id) {
            return Ok(if self.registry.is_caching(type_id) {
                ConversionOutcome::AlreadyCaching
            } else {
                ConversionOutcome::RequestInFlight
            });
        }

        match self.authority.convert(type_id).await {
            Ok(true) => {
                self.registry.mark_caching(type_id);
                for node in graph.nodes_of_type(type_id) {
                    node.set_caching();
                }
                Ok(ConversionOutcome::Granted)
            }
            Ok(false) => {
                self.registry.end_request(type_id);
                log::debug!("Conversion of {} declined by the host", type_id);
                Ok(ConversionOutcome::Denied)
            }
            Err(e) => {
                self.registry.end_request(type_id);
                log::warn!("Failed to convert {}: {}", type_id, e);
                Err(e)
            }
        }
    }
}

impl MenuContributor for ConversionController {
    /// Offers "Convert to caching" only while the instance's local flag is
    /// unset and its type has not been converted.
    fn extra_menu_options(&self, node: &NodeInstance) -> Vec<MenuEntry> {
        if node.is_caching() || self.registry.is_caching(node.type_id()) {
            return Vec::new();
        }
        vec![MenuEntry::convert_to_caching(node.type_id())]
    }
}
