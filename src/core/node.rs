//! Node instances, the open graph, and caching-aware title decoration

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

/// Suffix appended to the rendered title of a caching node.
pub const CACHING_SUFFIX: &str = " (caching)";

/// Shared per-instance caching flag.
///
/// The flag is the propagation cache for nodes already on the canvas: the
/// controller flips it when a conversion is granted so on-screen instances
/// reflect the new state without a fresh type lookup. The title decorator
/// holds a handle to the same flag and reads it on every render.
#[derive(Clone, Debug, Default)]
pub struct InstanceFlag(Arc<AtomicBool>);

impl InstanceFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    // The flag only ever goes from unset to set, matching the terminal
    // Caching state of the type it shadows.
    pub(crate) fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Produces the rendered title of a node instance.
pub trait TitleProvider: Send + Sync {
    fn title(&self) -> String;
}

/// The plain base title: a fixed string.
pub struct StaticTitle(String);

impl StaticTitle {
    pub fn new(title: impl Into<String>) -> Self {
        StaticTitle(title.into())
    }
}

impl TitleProvider for StaticTitle {
    fn title(&self) -> String {
        self.0.clone()
    }
}

/// Decorator appending [`CACHING_SUFFIX`] while the instance flag is set.
///
/// Calls through to the wrapped provider first, preserving any decoration it
/// already applies, and never caches the produced string: the flag can change
/// after installation, so the title is recomputed on every read.
pub struct CachingTitle {
    inner: Box<dyn TitleProvider>,
    flag: InstanceFlag,
}

impl CachingTitle {
    pub fn new(inner: Box<dyn TitleProvider>, flag: InstanceFlag) -> Self {
        CachingTitle { inner, flag }
    }
}

impl TitleProvider for CachingTitle {
    fn title(&self) -> String {
        let t = self.inner.title();
        if self.flag.get() {
            format!("{}{}", t, CACHING_SUFFIX)
        } else {
            t
        }
    }
}

/// A live node on the canvas.
///
/// Instances reference their type by its stable string identifier; many
/// instances share one type. The caching decorator is not installed by the
/// constructor but by the host's creation hook
/// ([`ConversionController::node_created`](crate::ConversionController::node_created)),
/// which also seeds the flag for types converted before this node existed.
pub struct NodeInstance {
    id: Uuid,
    type_id: String,
    flag: InstanceFlag,
    title: Box<dyn TitleProvider>,
    decorated: bool,
}

impl NodeInstance {
    /// Creates an instance of the given type with its base title provider.
    pub fn new(type_id: impl Into<String>, title: impl TitleProvider + 'static) -> Self {
        NodeInstance {
            id: Uuid::new_v4(),
            type_id: type_id.into(),
            flag: InstanceFlag::new(),
            title: Box::new(title),
            decorated: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The stable identifier of this node's type.
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// The instance-local caching flag.
    pub fn is_caching(&self) -> bool {
        self.flag.get()
    }

    /// A handle to the instance-local flag, shared with the title decorator.
    pub fn flag(&self) -> InstanceFlag {
        self.flag.clone()
    }

    /// Renders the current title.
    pub fn title(&self) -> String {
        self.title.title()
    }

    pub(crate) fn set_caching(&self) {
        self.flag.set();
    }

    /// Wraps the current title provider in a [`CachingTitle`] sharing this
    /// instance's flag. Installed at most once.
    pub(crate) fn decorate_title(&mut self) {
        if self.decorated {
            return;
        }
        let inner = std::mem::replace(&mut self.title, Box::new(StaticTitle::new("")));
        self.title = Box::new(CachingTitle::new(inner, self.flag.clone()));
        self.decorated = true;
    }
}

/// The currently open graph: the set of live node instances.
#[derive(Default)]
pub struct Graph {
    nodes: Vec<NodeInstance>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph, returning its id.
    pub fn add(&mut self, node: NodeInstance) -> Uuid {
        let id = node.id();
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&NodeInstance> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Iterates over every live node.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeInstance> {
        self.nodes.iter()
    }

    /// Iterates over the live nodes of one type.
    pub fn nodes_of_type<'a>(&'a self, type_id: &'a str) -> impl Iterator<Item = &'a NodeInstance> {
        self.nodes.iter().filter(move |node| node.type_id() == type_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_title() {
        let title = StaticTitle::new("Image Blur");
        assert_eq!(title.title(), "Image Blur");
    }

    #[test]
    fn test_decorator_passes_through_while_flag_unset() {
        let flag = InstanceFlag::new();
        let decorated = CachingTitle::new(Box::new(StaticTitle::new("Image Blur")), flag);
        assert_eq!(decorated.title(), "Image Blur");
    }

    #[test]
    fn test_decorator_recomputes_on_every_read() {
        let flag = InstanceFlag::new();
        let decorated = CachingTitle::new(Box::new(StaticTitle::new("Image Blur")), flag.clone());

        assert_eq!(decorated.title(), "Image Blur");
        flag.set();
        assert_eq!(decorated.title(), "Image Blur (caching)");
    }

    #[test]
    fn test_decorator_preserves_existing_decoration() {
        struct BracketedTitle(&'static str);
        impl TitleProvider for BracketedTitle {
            fn title(&self) -> String {
                format!("[{}]", self.0)
            }
        }

        let flag = InstanceFlag::new();
        flag.set();
        let decorated = CachingTitle::new(Box::new(BracketedTitle("Image Blur")), flag);
        assert_eq!(decorated.title(), "[Image Blur] (caching)");
    }

    #[test]
    fn test_decorate_title_installs_once() {
        let mut node = NodeInstance::new("ImageBlur", StaticTitle::new("Image Blur"));
        node.decorate_title();
        node.decorate_title();
        node.set_caching();
        assert_eq!(node.title(), "Image Blur (caching)");
    }

    #[test]
    fn test_undecorated_node_never_shows_suffix() {
        let node = NodeInstance::new("ImageBlur", StaticTitle::new("Image Blur"));
        node.set_caching();
        assert_eq!(node.title(), "Image Blur");
    }

    #[test]
    fn test_graph_nodes_of_type() {
        let mut graph = Graph::new();
        graph.add(NodeInstance::new("ImageBlur", StaticTitle::new("Blur 1")));
        graph.add(NodeInstance::new("ImageInvert", StaticTitle::new("Invert")));
        let id = graph.add(NodeInstance::new("ImageBlur", StaticTitle::new("Blur 2")));

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.nodes_of_type("ImageBlur").count(), 2);
        assert_eq!(graph.nodes_of_type("ImageInvert").count(), 1);
        assert_eq!(graph.nodes_of_type("Missing").count(), 0);
        assert_eq!(graph.get(id).unwrap().title(), "Blur 2");
    }
}
