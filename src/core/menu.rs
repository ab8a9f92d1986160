//! Context-menu contribution
//!
//! Menu entries are plain data dispatched by the host, not stored closures;
//! the host hands a picked [`MenuAction`] back to the controller.

use crate::core::node::NodeInstance;

/// Label of the conversion menu entry.
pub const CONVERT_LABEL: &str = "Convert to caching";

/// A context-menu entry contributed for a node instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Label shown in the menu.
    pub content: String,
    /// What the host should do when the entry is picked.
    pub action: MenuAction,
}

impl MenuEntry {
    pub fn convert_to_caching(type_id: impl Into<String>) -> Self {
        MenuEntry {
            content: CONVERT_LABEL.to_string(),
            action: MenuAction::ConvertToCaching {
                type_id: type_id.into(),
            },
        }
    }
}

/// Actions a menu entry can dispatch back to the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Issue a conversion request for the node's type.
    ConvertToCaching { type_id: String },
}

/// Contributes extra context-menu entries for a node instance.
pub trait MenuContributor {
    fn extra_menu_options(&self, node: &NodeInstance) -> Vec<MenuEntry>;
}
