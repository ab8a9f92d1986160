pub mod controller;
pub mod menu;
pub mod node;
pub mod registry;
