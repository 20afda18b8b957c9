//! Layout tree: sizing metadata, capability traits and the containers that
//! distribute space.
//!
//! Containers hold children as `Box<dyn LayoutItem>`; every item owns a
//! `LayoutNode` whose shared rect the parent writes during a pass.

mod aspect;
mod flow;
mod node;
mod stack;
mod table;
mod text;

pub use aspect::AspectBox;
pub use flow::FlowGrid;
pub use node::{
    Align, Hierarchical, LayoutItem, LayoutLeaf, LayoutNode, Paintable, Sizeable, Sizing,
};
pub use stack::LayoutStack;
pub use table::{Table, TableRow};
pub use text::TextBlock;
