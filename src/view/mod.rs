//! Views over the project store.
//!
//! Views never own project data. Lists derive what they show from the
//! last snapshot the store sent them, and user actions go back into the
//! store through [`crate::ProjectState`] methods.

pub mod drag;
pub mod project_input;
pub mod project_item;
pub mod project_list;

pub use drag::{DataTransfer, DragTarget, Draggable, DropEffect, TEXT_PLAIN};
pub use project_input::ProjectInput;
pub use project_item::ProjectItem;
pub use project_list::ProjectList;

/// A renderable piece of the board
pub trait Component {
    /// Identifier of the rendered element
    fn element_id(&self) -> String;

    /// Wires subscriptions and event handlers. Called once after construction.
    fn configure(&mut self) {}

    /// Renders the component's current content
    fn render_content(&self) -> String;
}
