use std::fmt;

/// Payload format carrying a dragged element's id
pub const TEXT_PLAIN: &str = "text/plain";

/// Operation a drag source allows or a drop target performs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Move,
}

/// Data carried from drag start to drop, keyed by format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    items: Vec<(String, String)>,
    pub effect_allowed: DropEffect,
    pub drop_effect: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `format`, replacing any previous value
    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        let data = data.into();
        match self.items.iter_mut().find(|(f, _)| f == format) {
            Some(item) => item.1 = data,
            None => self.items.push((format.to_string(), data)),
        }
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, data)| data.as_str())
    }

    /// Formats in the order they were first set
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(f, _)| f.as_str())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl fmt::Display for DataTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&str> = self.types().collect();
        write!(f, "[{}]", types.join(", "))
    }
}

/// An element that can be picked up
pub trait Draggable {
    fn on_drag_start(&self, transfer: &mut DataTransfer);
    fn on_drag_end(&self, transfer: &DataTransfer);
}

/// An element that things can be dropped onto
pub trait DragTarget {
    /// Returns true when the payload is accepted here
    fn on_drag_over(&mut self, transfer: &mut DataTransfer) -> bool;

    /// Returns true when the drop changed the board
    fn on_drop(&mut self, transfer: &DataTransfer) -> bool;

    fn on_drag_leave(&mut self);
}
