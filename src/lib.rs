//! # Project Board Core
//!
//! Core state, validation and views for a drag-and-drop project board.
//!
//! Projects live in a single observable [`ProjectState`]. Views subscribe
//! to it, receive a full snapshot after every change and re-render the
//! column they own. The crate has no dependency on a rendering platform:
//! views render to text and drag-and-drop is modelled with
//! [`view::DataTransfer`].

pub mod app;
pub mod domain;
pub mod error;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use app::App;
pub use domain::{
    board::{BoardConfig, Column, FieldRules, FormRules},
    project::{Project, ProjectId, ProjectStatus},
    validation::{validate, FieldValue, Validatable, Violation},
};
pub use error::{BoardError, Result};
pub use state::{ProjectState, SharedProjectState};
