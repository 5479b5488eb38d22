pub mod board;
pub mod project;
pub mod validation;

pub use board::{BoardConfig, Column, FieldRules, FormRules};
pub use project::{Project, ProjectId, ProjectStatus};
pub use validation::{validate, FieldValue, Validatable, Violation};
