//! Composition root for a board.
//!
//! [`App`] creates the one [`ProjectState`] of the board and hands a
//! shared handle to every view that needs it.

use crate::domain::{BoardConfig, ProjectId, ProjectStatus};
use crate::error::Result;
use crate::state::{ProjectState, SharedProjectState};
use crate::view::{
    Component, DataTransfer, DragTarget, Draggable, ProjectInput, ProjectList,
};
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct App {
    config: BoardConfig,
    state: SharedProjectState,
    input: ProjectInput,
    lists: Vec<ProjectList>,
}

impl App {
    /// Builds and configures the form and one list per configured column
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;

        let state = ProjectState::shared();
        let input = ProjectInput::new(Rc::clone(&state), config.form.clone());
        let mut lists: Vec<ProjectList> = config
            .columns
            .iter()
            .cloned()
            .map(|column| ProjectList::new(column, Rc::clone(&state)))
            .collect();
        for list in lists.iter_mut() {
            list.configure();
        }

        info!(board = %config.name, columns = lists.len(), "Board ready");
        Ok(Self {
            config,
            state,
            input,
            lists,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The board's store; every call returns the same instance
    pub fn state(&self) -> SharedProjectState {
        Rc::clone(&self.state)
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut ProjectInput {
        &mut self.input
    }

    pub fn lists(&self) -> &[ProjectList] {
        &self.lists
    }

    pub fn list(&self, status: ProjectStatus) -> Option<&ProjectList> {
        self.lists.iter().find(|list| list.status() == status)
    }

    pub fn list_mut(&mut self, status: ProjectStatus) -> Option<&mut ProjectList> {
        self.lists.iter_mut().find(|list| list.status() == status)
    }

    /// Drags a rendered project onto the column for `target`.
    ///
    /// Runs the full drag-start, drag-over, drop and drag-end sequence.
    /// Returns true when the project changed columns; dragging something
    /// that is not on the board, or onto a column that does not exist,
    /// does nothing.
    pub fn move_by_drag(&mut self, id: &ProjectId, target: ProjectStatus) -> bool {
        let Some(item) = self.lists.iter().find_map(|list| list.item(id)) else {
            debug!(id = %id, "Nothing to drag: project is not rendered");
            return false;
        };
        let Some(list) = self.list_mut(target) else {
            debug!(status = %target, "No column to drop onto");
            return false;
        };

        let mut transfer = DataTransfer::new();
        item.on_drag_start(&mut transfer);
        let moved = if list.on_drag_over(&mut transfer) {
            list.on_drop(&transfer)
        } else {
            list.on_drag_leave();
            false
        };
        item.on_drag_end(&transfer);
        moved
    }

    /// Renders the form followed by every column
    pub fn render(&self) -> String {
        let mut sections = vec![self.config.name.clone(), self.input.render_content()];
        sections.extend(self.lists.iter().map(Component::render_content));
        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Column;
    use crate::error::BoardError;

    fn submit(app: &mut App, title: &str, description: &str, people: &str) -> Result<ProjectId> {
        let input = app.input_mut();
        input.set_title(title);
        input.set_description(description);
        input.set_people(people);
        input.submit()
    }

    #[test]
    fn test_end_to_end_add_and_move() {
        let app = App::new(BoardConfig::default()).unwrap();
        let state = app.state();

        let id = state.add_project("Build API", "desc", 3);
        assert_eq!(state.len(), 1);
        assert_eq!(
            state.project(&id).map(|p| p.status),
            Some(ProjectStatus::Active)
        );
        assert!(app.list(ProjectStatus::Active).unwrap().contains(&id));

        assert!(state.move_project(&id, ProjectStatus::Finished));

        assert_eq!(
            state.project(&id).map(|p| p.status),
            Some(ProjectStatus::Finished)
        );
        assert!(app.list(ProjectStatus::Finished).unwrap().contains(&id));
        assert!(!app.list(ProjectStatus::Active).unwrap().contains(&id));
    }

    #[test]
    fn test_state_is_single_instance() {
        let app = App::new(BoardConfig::default()).unwrap();
        assert!(Rc::ptr_eq(&app.state(), &app.state()));
    }

    #[test]
    fn test_move_by_drag() {
        let mut app = App::new(BoardConfig::default()).unwrap();
        let id = submit(&mut app, "Build API", "REST endpoints", "2").unwrap();

        assert!(app.move_by_drag(&id, ProjectStatus::Finished));
        assert!(app.list(ProjectStatus::Finished).unwrap().contains(&id));
        assert!(!app.list(ProjectStatus::Finished).unwrap().is_droppable());

        // Dropping onto the column it is already in changes nothing
        assert!(!app.move_by_drag(&id, ProjectStatus::Finished));

        assert!(app.move_by_drag(&id, ProjectStatus::Active));
        assert!(app.list(ProjectStatus::Active).unwrap().contains(&id));
    }

    #[test]
    fn test_move_by_drag_unknown_project() {
        let mut app = App::new(BoardConfig::default()).unwrap();
        assert!(!app.move_by_drag(&ProjectId::generate(), ProjectStatus::Finished));
    }

    #[test]
    fn test_move_by_drag_without_target_column() {
        let config = BoardConfig {
            columns: vec![Column::new("Backlog", ProjectStatus::Active)],
            ..BoardConfig::default()
        };
        let mut app = App::new(config).unwrap();
        let id = submit(&mut app, "Build API", "REST endpoints", "2").unwrap();

        assert!(!app.move_by_drag(&id, ProjectStatus::Finished));
        assert!(app.list(ProjectStatus::Finished).is_none());
        assert_eq!(
            app.state().project(&id).map(|p| p.status),
            Some(ProjectStatus::Active)
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BoardConfig {
            columns: Vec::new(),
            ..BoardConfig::default()
        };
        assert!(matches!(App::new(config), Err(BoardError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_submission_leaves_board_empty() {
        let mut app = App::new(BoardConfig::default()).unwrap();

        assert!(submit(&mut app, "", "REST endpoints", "2").is_err());
        assert!(app.state().is_empty());
        assert!(app.list(ProjectStatus::Active).unwrap().assigned().is_empty());
        assert_eq!(app.input().description(), "REST endpoints");
    }

    #[test]
    fn test_render() {
        let mut app = App::new(BoardConfig::default()).unwrap();
        let id = submit(&mut app, "Build API", "REST endpoints", "1").unwrap();
        app.move_by_drag(&id, ProjectStatus::Finished);
        submit(&mut app, "Write docs", "User guide", "2").unwrap();

        let expected = "Project Board\n\n\
            Title: \nDescription: \nPeople: \n\n\
            ACTIVE PROJECTS\n- Write docs\n  2 persons assigned\n  User guide\n\n\
            FINISHED PROJECTS\n- Build API\n  1 person assigned\n  REST endpoints";
        assert_eq!(app.render(), expected);
    }
}
