use crate::domain::{Column, Project, ProjectId, ProjectStatus};
use crate::state::SharedProjectState;
use crate::view::drag::{DataTransfer, DragTarget, DropEffect, TEXT_PLAIN};
use crate::view::project_item::ProjectItem;
use crate::view::Component;
use std::{cell::RefCell, rc::Rc, str::FromStr};
use tracing::{debug, warn};

/// One board column showing the projects of a single status
#[derive(Debug)]
pub struct ProjectList {
    column: Column,
    state: SharedProjectState,
    assigned: Rc<RefCell<Vec<Project>>>,
    droppable: bool,
    configured: bool,
}

impl ProjectList {
    pub fn new(column: Column, state: SharedProjectState) -> Self {
        Self {
            column,
            state,
            assigned: Rc::new(RefCell::new(Vec::new())),
            droppable: false,
            configured: false,
        }
    }

    pub fn status(&self) -> ProjectStatus {
        self.column.status
    }

    pub fn heading(&self) -> &str {
        &self.column.heading
    }

    /// Projects shown in this column, from the last store snapshot
    pub fn assigned(&self) -> Vec<Project> {
        self.assigned.borrow().clone()
    }

    pub fn items(&self) -> Vec<ProjectItem> {
        self.assigned
            .borrow()
            .iter()
            .cloned()
            .map(ProjectItem::new)
            .collect()
    }

    pub fn item(&self, id: &ProjectId) -> Option<ProjectItem> {
        self.assigned
            .borrow()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .map(ProjectItem::new)
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.assigned.borrow().iter().any(|p| &p.id == id)
    }

    /// Whether a payload is currently hovering over this column
    pub fn is_droppable(&self) -> bool {
        self.droppable
    }
}

fn filter_by_status(projects: Vec<Project>, status: ProjectStatus) -> Vec<Project> {
    projects.into_iter().filter(|p| p.status == status).collect()
}

impl Component for ProjectList {
    fn element_id(&self) -> String {
        format!("{}-projects-list", self.column.status.as_str())
    }

    fn configure(&mut self) {
        if self.configured {
            return;
        }
        self.configured = true;

        let status = self.column.status;
        let assigned = Rc::clone(&self.assigned);
        *assigned.borrow_mut() = self.state.projects_with_status(status);
        self.state.add_listener(move |projects| {
            *assigned.borrow_mut() = filter_by_status(projects, status);
        });
    }

    fn render_content(&self) -> String {
        let mut out = self.column.heading.to_uppercase();
        if self.droppable {
            out.push_str(" (drop here)");
        }
        for item in self.items() {
            out.push('\n');
            let content = item.render_content();
            let mut lines = content.lines();
            if let Some(first) = lines.next() {
                out.push_str("- ");
                out.push_str(first);
            }
            for line in lines {
                out.push_str("\n  ");
                out.push_str(line);
            }
        }
        out
    }
}

impl DragTarget for ProjectList {
    fn on_drag_over(&mut self, transfer: &mut DataTransfer) -> bool {
        if transfer.types().next() != Some(TEXT_PLAIN) {
            return false;
        }
        transfer.drop_effect = DropEffect::Move;
        self.droppable = true;
        true
    }

    fn on_drop(&mut self, transfer: &DataTransfer) -> bool {
        self.droppable = false;

        let Some(payload) = transfer.get_data(TEXT_PLAIN) else {
            debug!(list = %self.element_id(), "Drop without a plain text payload");
            return false;
        };
        let id = match ProjectId::from_str(payload) {
            Ok(id) => id,
            Err(e) => {
                warn!(list = %self.element_id(), "Ignoring drop: {}", e);
                return false;
            }
        };

        self.state.move_project(&id, self.column.status)
    }

    fn on_drag_leave(&mut self) {
        self.droppable = false;
    }
}
