use crate::domain::Project;
use crate::view::drag::{DataTransfer, Draggable, DropEffect, TEXT_PLAIN};
use crate::view::Component;
use tracing::debug;

/// A single draggable project card. Its element id is the project id.
#[derive(Debug, Clone)]
pub struct ProjectItem {
    project: Project,
}

impl ProjectItem {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl Component for ProjectItem {
    fn element_id(&self) -> String {
        self.project.id.to_string()
    }

    fn render_content(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.project.title,
            self.project.people_label(),
            self.project.description
        )
    }
}

impl Draggable for ProjectItem {
    fn on_drag_start(&self, transfer: &mut DataTransfer) {
        debug!(id = %self.project.id, "Drag started");
        transfer.set_data(TEXT_PLAIN, self.project.id.as_str());
        transfer.effect_allowed = DropEffect::Move;
    }

    fn on_drag_end(&self, transfer: &DataTransfer) {
        debug!(id = %self.project.id, effect = ?transfer.drop_effect, "Drag ended");
    }
}
