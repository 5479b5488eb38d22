//! The observable project store.
//!
//! [`ProjectState`] owns every project on the board in insertion order and
//! the listeners subscribed to it. Each state-changing call notifies every
//! listener synchronously, in registration order, with its own copy of
//! the full project list.
//!
//! Projects and listeners live in separate cells, and no borrow of the
//! project list is held while listeners run, so a listener may read the
//! store through a shared handle.

use crate::domain::{Project, ProjectId, ProjectStatus};
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};
use tracing::{debug, info};

/// Callback invoked with a snapshot of all projects after every change
pub type Listener = Box<dyn FnMut(Vec<Project>)>;

/// Store handle shared between the views of a single board
pub type SharedProjectState = Rc<ProjectState>;

#[derive(Default)]
pub struct ProjectState {
    projects: RefCell<Vec<Project>>,
    listeners: RefCell<Vec<Listener>>,
    notifying: Cell<bool>,
    pending: Cell<bool>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store behind a shared handle
    pub fn shared() -> SharedProjectState {
        Rc::new(Self::new())
    }

    /// Registers a listener.
    ///
    /// There is no deduplication: registering the same callback twice
    /// yields two notifications per change. A listener registered while a
    /// notification is running first hears about the next change.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: FnMut(Vec<Project>) + 'static,
    {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Adds a new active project and notifies listeners
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let project = Project::new(title.into(), description.into(), people);
        let id = project.id.clone();
        debug_assert!(
            self.project(&id).is_none(),
            "generated project id {} collides with an existing project",
            id
        );

        info!(id = %id, title = %project.title, people, "Project added");
        self.projects.borrow_mut().push(project);
        self.update_listeners();
        id
    }

    /// Moves a project to `new_status`.
    ///
    /// Unknown ids and moves to the current status are silent no-ops that
    /// notify nobody. Returns true when the status actually changed.
    pub fn move_project(&self, id: &ProjectId, new_status: ProjectStatus) -> bool {
        {
            let mut projects = self.projects.borrow_mut();
            let Some(project) = projects.iter_mut().find(|p| &p.id == id) else {
                debug!(id = %id, "Move ignored: no such project");
                return false;
            };

            if project.status == new_status {
                debug!(id = %id, status = %new_status, "Move ignored: status unchanged");
                return false;
            }

            debug!(id = %id, from = %project.status, to = %new_status, "Project moved");
            project.set_status(new_status);
        }
        self.update_listeners();
        true
    }

    /// Snapshot of all projects in insertion order
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    pub fn project(&self, id: &ProjectId) -> Option<Project> {
        self.projects.borrow().iter().find(|p| &p.id == id).cloned()
    }

    pub fn projects_with_status(&self, status: ProjectStatus) -> Vec<Project> {
        self.projects
            .borrow()
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn update_listeners(&self) {
        // A change made from inside a listener is delivered by the
        // outer loop once the current round has finished.
        if self.notifying.replace(true) {
            self.pending.set(true);
            return;
        }

        loop {
            let snapshot = self.projects();
            let mut listeners = self.listeners.take();
            debug!(listeners = listeners.len(), "Notifying listeners");
            for listener in listeners.iter_mut() {
                listener(snapshot.clone());
            }

            let mut added = self.listeners.take();
            listeners.append(&mut added);
            *self.listeners.borrow_mut() = listeners;

            if !self.pending.replace(false) {
                break;
            }
        }
        self.notifying.set(false);
    }
}

impl fmt::Debug for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectState")
            .field("projects", &self.projects.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Registers a listener that records every snapshot it receives
    fn recording_listener(state: &ProjectState) -> Rc<RefCell<Vec<Vec<Project>>>> {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        state.add_listener(move |projects| sink.borrow_mut().push(projects));
        received
    }

    #[test]
    fn test_add_project_grows_by_one_with_unique_ids() {
        let state = ProjectState::new();
        assert!(state.is_empty());

        for n in 1..=50 {
            state.add_project(format!("Project {}", n), "Some description", 2);
            assert_eq!(state.len(), n);
        }

        let ids: HashSet<ProjectId> = state.projects().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_project_preserves_insertion_order() {
        let state = ProjectState::new();
        state.add_project("First", "desc", 1);
        state.add_project("Second", "desc", 1);
        state.add_project("Third", "desc", 1);

        let titles: Vec<String> = state.projects().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_add_project_notifies_with_full_snapshot() {
        let state = ProjectState::new();
        let received = recording_listener(&state);

        let id = state.add_project("Build API", "desc", 3);

        let received = received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].len(), 1);
        assert_eq!(received[0][0].id, id);
        assert_eq!(received[0][0].status, ProjectStatus::Active);
    }

    #[test]
    fn test_move_unknown_id_is_silent_no_op() {
        let state = ProjectState::new();
        state.add_project("Build API", "desc", 3);
        let received = recording_listener(&state);
        let before = state.projects();

        assert!(!state.move_project(&ProjectId::generate(), ProjectStatus::Finished));

        assert_eq!(state.projects(), before);
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn test_move_to_same_status_does_not_notify() {
        let state = ProjectState::new();
        let id = state.add_project("Build API", "desc", 3);
        let received = recording_listener(&state);

        assert!(!state.move_project(&id, ProjectStatus::Active));
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn test_move_notifies_each_listener_once() {
        let state = ProjectState::new();
        let id = state.add_project("Build API", "desc", 3);
        let first = recording_listener(&state);
        let second = recording_listener(&state);

        assert!(state.move_project(&id, ProjectStatus::Finished));

        for received in [first, second] {
            let received = received.borrow();
            assert_eq!(received.len(), 1);
            assert_eq!(received[0][0].status, ProjectStatus::Finished);
        }
    }

    #[test]
    fn test_move_back_and_forth() {
        let state = ProjectState::new();
        let id = state.add_project("Build API", "desc", 3);

        assert!(state.move_project(&id, ProjectStatus::Finished));
        assert!(state.move_project(&id, ProjectStatus::Active));
        assert_eq!(state.project(&id).unwrap().status, ProjectStatus::Active);
    }

    #[test]
    fn test_move_keeps_position() {
        let state = ProjectState::new();
        state.add_project("First", "desc", 1);
        let second = state.add_project("Second", "desc", 1);
        state.add_project("Third", "desc", 1);

        state.move_project(&second, ProjectStatus::Finished);

        assert_eq!(state.projects()[1].id, second);
        assert_eq!(state.projects_with_status(ProjectStatus::Active).len(), 2);
        assert_eq!(state.projects_with_status(ProjectStatus::Finished).len(), 1);
    }

    #[test]
    fn test_listeners_called_in_registration_order() {
        let state = ProjectState::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            state.add_listener(move |_| calls.borrow_mut().push(name));
        }
        state.add_project("Build API", "desc", 3);

        assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_same_callback_registered_twice_fires_twice() {
        let state = ProjectState::new();
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        let listener = move |_: Vec<Project>| *counter.borrow_mut() += 1;
        state.add_listener(listener.clone());
        state.add_listener(listener);
        assert_eq!(state.listener_count(), 2);

        state.add_project("Build API", "desc", 3);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_snapshots_are_defensive_copies() {
        let state = ProjectState::new();
        state.add_listener(|mut projects: Vec<Project>| {
            for project in projects.iter_mut() {
                project.title = "tampered".to_string();
                project.status = ProjectStatus::Finished;
            }
            projects.clear();
        });
        let received = recording_listener(&state);

        let id = state.add_project("Build API", "desc", 3);

        let project = state.project(&id).unwrap();
        assert_eq!(project.title, "Build API");
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(received.borrow()[0][0].title, "Build API");

        state.add_project("Second", "desc", 1);
        assert_eq!(received.borrow()[1].len(), 2);
    }

    #[test]
    fn test_listener_can_read_store_while_notified() {
        let state = ProjectState::shared();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let handle = Rc::clone(&state);
        let sink = Rc::clone(&seen);
        state.add_listener(move |_| sink.borrow_mut().push(handle.len()));

        state.add_project("Build API", "desc", 3);
        state.add_project("Write docs", "desc", 1);

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_listener_registered_during_notification() {
        let state = ProjectState::shared();
        let late_calls = Rc::new(Cell::new(0));

        let handle = Rc::clone(&state);
        let calls = Rc::clone(&late_calls);
        let mut registered = false;
        state.add_listener(move |_| {
            if !registered {
                registered = true;
                let calls = Rc::clone(&calls);
                handle.add_listener(move |_| calls.set(calls.get() + 1));
            }
        });

        state.add_project("Build API", "desc", 3);
        assert_eq!(state.listener_count(), 2);
        assert_eq!(late_calls.get(), 0);

        state.add_project("Write docs", "desc", 1);
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn test_change_from_listener_is_delivered_after_current_round() {
        let state = ProjectState::shared();
        let received = recording_listener(&state);

        let handle = Rc::clone(&state);
        state.add_listener(move |projects| {
            if let Some(project) = projects.first() {
                handle.move_project(&project.id, ProjectStatus::Finished);
            }
        });

        state.add_project("Build API", "desc", 3);

        let received = received.borrow();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0][0].status, ProjectStatus::Active);
        assert_eq!(received[1][0].status, ProjectStatus::Finished);
    }

    #[test]
    fn test_shared_handle() {
        let state = ProjectState::shared();
        let other = Rc::clone(&state);

        state.add_project("Build API", "desc", 3);
        assert_eq!(other.len(), 1);
    }
}
