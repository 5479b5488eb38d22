use crate::domain::{FieldRules, FieldValue, FormRules, ProjectId, Violation};
use crate::error::{BoardError, Result};
use crate::state::SharedProjectState;
use crate::view::Component;
use tracing::warn;

/// The new-project form.
///
/// Holds the raw text of its three inputs. A successful [`submit`]
/// adds the project to the store and clears the inputs; a failed one
/// leaves them untouched so the operator can correct them.
///
/// [`submit`]: ProjectInput::submit
#[derive(Debug)]
pub struct ProjectInput {
    state: SharedProjectState,
    rules: FormRules,
    title: String,
    description: String,
    people: String,
}

impl ProjectInput {
    pub fn new(state: SharedProjectState, rules: FormRules) -> Self {
        Self {
            state,
            rules,
            title: String::new(),
            description: String::new(),
            people: String::new(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_people(&mut self, people: impl Into<String>) {
        self.people = people.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn people(&self) -> &str {
        &self.people
    }

    /// Validates the inputs and adds the project to the store
    pub fn submit(&mut self) -> Result<ProjectId> {
        let (title, description, people) = match self.gather_user_input() {
            Ok(input) => input,
            Err(e) => {
                warn!("Invalid input, please try again! {}", e);
                return Err(e);
            }
        };

        let id = self.state.add_project(title, description, people);
        self.clear_inputs();
        Ok(id)
    }

    fn gather_user_input(&self) -> Result<(String, String, u32)> {
        check(
            "title",
            &self.rules.title,
            FieldValue::Text(&self.title),
        )?;
        check(
            "description",
            &self.rules.description,
            FieldValue::Text(&self.description),
        )?;

        let people = self.gather_people()?;
        Ok((
            self.title.clone(),
            self.description.clone(),
            people,
        ))
    }

    /// An empty people field counts as 0 and is checked against the
    /// range rules like any other number.
    fn gather_people(&self) -> Result<u32> {
        let raw = self.people.trim();
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BoardError::InvalidInput {
                field: "people",
                violations: vec![Violation::NotAWholeNumber],
            });
        }
        let value = if raw.is_empty() {
            0.0
        } else {
            raw.parse::<f64>().unwrap_or(f64::INFINITY)
        };

        let rules = &self.rules.people;
        let mut violations = Vec::new();
        if rules.required && raw.is_empty() {
            violations.push(Violation::Required);
        }
        violations.extend(rules.to_validatable(FieldValue::Number(value)).violations());
        if !violations.is_empty() {
            return Err(BoardError::InvalidInput {
                field: "people",
                violations,
            });
        }

        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse::<u32>().map_err(|_| BoardError::InvalidInput {
            field: "people",
            violations: vec![Violation::Max(f64::from(u32::MAX))],
        })
    }

    fn clear_inputs(&mut self) {
        self.title.clear();
        self.description.clear();
        self.people.clear();
    }
}

fn check(field: &'static str, rules: &FieldRules, value: FieldValue<'_>) -> Result<()> {
    let violations = rules.to_validatable(value).violations();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(BoardError::InvalidInput { field, violations })
    }
}

impl Component for ProjectInput {
    fn element_id(&self) -> String {
        "user-input".to_string()
    }

    fn render_content(&self) -> String {
        format!(
            "Title: {}\nDescription: {}\nPeople: {}",
            self.title, self.description, self.people
        )
    }
}
