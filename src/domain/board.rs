use crate::domain::project::ProjectStatus;
use crate::domain::validation::{FieldValue, Validatable};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

/// Configuration for a board column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub heading: String,
    pub status: ProjectStatus,
}

impl Column {
    pub fn new(heading: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            heading: heading.into(),
            status,
        }
    }
}

/// Constraints applied to one form field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRules {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldRules {
    /// Builds a [`Validatable`] for `value` carrying these rules
    pub fn to_validatable<'a>(&self, value: FieldValue<'a>) -> Validatable<'a> {
        Validatable {
            value,
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            min: self.min,
            max: self.max,
        }
    }
}

/// Validation rules for the new-project form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRules {
    pub title: FieldRules,
    pub description: FieldRules,
    pub people: FieldRules,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            title: FieldRules {
                required: true,
                ..FieldRules::default()
            },
            description: FieldRules {
                required: true,
                min_length: Some(5),
                ..FieldRules::default()
            },
            people: FieldRules {
                required: true,
                min: Some(1.0),
                max: Some(5.0),
                ..FieldRules::default()
            },
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<Column>,
    pub form: FormRules,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Project Board".to_string(),
            columns: vec![
                Column::new("Active Projects", ProjectStatus::Active),
                Column::new("Finished Projects", ProjectStatus::Finished),
            ],
            form: FormRules::default(),
        }
    }
}

impl BoardConfig {
    /// Parses and checks a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Checks that the board has columns and no status is shown twice
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(BoardError::ConfigError(
                "board must have at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.status) {
                return Err(BoardError::ConfigError(format!(
                    "status '{}' is assigned to more than one column",
                    column.status.as_str()
                )));
            }
        }

        Ok(())
    }

    /// Gets the column configuration for a status
    pub fn column_for_status(&self, status: &ProjectStatus) -> Option<&Column> {
        self.columns.iter().find(|col| &col.status == status)
    }
}
