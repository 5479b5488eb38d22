use std::fmt;

/// Value captured from a form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    fn is_blank(&self) -> bool {
        match self {
            // A number always stringifies to something non-empty
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    NotAWholeNumber,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "value is required"),
            Self::MinLength(n) => write!(f, "must be at least {} characters", n),
            Self::MaxLength(n) => write!(f, "must be at most {} characters", n),
            Self::Min(n) => write!(f, "must be at least {}", n),
            Self::Max(n) => write!(f, "must be at most {}", n),
            Self::NotAWholeNumber => write!(f, "must be a whole number"),
        }
    }
}

/// A value together with the constraints it must satisfy.
///
/// Absent constraints are vacuously satisfied. Length constraints only
/// apply to text values and range constraints only to numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable<'a> {
    pub value: FieldValue<'a>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl<'a> Validatable<'a> {
    pub fn new(value: FieldValue<'a>) -> Self {
        Self {
            value,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn text(value: &'a str) -> Self {
        Self::new(FieldValue::Text(value))
    }

    pub fn number(value: f64) -> Self {
        Self::new(FieldValue::Number(value))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Checks every rule and returns all that failed
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.required && self.value.is_blank() {
            violations.push(Violation::Required);
        }

        if let FieldValue::Text(text) = self.value {
            let length = text.chars().count();
            if let Some(min_length) = self.min_length {
                if length < min_length {
                    violations.push(Violation::MinLength(min_length));
                }
            }
            if let Some(max_length) = self.max_length {
                if length > max_length {
                    violations.push(Violation::MaxLength(max_length));
                }
            }
        }

        if let FieldValue::Number(number) = self.value {
            // NaN fails any range rule
            if let Some(min) = self.min {
                if number.is_nan() || number < min {
                    violations.push(Violation::Min(min));
                }
            }
            if let Some(max) = self.max {
                if number.is_nan() || number > max {
                    violations.push(Violation::Max(max));
                }
            }
        }

        violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

/// Returns true when the value satisfies all of its constraints
///
/// # Examples
/// ```
/// use projectboard_core::{validate, Validatable};
///
/// assert!(!validate(&Validatable::text("").required()));
/// assert!(!validate(&Validatable::text("ab").min_length(5)));
/// assert!(validate(&Validatable::number(5.0).min(1.0).max(10.0)));
/// assert!(validate(&Validatable::text("hello").required().min_length(5)));
/// ```
pub fn validate(input: &Validatable<'_>) -> bool {
    input.is_valid()
}
