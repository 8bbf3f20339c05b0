//! Validation rules for form drafts.
//!
//! A [`Validator`] is an ordered list of rules. Field rules look at one field
//! of the draft, form rules at the draft as a whole. Rules never see a
//! mutable draft.

use thiserror::Error;

/// Error type for a failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A single field holds an unacceptable value.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The combination of fields is unacceptable.
    #[error("{0}")]
    InvalidForm(String),
}

type Check<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

enum Rule<T> {
    Field { field: &'static str, check: Check<T> },
    Form(Check<T>),
}

/// Ordered collection of validation rules for `T`.
pub struct Validator<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Validator<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule about `field`. The check returns the reason on failure.
    pub fn field<F>(mut self, field: &'static str, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.push(Rule::Field {
            field,
            check: Box::new(check),
        });
        self
    }

    /// Adds a rule about the draft as a whole.
    pub fn form<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.push(Rule::Form(Box::new(check)));
        self
    }

    /// Runs every rule and collects the failures, in rule order.
    pub fn validate(&self, draft: &T) -> Vec<ValidationError> {
        self.rules
            .iter()
            .filter_map(|rule| match rule {
                Rule::Field { field, check } => check(draft).err().map(|reason| {
                    ValidationError::InvalidField {
                        field: *field,
                        reason,
                    }
                }),
                Rule::Form(check) => check(draft).err().map(ValidationError::InvalidForm),
            })
            .collect()
    }

    pub fn is_valid(&self, draft: &T) -> bool {
        self.rules.iter().all(|rule| match rule {
            Rule::Field { check, .. } | Rule::Form(check) => check(draft).is_ok(),
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug)]
    struct Range {
        low: i32,
        high: i32,
    }

    fn range_validator() -> Validator<Range> {
        Validator::new()
            .field("low", |range: &Range| {
                if range.low >= 0 {
                    Ok(())
                } else {
                    Err("must not be negative".to_string())
                }
            })
            .form(|range: &Range| {
                if range.low <= range.high {
                    Ok(())
                } else {
                    Err("low must not exceed high".to_string())
                }
            })
    }

    #[test]
    fn empty_validator_accepts_anything() {
        let validator = Validator::<Range>::new();
        assert!(validator.is_empty());
        assert!(validator.is_valid(&Range { low: 5, high: -5 }));
    }

    #[test]
    fn collects_field_and_form_failures_in_order() {
        let validator = range_validator();
        assert_eq!(validator.len(), 2);

        let errors = validator.validate(&Range { low: -1, high: -2 });
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidField {
                    field: "low",
                    reason: "must not be negative".to_string(),
                },
                ValidationError::InvalidForm("low must not exceed high".to_string()),
            ]
        );
        assert!(!validator.is_valid(&Range { low: -1, high: -2 }));
    }

    #[test]
    fn valid_draft_produces_no_errors() {
        let validator = range_validator();
        let draft = Range { low: 1, high: 3 };
        assert!(validator.validate(&draft).is_empty());
        assert!(validator.is_valid(&draft));
    }

    #[test]
    fn field_error_message_names_the_field() {
        let error = ValidationError::InvalidField {
            field: "port",
            reason: "must be between 1 and 65535".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'port': must be between 1 and 65535"
        );
    }
}
