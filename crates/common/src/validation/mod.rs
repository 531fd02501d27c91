// Validation Module - field-level validation for forms sent to the backend
use std::fmt;

mod validators;

pub use validators::{EmailValidator, FieldValidator, RangeValidator, StringValidator};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// `(field, message)` pairs in the order they were recorded
    pub fn messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|e| (e.field.as_str(), e.message.as_str()))
    }

    /// Merge another validation error into this one
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "Validation error with no specific field errors")?;
        } else if self.errors.len() == 1 {
            write!(f, "Validation failed: {}", self.errors[0].message)?;
        } else {
            write!(f, "Validation failed with {} errors: ", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", error.field, error.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Main validator struct for orchestrating validations
///
/// Every check records its message against the field name and keeps going,
/// so a form gets all of its field errors in one pass.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
    /// Enclosing field names while inside [`Validator::validate_nested`]
    path: Vec<String>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = if self.path.is_empty() {
            field.into()
        } else {
            format!("{}.{}", self.path.join("."), field.into())
        };
        self.errors.add_field_error(field, message);
    }

    /// Validate a field with a specific validator
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V) -> &mut Self
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if let Err(msg) = validator.validate(value) {
            self.add_error(field, msg);
        }
        self
    }

    /// Validate an optional field only when it is present
    pub fn validate_optional<T, V>(
        &mut self,
        field: &str,
        value: Option<&T>,
        validator: &V,
    ) -> &mut Self
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        match value {
            Some(value) => self.validate_field(field, value, validator),
            None => self,
        }
    }

    /// Require a text field to be present and not blank
    pub fn require_text(
        &mut self,
        field: &str,
        value: Option<&str>,
        message: impl Into<String>,
    ) -> &mut Self {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.add_error(field, message);
        }
        self
    }

    /// Require any value to be present
    pub fn require<T>(
        &mut self,
        field: &str,
        value: Option<&T>,
        message: impl Into<String>,
    ) -> &mut Self {
        if value.is_none() {
            self.add_error(field, message);
        }
        self
    }

    /// Validate with nested context (`items.0.quantity`)
    pub fn validate_nested<F>(&mut self, field: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Validator),
    {
        self.path.push(field.to_string());
        f(self);
        self.path.pop();
        self
    }

    /// Check if validation has errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.error_count()
    }

    /// Finalize and return result
    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Get errors without consuming validator
    pub fn errors(&self) -> &ValidationError {
        &self.errors
    }

    /// Clear all errors
    pub fn clear(&mut self) {
        self.errors = ValidationError::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_failure() {
        let mut validator = Validator::new();
        validator
            .require_text("name", Some("  "), "الاسم مطلوب")
            .require::<u64>("category_id", None, "الفئة مطلوبة")
            .validate_field("price", &-1.0, &RangeValidator::empty().min(0.0));

        assert_eq!(validator.error_count(), 3);
        let err = validator.finalize().unwrap_err();
        assert_eq!(err.field_errors("name")[0].message, "الاسم مطلوب");
    }

    #[test]
    fn nested_fields_are_prefixed() {
        let mut validator = Validator::new();
        validator.validate_nested("items", |v| {
            v.validate_nested("0", |v| {
                v.add_error("quantity", "x");
            });
        });

        let fields: Vec<_> = validator.errors().messages().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["items.0.quantity"]);
    }

    #[test]
    fn optional_fields_are_skipped_when_absent() {
        let mut validator = Validator::new();
        validator.validate_optional("email", None::<&str>, &EmailValidator::new());
        assert!(validator.finalize().is_ok());
    }
}
