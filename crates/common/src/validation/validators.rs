// Field Validators - Reusable validation components
use std::fmt::Display;

use once_cell::sync::Lazy;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Range validator for numeric types
#[derive(Debug, Clone)]
pub struct RangeValidator<T> {
    min: Option<T>,
    max: Option<T>,
    message: Option<String>,
}

impl<T> Default for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    /// Create a new range validator with no constraints
    pub fn empty() -> Self {
        Self { min: None, max: None, message: None }
    }

    /// Create a new range validator with min and max values
    pub fn new(min: T, max: T) -> Self {
        Self { min: Some(min), max: Some(max), message: None }
    }

    /// Set minimum value
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    /// Replace the default message for any violation
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        if let Some(ref min) = self.min {
            if value < min {
                return Err(self.message.clone().unwrap_or_else(|| format!("يجب ألا تقل القيمة عن {min}")));
            }
        }

        if let Some(ref max) = self.max {
            if value > max {
                return Err(self.message.clone().unwrap_or_else(|| format!("يجب ألا تتجاوز القيمة {max}")));
            }
        }

        Ok(())
    }
}

/// String validator with various constraints
///
/// Lengths count characters, not bytes, so Arabic input is measured the way
/// the user sees it.
#[derive(Debug, Clone)]
pub struct StringValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<regex::Regex>,
    not_empty: bool,
    trim: bool,
    message: Option<String>,
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringValidator {
    /// Create a new string validator
    pub fn new() -> Self {
        Self {
            min_length: None,
            max_length: None,
            pattern: None,
            not_empty: false,
            trim: true,
            message: None,
        }
    }

    /// Require non-empty string
    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Set minimum length
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set maximum length
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set pattern to match
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(regex::Regex::new(pattern)?);
        Ok(self)
    }

    /// Set whether to trim before validation
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Replace the default message for any violation
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn fail(&self, default: String) -> Result<(), String> {
        Err(self.message.clone().unwrap_or(default))
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let val = if self.trim { value.trim() } else { value };
        let length = val.chars().count();

        if self.not_empty && val.is_empty() {
            return self.fail("هذا الحقل مطلوب".to_string());
        }

        if let Some(min) = self.min_length {
            if length < min {
                return self.fail(format!("يجب ألا يقل الطول عن {min} أحرف"));
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                return self.fail(format!("يجب ألا يتجاوز الطول {max} حرفاً"));
            }
        }

        if let Some(ref pattern) = self.pattern {
            if !val.is_empty() && !pattern.is_match(val) {
                return self.fail("القيمة غير صالحة".to_string());
            }
        }

        Ok(())
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// Static email regex pattern compiled once at first use
static EMAIL_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX pattern is valid and well-formed")
});

/// Email validator
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    message: Option<String>,
}

impl EmailValidator {
    /// Create a new email validator
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if !EMAIL_REGEX.is_match(value.trim()) {
            return Err(self
                .message
                .clone()
                .unwrap_or_else(|| "البريد الإلكتروني غير صالح".to_string()));
        }

        Ok(())
    }
}

impl FieldValidator<String> for EmailValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}
