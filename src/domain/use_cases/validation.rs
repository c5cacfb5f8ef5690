use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};
use validator::{Validate, ValidationError};

use crate::{
    errors::AppError,
    use_cases::sanitizer::{is_blank, split_skills},
};

/// Required-field table for one operation. `order` fixes the order in which
/// violations are reported.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub order: &'static [&'static str],
}

pub const PROFILE_RULES: FieldRules = FieldRules {
    order: &["status", "skills"],
};

pub const EXPERIENCE_RULES: FieldRules = FieldRules {
    order: &["title", "company", "from", "to"],
};

pub const EDUCATION_RULES: FieldRules = FieldRules {
    order: &["school", "degree", "fieldOfStudy", "from", "to"],
};

impl FieldRules {
    pub fn check<T: Validate>(&self, input: &T) -> Result<(), AppError> {
        match input.validate() {
            Ok(()) => Ok(()),
            Err(errors) => match AppError::from(errors) {
                AppError::ValidationError(mut field_errors) => {
                    field_errors.sort_by_key(|e| self.rank(&e.field));
                    Err(AppError::ValidationError(field_errors))
                }
                other => Err(other),
            },
        }
    }

    fn rank(&self, field: &str) -> usize {
        self.order
            .iter()
            .position(|f| *f == field)
            .unwrap_or(self.order.len())
    }
}

fn rejected(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Fails on whitespace-only text. Pair with `required` and a field message.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// A skills list must leave at least one entry after splitting.
pub fn has_skills(value: &str) -> Result<(), ValidationError> {
    if split_skills(value).is_empty() {
        return Err(ValidationError::new("no_skills"));
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only the date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

pub fn start_date(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rejected("required", "From date is required"));
    }
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| rejected("date", "From date must be a valid date"))
}

/// An end date is optional; blank means "not set".
pub fn end_date(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Ok(());
    }
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| rejected("date", "To date must be a valid date"))
}
