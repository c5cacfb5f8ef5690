use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::sub_collection::Identified,
    errors::AppError,
    use_cases::validation::{end_date, not_blank, parse_date, start_date},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Identified for Experience {
    fn id(&self) -> Uuid {
        self.id
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank", message = "Title is required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Company is required"),
        custom(function = "not_blank", message = "Company is required")
    )]
    pub company: Option<String>,

    pub location: Option<String>,

    /// Kept as text so a blank or malformed date is reported per field.
    #[validate(
        required(message = "From date is required"),
        custom(function = "start_date")
    )]
    pub from: Option<String>,

    #[validate(custom(function = "end_date"))]
    pub to: Option<String>,

    pub current: Option<bool>,
    pub description: Option<String>,
}

impl NewExperience {
    /// Builds the stored entry under a fresh identifier. Expects a request
    /// that already passed `EXPERIENCE_RULES`.
    pub fn into_entry(self) -> Result<Experience, AppError> {
        let (Some(title), Some(company), Some(from)) = (
            self.title,
            self.company,
            self.from.as_deref().and_then(parse_date),
        ) else {
            return Err(AppError::InternalError("Experience request was not validated".into()));
        };

        Ok(Experience {
            id: Uuid::new_v4(),
            title,
            company,
            location: self.location,
            from,
            to: self.to.as_deref().and_then(parse_date),
            current: self.current.unwrap_or(false),
            description: self.description,
        })
    }
}
