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
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Identified for Education {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    #[validate(
        required(message = "School is required"),
        custom(function = "not_blank", message = "School is required")
    )]
    pub school: Option<String>,

    #[validate(
        required(message = "Degree is required"),
        custom(function = "not_blank", message = "Degree is required")
    )]
    pub degree: Option<String>,

    #[serde(alias = "fieldofstudy")]
    #[validate(
        required(message = "Field of Study is required"),
        custom(function = "not_blank", message = "Field of Study is required")
    )]
    pub field_of_study: Option<String>,

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

impl NewEducation {
    pub fn into_entry(self) -> Result<Education, AppError> {
        let (Some(school), Some(degree), Some(field_of_study), Some(from)) = (
            self.school,
            self.degree,
            self.field_of_study,
            self.from.as_deref().and_then(parse_date),
        ) else {
            return Err(AppError::InternalError("Education request was not validated".into()));
        };

        Ok(Education {
            id: Uuid::new_v4(),
            school,
            degree,
            field_of_study,
            from,
            to: self.to.as_deref().and_then(parse_date),
            current: self.current.unwrap_or(false),
            description: self.description,
        })
    }
}
