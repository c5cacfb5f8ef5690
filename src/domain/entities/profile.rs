use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        education::Education,
        experience::Experience,
        social::{SocialInput, SocialLinks},
        user::UserSummary,
    },
    use_cases::validation::{has_skills, not_blank},
};

// ───── Database Models ───────────────────────────────────────────────

/// A `profiles` row joined with its owner's display fields.
#[derive(Debug, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: Json<SocialLinks>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_name: Option<String>,
    pub owner_avatar: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user: UserSummary {
                id: row.owner_id,
                name: row.owner_name,
                avatar: row.owner_avatar,
            },
            company: row.company,
            website: row.website,
            location: row.location,
            status: row.status,
            bio: row.bio,
            github_username: row.github_username,
            skills: row.skills,
            social: row.social.0,
            experience: row.experience.0,
            education: row.education.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user: UserSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// A fresh profile for `owner_id` holding only the present fields.
    pub fn new(owner_id: Uuid, fields: &ProfileFields) -> Self {
        let now = Utc::now();
        let mut profile = Profile {
            id: Uuid::new_v4(),
            user: UserSummary::unresolved(owner_id),
            company: None,
            website: None,
            location: None,
            status: None,
            bio: None,
            github_username: None,
            skills: Vec::new(),
            social: SocialLinks::default(),
            experience: Vec::new(),
            education: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        fields.apply_to(&mut profile);
        profile
    }

    pub fn owner_id(&self) -> Uuid {
        self.user.id
    }
}

// ───── Input & Validation ───────────────────────────────────────────

/// Body of a create-or-update request, before sanitizing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,

    #[validate(
        required(message = "Status is required"),
        custom(function = "not_blank", message = "Status is required")
    )]
    pub status: Option<String>,

    /// Comma separated, e.g. `"rust, sql"`.
    #[validate(
        required(message = "Skills is required"),
        custom(function = "has_skills", message = "Skills is required")
    )]
    pub skills: Option<String>,

    pub bio: Option<String>,

    #[serde(alias = "githubusername")]
    pub github_username: Option<String>,

    pub social: Option<SocialInput>,
}

/// Sparse update payload: `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Option<SocialLinks>,
}

impl ProfileFields {
    /// Overwrites the keys present in `self` and keeps everything else.
    pub fn apply_to(&self, profile: &mut Profile) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        set(&mut profile.company, &self.company);
        set(&mut profile.website, &self.website);
        set(&mut profile.location, &self.location);
        set(&mut profile.status, &self.status);
        set(&mut profile.bio, &self.bio);
        set(&mut profile.github_username, &self.github_username);

        if let Some(skills) = &self.skills {
            profile.skills = skills.clone();
        }
        if let Some(social) = &self.social {
            profile.social = social.clone();
        }
    }
}
