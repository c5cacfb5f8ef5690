//! Turns raw profile input into a sparse update payload.
//!
//! A field is present only when its value is non-empty after trimming; an
//! absent field leaves the stored value as it is.

use crate::entities::{
    profile::{ProfileFields, ProfileInput},
    social::{SocialInput, SocialLinks},
};

pub fn sanitize_profile(input: ProfileInput) -> ProfileFields {
    ProfileFields {
        company: present(input.company),
        website: present(input.website),
        location: present(input.location),
        status: present(input.status),
        bio: present(input.bio),
        github_username: present(input.github_username),
        skills: present(input.skills).map(|raw| split_skills(&raw)),
        social: input.social.map(sanitize_social),
    }
}

/// Splits a comma separated list, trimming each entry and dropping blanks.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn sanitize_social(input: SocialInput) -> SocialLinks {
    SocialLinks {
        youtube: present(input.youtube),
        twitter: present(input.twitter),
        facebook: present(input.facebook),
        linkedin: present(input.linkedin),
        instagram: present(input.instagram),
    }
}

/// True when nothing but whitespace is left. Required-field checks use the
/// same rule, so a value that passes them is never dropped here.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(v))
}
