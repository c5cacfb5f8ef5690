use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const NO_PROFILE_FOR_USER: &str = "There is no profile for this user";
pub const PROFILE_NOT_FOUND: &str = "Profile not found";
pub const NO_GITHUB_PROFILE: &str = "No Github profile found";
pub const GITHUB_UNAVAILABLE: &str = "Github service unavailable";
pub const USER_DELETED: &str = "User deleted";
pub const OWNER_NOT_FOUND: &str = "Owning user does not exist";

/// Number of repositories requested from GitHub per lookup.
pub const GITHUB_REPO_LIMIT: &str = "5";
pub const GITHUB_REPO_SORT: &str = "created:asc";
