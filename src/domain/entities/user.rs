use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display fields of a profile's owner, joined in when a profile is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl UserSummary {
    /// Owner reference for a profile whose user row could not be joined.
    pub fn unresolved(id: Uuid) -> Self {
        UserSummary { id, name: None, avatar: None }
    }
}
