use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use crate::{
    constants::OWNER_NOT_FOUND,
    entities::{
        profile::{Profile, ProfileFields},
        user::UserSummary,
    },
    errors::AppError,
    repositories::profile::ProfileRepository,
};

/// Process-local profile store backed by concurrent maps. Used for local
/// development and tests; contents are lost on restart.
#[derive(Default)]
pub struct MemoryProfileRepo {
    profiles: DashMap<Uuid, Profile>,
    users: DashMap<Uuid, UserSummary>,
}

impl MemoryProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user so profile reads can join its display fields.
    pub fn insert_user(&self, user: UserSummary) {
        self.users.insert(user.id, user);
    }

    pub fn user_exists(&self, id: &Uuid) -> bool {
        self.users.contains_key(id)
    }

    fn with_owner(&self, mut profile: Profile) -> Profile {
        let owner_id = profile.owner_id();
        profile.user = self
            .users
            .get(&owner_id)
            .map(|user| user.value().clone())
            .unwrap_or_else(|| UserSummary::unresolved(owner_id));
        profile
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find_by_owner(&self, owner_id: &Uuid) -> Result<Option<Profile>, AppError> {
        let profile = self.profiles.get(owner_id).map(|p| p.value().clone());
        Ok(profile.map(|p| self.with_owner(p)))
    }

    async fn find_all(&self) -> Result<Vec<Profile>, AppError> {
        let mut profiles: Vec<Profile> = self
            .profiles
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        profiles.sort_by_key(|p| p.created_at);

        Ok(profiles.into_iter().map(|p| self.with_owner(p)).collect())
    }

    async fn create_profile(&self, owner_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError> {
        if !self.user_exists(owner_id) {
            return Err(AppError::NotFound(OWNER_NOT_FOUND.into()));
        }

        let profile = Profile::new(*owner_id, fields);

        match self.profiles.entry(*owner_id) {
            Entry::Occupied(_) => Err(AppError::InternalError(format!(
                "Profile for owner {owner_id} already exists"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(self.with_owner(profile))
            }
        }
    }

    async fn update_profile(&self, owner_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError> {
        let updated = {
            let mut stored = self
                .profiles
                .get_mut(owner_id)
                .ok_or_else(|| AppError::NotFound("Profile record".into()))?;
            fields.apply_to(stored.value_mut());
            stored.updated_at = Utc::now();
            stored.value().clone()
        };

        Ok(self.with_owner(updated))
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        let owner_id = profile.owner_id();
        let saved = {
            let mut stored = self
                .profiles
                .get_mut(&owner_id)
                .ok_or_else(|| AppError::NotFound("Profile record".into()))?;
            let mut next = profile.clone();
            next.id = stored.id;
            next.created_at = stored.created_at;
            next.updated_at = Utc::now();
            *stored.value_mut() = next.clone();
            next
        };

        Ok(self.with_owner(saved))
    }

    async fn delete_account(&self, owner_id: &Uuid) -> Result<(), AppError> {
        self.profiles.remove(owner_id);
        self.users.remove(owner_id);
        Ok(())
    }
}
