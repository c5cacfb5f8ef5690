use std::sync::Arc;

use uuid::Uuid;

use crate::{
    constants::{NO_PROFILE_FOR_USER, PROFILE_NOT_FOUND},
    entities::{
        education::NewEducation,
        experience::NewExperience,
        profile::{Profile, ProfileInput},
        sub_collection::{prepend_entry, remove_entry, EducationList, ExperienceList, SubCollection},
    },
    errors::AppError,
    repositories::profile::ProfileRepository,
    use_cases::{
        sanitizer::sanitize_profile,
        validation::{FieldRules, EDUCATION_RULES, EXPERIENCE_RULES, PROFILE_RULES},
    },
    utils::valid_uuid::valid_uuid,
};

/// Profile aggregate operations on top of a storage collaborator.
#[derive(Clone)]
pub struct ProfileHandler {
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub profile_rules: FieldRules,
    pub experience_rules: FieldRules,
    pub education_rules: FieldRules,
}

impl ProfileHandler {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>) -> Self {
        ProfileHandler {
            profile_repo,
            profile_rules: PROFILE_RULES,
            experience_rules: EXPERIENCE_RULES,
            education_rules: EDUCATION_RULES,
        }
    }

    /// Returns the caller's own profile
    pub async fn get_own_profile(&self, owner_id: &Uuid) -> Result<Profile, AppError> {
        self.profile_repo
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NO_PROFILE_FOR_USER.to_string()))
    }

    /// Looks a profile up by its owner's id as received on the wire. An id
    /// that does not parse is reported as a missing profile.
    pub async fn get_profile_by_user(&self, raw_user_id: &str) -> Result<Profile, AppError> {
        let user_id = valid_uuid(raw_user_id)
            .map_err(|_| AppError::NotFound(PROFILE_NOT_FOUND.to_string()))?;

        self.profile_repo
            .find_by_owner(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.to_string()))
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        self.profile_repo.find_all().await
    }

    /// Creates the owner's profile or merges the present fields into it.
    ///
    /// Find and write are two separate storage calls; concurrent upserts for
    /// the same owner resolve as last write wins.
    pub async fn upsert_profile(&self, owner_id: &Uuid, input: ProfileInput) -> Result<Profile, AppError> {
        self.profile_rules.check(&input)?;

        let fields = sanitize_profile(input);

        match self.profile_repo.find_by_owner(owner_id).await? {
            Some(_) => {
                let profile = self.profile_repo.update_profile(owner_id, &fields).await?;
                tracing::info!(owner_id = %owner_id, "Profile updated");
                Ok(profile)
            }
            None => {
                let profile = self.profile_repo.create_profile(owner_id, &fields).await?;
                tracing::info!(owner_id = %owner_id, profile_id = %profile.id, "Profile created");
                Ok(profile)
            }
        }
    }

    /// Removes the owner's profile and user record. An owner without a
    /// profile still loses the user record.
    pub async fn delete_account(&self, owner_id: &Uuid) -> Result<(), AppError> {
        self.profile_repo.delete_account(owner_id).await?;
        tracing::info!(owner_id = %owner_id, "Profile and user deleted");
        Ok(())
    }

    pub async fn add_experience(&self, owner_id: &Uuid, request: NewExperience) -> Result<Profile, AppError> {
        self.experience_rules.check(&request)?;
        let entry = request.into_entry()?;
        self.add_entry::<ExperienceList>(owner_id, entry).await
    }

    pub async fn remove_experience(&self, owner_id: &Uuid, raw_entry_id: &str) -> Result<Profile, AppError> {
        self.remove_entry::<ExperienceList>(owner_id, raw_entry_id).await
    }

    pub async fn add_education(&self, owner_id: &Uuid, request: NewEducation) -> Result<Profile, AppError> {
        self.education_rules.check(&request)?;
        let entry = request.into_entry()?;
        self.add_entry::<EducationList>(owner_id, entry).await
    }

    pub async fn remove_education(&self, owner_id: &Uuid, raw_entry_id: &str) -> Result<Profile, AppError> {
        self.remove_entry::<EducationList>(owner_id, raw_entry_id).await
    }

    /// Prepends `entry` to the selected list and saves the whole profile.
    pub async fn add_entry<C: SubCollection>(&self, owner_id: &Uuid, entry: C::Entry) -> Result<Profile, AppError> {
        let mut profile = self.get_own_profile(owner_id).await?;

        prepend_entry(C::entries_mut(&mut profile), entry);
        let saved = self.profile_repo.save_profile(&profile).await?;

        tracing::info!(
            owner_id = %owner_id,
            kind = C::LABEL,
            entries = C::entries(&saved).len(),
            "Entry added"
        );
        Ok(saved)
    }

    /// Drops the entry with the given id. A miss, malformed ids included, is a
    /// `NotFound` and nothing is written.
    pub async fn remove_entry<C: SubCollection>(&self, owner_id: &Uuid, raw_entry_id: &str) -> Result<Profile, AppError> {
        let mut profile = self.get_own_profile(owner_id).await?;
        let not_found = || AppError::NotFound(format!("{} not found", C::LABEL));

        let entry_id = valid_uuid(raw_entry_id).map_err(|_| not_found())?;
        remove_entry(C::entries_mut(&mut profile), entry_id).ok_or_else(not_found)?;

        let saved = self.profile_repo.save_profile(&profile).await?;

        tracing::info!(
            owner_id = %owner_id,
            kind = C::LABEL,
            entry_id = %entry_id,
            "Entry removed"
        );
        Ok(saved)
    }
}
