//! Ordered, newest-first lists nested inside a profile.

use uuid::Uuid;

use crate::entities::{education::Education, experience::Experience, profile::Profile};

/// An entry that carries its own identifier.
pub trait Identified {
    fn id(&self) -> Uuid;
}

/// Selects one of the profile's nested lists.
pub trait SubCollection {
    type Entry: Identified + Send + Sync + 'static;

    /// Human-readable entry label used in not-found messages.
    const LABEL: &'static str;

    fn entries(profile: &Profile) -> &[Self::Entry];
    fn entries_mut(profile: &mut Profile) -> &mut Vec<Self::Entry>;
}

pub struct ExperienceList;

impl SubCollection for ExperienceList {
    type Entry = Experience;
    const LABEL: &'static str = "Experience";

    fn entries(profile: &Profile) -> &[Experience] {
        &profile.experience
    }

    fn entries_mut(profile: &mut Profile) -> &mut Vec<Experience> {
        &mut profile.experience
    }
}

pub struct EducationList;

impl SubCollection for EducationList {
    type Entry = Education;
    const LABEL: &'static str = "Education";

    fn entries(profile: &Profile) -> &[Education] {
        &profile.education
    }

    fn entries_mut(profile: &mut Profile) -> &mut Vec<Education> {
        &mut profile.education
    }
}

/// Puts `entry` at the head so the most recent entry comes first.
pub fn prepend_entry<E>(entries: &mut Vec<E>, entry: E) {
    entries.insert(0, entry);
}

/// Removes the first entry with `id`. A miss leaves `entries` untouched.
pub fn remove_entry<E: Identified>(entries: &mut Vec<E>, id: Uuid) -> Option<E> {
    let position = entries.iter().position(|entry| entry.id() == id)?;
    Some(entries.remove(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(Uuid);

    impl Identified for Item {
        fn id(&self) -> Uuid {
            self.0
        }
    }

    #[test]
    fn inserts_are_newest_first() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let mut entries = Vec::new();
        for id in &ids {
            prepend_entry(&mut entries, Item(*id));
        }

        let n = ids.len();
        for (k, id) in ids.iter().enumerate() {
            // k-th inserted (1-based k+1) sits at position n - (k + 1)
            assert_eq!(entries[n - (k + 1)].0, *id);
        }
    }

    #[test]
    fn removing_a_known_id_drops_exactly_that_entry() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut entries = vec![Item(a), Item(b), Item(c)];

        let removed = remove_entry(&mut entries, b);

        assert_eq!(removed, Some(Item(b)));
        assert_eq!(entries, vec![Item(a), Item(c)]);
    }

    #[test]
    fn removing_an_unknown_id_keeps_the_sequence() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut entries = vec![Item(a), Item(b)];

        assert!(remove_entry(&mut entries, Uuid::new_v4()).is_none());
        assert_eq!(entries, vec![Item(a), Item(b)]);
    }

    #[test]
    fn removing_from_an_empty_list_is_a_miss() {
        let mut entries: Vec<Item> = Vec::new();
        assert!(remove_entry(&mut entries, Uuid::new_v4()).is_none());
    }
}
