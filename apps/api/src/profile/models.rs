use std::collections::HashSet;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// The user's career record. Field names follow the wizard's camelCase wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub website: String,
    pub location: String,
    pub summary: String,
    pub experience: EntryList<Experience>,
    pub education: EntryList<Education>,
    pub projects: EntryList<Project>,
    pub certifications: EntryList<Certification>,
    pub languages: EntryList<Language>,
    /// Comma separated, exactly as typed. See [`Profile::skill_list`].
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Uuid,
    pub language: String,
    pub proficiency: String,
}

/// Client ids that are not UUIDs (the wizard uses `"1"` or a timestamp) read
/// as nil, so `push_new` and `rekey` replace them instead of rejecting the body.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_default())
}

/// A sub-list entry addressable by a list-local id.
pub trait Entry: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const SECTION: &'static str;

    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
    fn list_mut(profile: &mut Profile) -> &mut EntryList<Self>;
}

macro_rules! impl_entry {
    ($ty:ty, $section:literal, $field:ident) => {
        impl Entry for $ty {
            const SECTION: &'static str = $section;

            fn id(&self) -> Uuid {
                self.id
            }

            fn set_id(&mut self, id: Uuid) {
                self.id = id;
            }

            fn list_mut(profile: &mut Profile) -> &mut EntryList<Self> {
                &mut profile.$field
            }
        }
    };
}

impl_entry!(Experience, "experience", experience);
impl_entry!(Education, "education", education);
impl_entry!(Project, "project", projects);
impl_entry!(Certification, "certification", certifications);
impl_entry!(Language, "language", languages);

/// Ordered entries with ids unique within the list. Insertion order is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T> {
    entries: Vec<T>,
}

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Entry> EntryList<T> {
    /// Appends `entry` under a freshly generated id, ignoring any id it carried.
    pub fn push_new(&mut self, mut entry: T) -> &T {
        entry.set_id(self.fresh_id());
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    /// Edits in place. The stored entry keeps its id and position.
    pub fn replace(&mut self, id: Uuid, mut entry: T) -> Option<&T> {
        let slot = self.entries.iter_mut().find(|e| e.id() == id)?;
        entry.set_id(id);
        *slot = entry;
        Some(&*slot)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Gives a fresh id to every entry whose id is nil or already taken.
    pub fn rekey(&mut self) {
        let mut seen = HashSet::new();
        for i in 0..self.entries.len() {
            let id = self.entries[i].id();
            if id.is_nil() || !seen.insert(id) {
                let fresh = loop {
                    let candidate = Uuid::new_v4();
                    if !seen.contains(&candidate) && self.get(candidate).is_none() {
                        break candidate;
                    }
                };
                seen.insert(fresh);
                self.entries[i].set_id(fresh);
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.entries.iter().map(|e| e.id())
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}

impl<T> EntryList<T> {
    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Entry> FromIterator<T> for EntryList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = EntryList::default();
        for entry in iter {
            list.push_new(entry);
        }
        list
    }
}

/// Partial identity update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentityUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

impl Profile {
    pub fn apply_identity(&mut self, update: IdentityUpdate) {
        let IdentityUpdate {
            full_name,
            email,
            phone,
            linkedin,
            website,
            location,
        } = update;
        let pairs = [
            (&mut self.full_name, full_name),
            (&mut self.email, email),
            (&mut self.phone, phone),
            (&mut self.linkedin, linkedin),
            (&mut self.website, website),
            (&mut self.location, location),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                *field = value;
            }
        }
    }

    /// Makes every sub-list id unique and non-nil. Used after a wholesale replace.
    pub fn rekey_entries(&mut self) {
        self.experience.rekey();
        self.education.rekey();
        self.projects.rekey();
        self.certifications.rekey();
        self.languages.rekey();
    }

    /// Structured view of `skills`: split on commas, items trimmed, empties
    /// dropped, case-insensitive duplicates removed keeping the first spelling.
    pub fn skill_list(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_lowercase()))
            .map(str::to_string)
            .collect()
    }

    pub fn set_skill_list<S: AsRef<str>>(&mut self, skills: &[S]) {
        self.skills = skills
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
    }

    /// Role of the first experience entry, if it has one.
    pub fn first_role(&self) -> Option<&str> {
        self.experience
            .first()
            .map(|e| e.role.trim())
            .filter(|r| !r.is_empty())
    }
}
