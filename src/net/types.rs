//! Wire DTOs for the activities service.
//!
//! DESIGN
//! ======
//! `GET /activities` returns a JSON object keyed by activity name. The key
//! order is the order the service wants cards shown in, so the directory is
//! decoded into an ordered list instead of a map.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// One activity as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Human-readable description.
    pub description: String,
    /// Free-form schedule text (e.g. `"Fridays, 3:30 PM - 5:00 PM"`).
    pub schedule: String,
    /// Capacity. The service enforces it; the client only displays it.
    pub max_participants: i64,
    /// Participant identifiers in signup order.
    pub participants: Vec<String>,
}

/// The full activity collection, in service order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityDirectory {
    entries: Vec<(String, Activity)>,
}

impl ActivityDirectory {
    /// Build a directory from `(name, activity)` pairs. A repeated name
    /// replaces the earlier entry in place.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Activity)>,
    {
        let mut directory = Self::default();
        for (name, activity) in entries {
            directory.insert(name, activity);
        }
        directory
    }

    fn insert(&mut self, name: String, activity: Activity) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(name, activity)| (name.as_str(), activity))
    }

    /// Activity names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, activity)| activity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for ActivityDirectory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DirectoryVisitor;

        impl<'de> Visitor<'de> for DirectoryVisitor {
            type Value = ActivityDirectory;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by activity name")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut directory = ActivityDirectory::default();
                while let Some((name, activity)) = map.next_entry::<String, Activity>()? {
                    directory.insert(name, activity);
                }
                Ok(directory)
            }
        }

        deserializer.deserialize_map(DirectoryVisitor)
    }
}

/// Body of a signup/unregister response. Success carries `message`,
/// rejection carries `detail`; either may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MutationReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}
