//! Document model
//!
//! A document maps group names to ordered participant lists. The on-disk form is
//! a JSON object whose keys are group names; group order follows the source
//! file and is kept through load and save.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// JSON key holding a participant's name
pub const NAME_KEY: &str = "Есім";

/// JSON key holding a participant's repertoire
pub const REPERTOIRE_KEY: &str = "Репертуар";

/// One participant record: a name and the pieces they perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Merge key within a group
    #[serde(rename = "Есім")]
    pub name: String,

    /// Piece names in first-seen order
    #[serde(rename = "Репертуар")]
    pub repertoire: Vec<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, repertoire: Vec<String>) -> Self {
        Self {
            name: name.into(),
            repertoire,
        }
    }
}

/// A named group of participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub participants: Vec<Participant>,
}

impl Group {
    pub fn new(name: impl Into<String>, participants: Vec<Participant>) -> Self {
        Self {
            name: name.into(),
            participants,
        }
    }
}

/// In-memory repertoire document
///
/// Groups are stored in insertion order. Inserting a group whose name already
/// exists replaces its participants without moving it, which matches how a JSON
/// object with a repeated key is read (first position, last value).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    groups: Vec<Group>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in document order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Mutable access to all groups in document order
    pub fn groups_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.groups.iter_mut()
    }

    /// Group names in document order
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Look up a group's participants by name
    pub fn group(&self, name: &str) -> Option<&[Participant]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.participants.as_slice())
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    /// Insert or replace a group, keeping the position of an existing one
    pub fn insert_group(&mut self, name: impl Into<String>, participants: Vec<Participant>) {
        let name = name.into();
        match self.groups.iter_mut().find(|g| g.name == name) {
            Some(existing) => existing.participants = participants,
            None => self.groups.push(Group::new(name, participants)),
        }
    }

    /// Participants of the named group, appending an empty group if absent
    pub fn group_or_insert(&mut self, name: &str) -> &mut Vec<Participant> {
        let index = match self.groups.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                self.groups.push(Group::new(name, Vec::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].participants
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &group.participants)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping group names to participant lists")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Document, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut document = Document::new();
        while let Some((name, participants)) = access.next_entry::<String, Vec<Participant>>()? {
            document.insert_group(name, participants);
        }
        Ok(document)
    }
}
