/*!
 * Core types and data structures for the manifest generator
 */

use serde::Deserialize;
use strum::{AsRefStr, Display};
use uuid::Uuid;

use crate::error::Result;

/// Kind of project item a file is registered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, AsRefStr)]
pub enum ItemKind {
    /// Compilation unit
    ClCompile,
    /// Header / include file
    ClInclude,
}

/// A named IDE folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Display name, unique within a document
    pub name: String,
    /// Identifier assigned for this document build
    pub id: Uuid,
    /// Extensions the IDE associates with this group
    pub extensions: Option<Vec<String>>,
}

impl Group {
    /// The identifier in the braced form the project system expects
    pub fn braced_id(&self) -> String {
        self.id.braced().to_string()
    }
}

/// A single file reference inside the manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// Path relative to the project root, backslash separated
    pub include: String,
    /// Item kind the file is registered as
    pub kind: ItemKind,
    /// Name of the owning group
    pub group: String,
}

/// In-memory manifest: groups followed by compile and header items
#[derive(Debug, Clone, Default)]
pub struct ManifestDocument {
    groups: Vec<Group>,
    compile: Vec<FileEntry>,
    include: Vec<FileEntry>,
}

impl ManifestDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a group. Names must be unique.
    pub fn add_group(&mut self, group: Group) -> Result<()> {
        crate::ensure!(
            self.group(&group.name).is_none(),
            Config,
            "Duplicate group name: {}",
            group.name
        );
        self.groups.push(group);
        Ok(())
    }

    /// Append an entry to the block matching its kind
    pub fn push_entry(&mut self, entry: FileEntry) -> Result<()> {
        crate::ensure!(
            self.group(&entry.group).is_some(),
            Config,
            "Entry {} references unknown group {}",
            entry.include,
            entry.group
        );
        match entry.kind {
            ItemKind::ClCompile => self.compile.push(entry),
            ItemKind::ClInclude => self.include.push(entry),
        }
        Ok(())
    }

    /// Look up a group by display name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Entries of one kind, in emission order
    pub fn entries(&self, kind: ItemKind) -> &[FileEntry] {
        match kind {
            ItemKind::ClCompile => &self.compile,
            ItemKind::ClInclude => &self.include,
        }
    }

    /// Total number of file entries
    pub fn entry_count(&self) -> usize {
        self.compile.len() + self.include.len()
    }
}
