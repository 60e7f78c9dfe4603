//! Nickname tables and accessors.
//!
//! A nickname tree is plain data: each entry maps a shorthand to either a
//! canonical header name or a nested group. Accessors are built on top
//! of it by borrowing the owning registry explicitly, so walking the tree
//! never creates headers; they appear on first access.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::header::Header;
use crate::registry::HeaderRegistry;

/// Separator for dotted nickname paths, e.g. `accessControl.allowMethods`.
pub const PATH_SEPARATOR: char = '.';

/// One nickname table entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NicknameEntry {
    /// Shorthand for a canonical header name.
    Canonical(String),
    /// A nested family of nicknames.
    Group(NicknameTree),
}

/// Recursive nickname table, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct NicknameTree {
    entries: IndexMap<String, NicknameEntry>,
}

impl NicknameTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_leaf(&mut self, nickname: impl Into<String>, canonical: impl Into<String>) {
        self.entries
            .insert(nickname.into(), NicknameEntry::Canonical(canonical.into()));
    }

    pub fn insert_group(&mut self, nickname: impl Into<String>, group: NicknameTree) {
        self.entries.insert(nickname.into(), NicknameEntry::Group(group));
    }

    pub fn get(&self, nickname: &str) -> Option<&NicknameEntry> {
        self.entries.get(nickname)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NicknameEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical name for a top-level shorthand.
    pub fn canonical(&self, nickname: &str) -> Option<&str> {
        match self.entries.get(nickname)? {
            NicknameEntry::Canonical(name) => Some(name),
            NicknameEntry::Group(_) => None,
        }
    }

    /// Walk a sequence of nicknames down through groups.
    pub fn lookup<'a, I>(&self, path: I) -> Option<&NicknameEntry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = path.into_iter();
        let mut entry = self.entries.get(segments.next()?)?;
        for segment in segments {
            match entry {
                NicknameEntry::Group(tree) => entry = tree.entries.get(segment)?,
                NicknameEntry::Canonical(_) => return None,
            }
        }
        Some(entry)
    }

    /// Canonical name for a dotted path such as `accessControl.maxAge`.
    pub fn resolve_path(&self, path: &str) -> Option<&str> {
        match self.lookup(path.split(PATH_SEPARATOR))? {
            NicknameEntry::Canonical(name) => Some(name),
            NicknameEntry::Group(_) => None,
        }
    }

    /// Overlay `overrides` on a copy of this tree. An override replaces
    /// the whole entry, groups included.
    pub fn merged(&self, overrides: &NicknameTree) -> NicknameTree {
        let mut merged = self.clone();
        for (nickname, entry) in &overrides.entries {
            merged.entries.insert(nickname.clone(), entry.clone());
        }
        merged
    }

    /// Every leaf as `(dotted path, canonical name)`, depth first.
    pub fn paths(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for (nickname, entry) in &self.entries {
            let path = if prefix.is_empty() {
                nickname.clone()
            } else {
                format!("{prefix}{PATH_SEPARATOR}{nickname}")
            };
            match entry {
                NicknameEntry::Canonical(name) => out.push((path, name.clone())),
                NicknameEntry::Group(tree) => tree.collect_paths(&path, out),
            }
        }
    }
}

/// Accessors for one level of the nickname tree, bound to a registry.
///
/// ```
/// use headerset::{HeaderRegistry, RegistryConfig, Seed};
///
/// let mut registry = HeaderRegistry::new(Seed::default(), RegistryConfig::default()).unwrap();
/// registry
///     .nicknames()
///     .and_then(|n| n.group("accessControl"))
///     .and_then(|g| g.header("allowMethods"))
///     .unwrap()
///     .add(["PUT", "POST"]);
/// ```
pub struct NicknameScope<'r> {
    registry: &'r mut HeaderRegistry,
    path: Vec<String>,
}

impl<'r> NicknameScope<'r> {
    pub(crate) fn new(registry: &'r mut HeaderRegistry) -> Self {
        Self {
            registry,
            path: Vec::new(),
        }
    }

    fn level(&self) -> Option<&NicknameTree> {
        let root = self.registry.accessors()?;
        if self.path.is_empty() {
            return Some(root);
        }
        match root.lookup(self.path.iter().map(String::as_str))? {
            NicknameEntry::Group(tree) => Some(tree),
            NicknameEntry::Canonical(_) => None,
        }
    }

    /// Nicknames available at this level.
    pub fn names(&self) -> Vec<String> {
        self.level()
            .map(|tree| tree.entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Get or create the header a leaf nickname stands for.
    pub fn header(self, nickname: &str) -> Option<&'r mut Header> {
        let canonical = match self.level()?.get(nickname)? {
            NicknameEntry::Canonical(name) => name.clone(),
            NicknameEntry::Group(_) => return None,
        };
        let registry = self.registry;
        Some(registry.get_canonical(&canonical))
    }

    /// Descend into a nested group.
    pub fn group(mut self, nickname: &str) -> Option<NicknameScope<'r>> {
        let is_group = matches!(self.level()?.get(nickname)?, NicknameEntry::Group(_));
        if !is_group {
            return None;
        }
        self.path.push(nickname.to_string());
        Some(self)
    }
}
