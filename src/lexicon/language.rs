//! [`Language`]: a vocabulary plus its place in the reconstruction tree.
//!
//! Mutual parent/child object references don't fit Rust ownership, so every
//! [`Language`] lives in a [`Phylogeny`] arena and parent/child links are
//! [`LanguageId`] indices plus a distance.

use std::collections::HashMap;

use crate::lexicon::lexeme::Entry;

/// An index into a [`Phylogeny`]'s arena. Cheap to copy, stable for the
/// lifetime of the arena (languages are never removed, only added).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(usize);

/// A natural or reconstructed language: a name, code, and vocabulary.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    code: String,
    entries: Vec<Entry>,
    by_meaning: HashMap<String, usize>,
    parent: Option<(LanguageId, f64)>,
    children: Vec<(LanguageId, f64)>,
}

impl Language {
    pub fn new(name: impl Into<String>, code: impl Into<String>, mut entries: Vec<Entry>) -> Self {
        let code = code.into();
        for entry in &mut entries {
            entry.set_language_code(code.clone());
        }
        let by_meaning = entries.iter().enumerate().map(|(i, e)| (e.meaning().to_string(), i)).collect();
        Language { name: name.into(), code, entries, by_meaning, parent: None, children: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Rename this language's code, propagating the change to every
    /// contained entry (and, through it, every lexeme's `language_code`).
    pub fn set_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        for entry in &mut self.entries {
            entry.set_language_code(code.clone());
        }
        self.code = code;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, meaning: &str) -> Option<&Entry> {
        self.by_meaning.get(meaning).map(|&i| &self.entries[i])
    }

    pub fn entry_mut(&mut self, meaning: &str) -> Option<&mut Entry> {
        let idx = *self.by_meaning.get(meaning)?;
        Some(&mut self.entries[idx])
    }

    /// Insert or overwrite the entry for `entry.meaning()`.
    pub fn set_entry(&mut self, entry: Entry) {
        let meaning = entry.meaning().to_string();
        if let Some(&idx) = self.by_meaning.get(&meaning) {
            self.entries[idx] = entry;
        } else {
            self.by_meaning.insert(meaning, self.entries.len());
            self.entries.push(entry);
        }
    }

    pub fn meanings(&self) -> impl Iterator<Item = &str> {
        self.by_meaning.keys().map(|s| s.as_str())
    }

    /// Meanings attested by both `self` and `other`.
    pub fn shared_meanings<'a>(&'a self, other: &'a Language) -> impl Iterator<Item = &'a str> {
        self.by_meaning.keys().filter(move |m| other.by_meaning.contains_key(*m)).map(|s| s.as_str())
    }

    pub fn parent(&self) -> Option<(LanguageId, f64)> {
        self.parent
    }

    pub fn children(&self) -> &[(LanguageId, f64)] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena owner of every [`Language`] in a reconstruction run.
#[derive(Debug, Default)]
pub struct Phylogeny {
    arena: Vec<Language>,
}

impl Phylogeny {
    pub fn new() -> Self {
        Phylogeny { arena: Vec::new() }
    }

    pub fn insert(&mut self, language: Language) -> LanguageId {
        self.arena.push(language);
        LanguageId(self.arena.len() - 1)
    }

    pub fn get(&self, id: LanguageId) -> &Language {
        &self.arena[id.0]
    }

    pub fn get_mut(&mut self, id: LanguageId) -> &mut Language {
        &mut self.arena[id.0]
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = LanguageId> {
        (0..self.arena.len()).map(LanguageId)
    }

    /// Link `child` under `parent` at the given evolutionary `distance`.
    pub fn connect(&mut self, parent: LanguageId, child: LanguageId, distance: f64) {
        self.arena[parent.0].children.push((child, distance));
        self.arena[child.0].parent = Some((parent, distance));
    }
}
