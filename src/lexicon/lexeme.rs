//! A [`Lexeme`]: a single word as an ordered sequence of phonemes.

use std::fmt;

use crate::phon::phoneme::Phoneme;

/// A word: an ordered list of [`Phoneme`]s plus its gloss and owning language.
#[derive(Debug, Clone)]
pub struct Lexeme {
    phonemes: Vec<Phoneme>,
    meaning: String,
    language_code: String,
    name: String,
    representation: String,
}

impl Lexeme {
    pub fn new(phonemes: Vec<Phoneme>, meaning: String, language_code: String) -> Self {
        let name = Self::compute_name(&phonemes);
        let representation = Self::compute_representation(&phonemes);
        Lexeme { phonemes, meaning, language_code, name, representation }
    }

    fn compute_name(phonemes: &[Phoneme]) -> String {
        phonemes.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
    }

    fn compute_representation(phonemes: &[Phoneme]) -> String {
        phonemes.iter().map(|p| p.representation()).collect()
    }

    pub fn recompute(&mut self) {
        self.name = Self::compute_name(&self.phonemes);
        self.representation = Self::compute_representation(&self.phonemes);
    }

    pub fn phonemes(&self) -> &[Phoneme] {
        &self.phonemes
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn set_language_code(&mut self, code: impl Into<String>) {
        self.language_code = code.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn representation(&self) -> &str {
        &self.representation
    }

    pub fn len(&self) -> usize {
        self.phonemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phonemes.is_empty()
    }
}

impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.phonemes == other.phonemes
    }
}
impl Eq for Lexeme {}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.representation)
    }
}

/// A bundle of lexemes sharing one gloss: multiple words attested for the same
/// meaning in a language.
#[derive(Debug, Clone)]
pub struct Synonyms {
    lexemes: Vec<Lexeme>,
    representation: String,
}

impl Synonyms {
    /// Panics if `lexemes` is empty: a `Synonyms` bundle always carries at
    /// least the lexeme that created it.
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        assert!(!lexemes.is_empty(), "Synonyms requires at least one lexeme");
        let representation = Self::compute_representation(&lexemes);
        Synonyms { lexemes, representation }
    }

    fn compute_representation(lexemes: &[Lexeme]) -> String {
        lexemes.iter().map(|l| l.representation()).collect::<Vec<_>>().join("|")
    }

    pub fn meaning(&self) -> &str {
        self.lexemes[0].meaning()
    }

    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    pub fn representation(&self) -> &str {
        &self.representation
    }

    pub fn push(&mut self, lexeme: Lexeme) {
        self.lexemes.push(lexeme);
        self.representation = Self::compute_representation(&self.lexemes);
    }

    pub fn set_language_code(&mut self, code: impl Into<String> + Clone) {
        for lexeme in &mut self.lexemes {
            lexeme.set_language_code(code.clone());
        }
    }

    pub fn merge(mut self, other: Synonyms) -> Synonyms {
        self.lexemes.extend(other.lexemes);
        self.representation = Self::compute_representation(&self.lexemes);
        self
    }
}

/// What a [`crate::lexicon::language::Language`] stores under a single gloss:
/// either one attested word or a bundle of synonyms.
#[derive(Debug, Clone)]
pub enum Entry {
    Single(Lexeme),
    Multiple(Synonyms),
}

impl Entry {
    pub fn meaning(&self) -> &str {
        match self {
            Entry::Single(lexeme) => lexeme.meaning(),
            Entry::Multiple(synonyms) => synonyms.meaning(),
        }
    }

    pub fn representation(&self) -> &str {
        match self {
            Entry::Single(lexeme) => lexeme.representation(),
            Entry::Multiple(synonyms) => synonyms.representation(),
        }
    }

    /// The lexeme used for cross-language distance comparisons: the lexeme
    /// itself, or the first lexeme of a synonym bundle.
    pub fn representative(&self) -> &Lexeme {
        match self {
            Entry::Single(lexeme) => lexeme,
            Entry::Multiple(synonyms) => &synonyms.lexemes()[0],
        }
    }

    pub fn set_language_code(&mut self, code: impl Into<String> + Clone) {
        match self {
            Entry::Single(lexeme) => lexeme.set_language_code(code),
            Entry::Multiple(synonyms) => synonyms.set_language_code(code),
        }
    }

    /// Fold `other` into this entry: two singles with different representations
    /// become a `Multiple`; anything else appends/merges.
    pub fn merge(self, other: Entry) -> Entry {
        match (self, other) {
            (Entry::Single(a), Entry::Single(b)) if a == b => Entry::Single(a),
            (Entry::Single(a), Entry::Single(b)) => Entry::Multiple(Synonyms::new(vec![a, b])),
            (Entry::Single(a), Entry::Multiple(mut b)) => {
                b.lexemes.insert(0, a);
                b.representation = Synonyms::compute_representation(&b.lexemes);
                Entry::Multiple(b)
            }
            (Entry::Multiple(a), Entry::Single(b)) => {
                let mut a = a;
                a.push(b);
                Entry::Multiple(a)
            }
            (Entry::Multiple(a), Entry::Multiple(b)) => Entry::Multiple(a.merge(b)),
        }
    }
}
