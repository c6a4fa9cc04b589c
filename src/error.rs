//! Error types for the phylo pipeline.

use thiserror::Error;

/// Top-level error type returned by the pipeline driver and the CLI binary.
#[derive(Debug, Error)]
pub enum PhyloError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalogue CSV could not be parsed into languages
    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// JSON (de)serialization error, e.g. writing the tree output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The static linguistic tables failed to parse
    #[error("linguistic tables error: {0}")]
    Tables(String),

    /// Fewer than two languages survived catalogue filtering; no tree can be built
    #[error("need at least two languages to build a tree, got {0}")]
    InsufficientLanguages(usize),
}

/// Errors raised while loading and filtering the catalogue CSV.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// A required column (`Code`, `Language`, `Family`, `Group`, `Code2`, `#`) was missing.
    #[error("catalogue is missing required column: {0}")]
    MissingColumn(String),

    /// Underlying CSV reader error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The `#` (lexeme count) column could not be parsed as an integer.
    #[error("could not parse lexeme count {value:?} for language {code}")]
    InvalidLexemeCount { code: String, value: String },
}

/// Errors raised while parsing an IPA transcription into a [`crate::phon::phoneme::Phoneme`] sequence.
///
/// Both variants are recoverable at the call site: the offending lexeme is skipped and
/// the rest of the catalogue is still processed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IpaError {
    /// A character was neither a known letter, modifier, nor an ignored symbol.
    #[error("unrecognized IPA character {ch:?} in {context:?}")]
    Unrecognized { ch: char, context: String },

    /// A gathered symbol's letter has no entry in the IPA letters table.
    #[error("no letters-table entry for IPA symbol {letter:?}")]
    LookupMissing { letter: String },
}

/// Raised by the assignment (Hungarian algorithm) solver when no feasible
/// perfect matching exists, i.e. every remaining row is all-`DISALLOWED`.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("no feasible assignment: row {row} has no allowed column")]
pub struct AssignmentInfeasible {
    pub row: usize,
}
