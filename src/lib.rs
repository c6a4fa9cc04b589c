// Copyright 2025 Roberto Antunes
//
// Licensed under the Functional Source License, Version 1.1 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://github.com/RobAntunes/lingodb/blob/main/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # phylo
//!
//! Reconstructs evolutionary trees of natural languages from IPA-transcribed
//! vocabularies.
//!
//! Given a catalogue of languages and their Swadesh-style word lists, phylo:
//!
//! 1. Parses every word into a sequence of [`phon::phoneme::Phoneme`]s from its
//!    IPA transcription ([`phon::ipa`]).
//! 2. Scores every phoneme pair by the cost of a minimum-cost feature
//!    reassignment ([`distance::phoneme`]).
//! 3. Scores every lexeme pair by Needleman-Wunsch alignment over phonemes
//!    ([`distance::lexeme`]).
//! 4. Scores every language pair by mean lexeme distance over shared
//!    vocabulary ([`distance::language`]).
//! 5. Builds a binary tree over the languages by neighbor-joining
//!    ([`nj`]).
//! 6. Reconstructs each internal node's vocabulary from its two children,
//!    splitting into synonym bundles where the children's words are too
//!    different to be cognates ([`reconstruct`]).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use phylo::{catalogue, config::PhyloConfig, data::LinguisticTables};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = LinguisticTables::embedded()?;
//! let config = PhyloConfig::default();
//! let languages = catalogue::load_catalogue("catalogue.csv", config.min_words, &tables)?;
//! println!("loaded {} languages", languages.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`phon`]: articulatory features, phonemes, and the IPA parser
//! - [`lexicon`]: lexemes, languages, and the reconstruction tree's arena
//! - [`distance`]: the phoneme/lexeme/language distance oracles, the generic
//!   matrix container they share, and the assignment-problem solver underneath
//! - [`nj`]: neighbor-joining tree construction
//! - [`reconstruct`]: ancestral vocabulary reconstruction
//! - [`catalogue`]: CSV catalogue loading
//! - [`output`]: JSON tree serialization
//! - [`config`]: pipeline configuration and environment variables
//! - [`logging`]: structured logging setup

#![warn(missing_debug_implementations)]

pub mod catalogue;
pub mod config;
pub mod data;
pub mod distance;
pub mod error;
pub mod lexicon;
pub mod logging;
pub mod nj;
pub mod output;
pub mod phon;
pub mod reconstruct;

pub use crate::error::PhyloError;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
