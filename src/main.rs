//! `phylo build`: reconstruct a language family tree from an IPA catalogue.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use phylo::config::PhyloConfig;
use phylo::data::LinguisticTables;
use phylo::distance::matrix::NamedMatrix;
use phylo::distance::{language as language_distance, phoneme as phoneme_distance};
use phylo::lexicon::language::Phylogeny;
use phylo::lexicon::tree::Tree;
use phylo::logging;
use phylo::output::tree_to_node;
use phylo::phon::phoneme::Phoneme;
use phylo::reconstruct::{self, ConcatenateMerge};
use phylo::{catalogue, nj};

#[derive(Parser)]
#[command(name = "phylo", version, about = "Reconstruct language family trees from IPA vocabularies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a catalogue, build the distance matrices, and write the tree
    Build {
        /// CSV catalogue of languages and their IPA-transcribed vocabulary
        #[arg(long)]
        catalogue: PathBuf,

        /// Minimum lexeme count for a language to be included
        #[arg(long)]
        min_words: Option<u32>,

        /// Write the phoneme distance matrix here as CSV
        #[arg(long)]
        phoneme_matrix_csv: Option<PathBuf>,

        /// Write the language distance matrix here as CSV
        #[arg(long)]
        language_matrix_csv: Option<PathBuf>,

        /// Write the tree topology (no vocabulary) here as JSON
        #[arg(long)]
        topology_out: PathBuf,

        /// Also reconstruct ancestral vocabularies
        #[arg(long)]
        reconstruct: bool,

        /// Synonymy-vs-merge threshold for reconstruction
        #[arg(long)]
        threshold: Option<f64>,

        /// Write the reconstructed tree with vocabularies here as JSON
        #[arg(long)]
        vocab_out: Option<PathBuf>,

        /// Override PHYLO_LOG_LEVEL for this run
        #[arg(long)]
        log_level: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logging() {
        eprintln!("failed to initialize logging: {err}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Fatal(message)) => {
            tracing::error!("{message}");
            ExitCode::from(1)
        }
        Err(RunError::InsufficientLanguages(n)) => {
            tracing::error!("need at least two languages to build a tree, got {n}");
            ExitCode::from(2)
        }
    }
}

enum RunError {
    Fatal(String),
    InsufficientLanguages(usize),
}

impl From<phylo::error::CatalogueError> for RunError {
    fn from(err: phylo::error::CatalogueError) -> Self {
        RunError::Fatal(err.to_string())
    }
}

impl From<std::io::Error> for RunError {
    fn from(err: std::io::Error) -> Self {
        RunError::Fatal(err.to_string())
    }
}

impl From<serde_json::Error> for RunError {
    fn from(err: serde_json::Error) -> Self {
        RunError::Fatal(err.to_string())
    }
}

impl From<phylo::error::PhyloError> for RunError {
    fn from(err: phylo::error::PhyloError) -> Self {
        match err {
            phylo::error::PhyloError::InsufficientLanguages(n) => RunError::InsufficientLanguages(n),
            other => RunError::Fatal(other.to_string()),
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let Command::Build { catalogue, min_words, phoneme_matrix_csv, language_matrix_csv, topology_out, reconstruct: do_reconstruct, threshold, vocab_out, log_level } = cli.command;

    if let Some(level) = log_level {
        std::env::set_var(phylo::config::env::vars::LOG_LEVEL, level);
    }

    let config = PhyloConfig::from_env();
    let min_words = min_words.unwrap_or(config.min_words);
    let threshold = threshold.unwrap_or(config.threshold);

    let tables = LinguisticTables::embedded().map_err(|e| RunError::Fatal(e.to_string()))?;

    let span = tracing::info_span!("catalogue_load", path = %catalogue.display());
    let languages = {
        let _guard = span.enter();
        catalogue::load_catalogue(&catalogue, min_words, &tables)?
    };
    let languages: Vec<_> = languages.into_iter().filter(|l| !l.entries().is_empty()).collect();

    if languages.len() < 2 {
        return Err(RunError::InsufficientLanguages(languages.len()));
    }

    let empty_phoneme = Phoneme::empty(&tables.features);
    let mut all_phonemes: BTreeSet<Phoneme> = BTreeSet::new();
    for language in &languages {
        for entry in language.entries() {
            for lexeme in entry_lexemes(entry) {
                all_phonemes.extend(lexeme.phonemes().iter().cloned());
            }
        }
    }
    let mut phoneme_names: Vec<Phoneme> = all_phonemes.into_iter().collect();
    phoneme_names.push(empty_phoneme.clone());

    tracing::info!(phoneme_count = phoneme_names.len(), "building phoneme distance matrix");
    let pdm = build_pdm(phoneme_names, &tables, &config);
    if let Some(path) = &phoneme_matrix_csv {
        pdm.to_csv(path)?;
    }

    let language_codes: Vec<String> = languages.iter().map(|l| l.code().to_string()).collect();
    tracing::info!(language_count = language_codes.len(), "building language distance matrix");
    let ldm = NamedMatrix::build(language_codes.clone(), language_codes.clone(), |a, b| {
        let la = languages.iter().find(|l| l.code() == a).expect("row key came from language_codes");
        let lb = languages.iter().find(|l| l.code() == b).expect("column key came from language_codes");
        language_distance::distance(la, lb, &empty_phoneme, &pdm)
    });
    if let Some(path) = &language_matrix_csv {
        ldm.to_csv(path)?;
    }

    let mut phylogeny = Phylogeny::new();
    let leaves: Vec<(String, _)> = languages
        .into_iter()
        .map(|language| {
            let code = language.code().to_string();
            (code, phylogeny.insert(language))
        })
        .collect();

    let root = nj::build_tree(&mut phylogeny, &leaves, &ldm.symmetrized())?;

    let topology_tree = Tree::new(&phylogeny, root);
    let topology_node = tree_to_node(&topology_tree, false);
    std::fs::write(&topology_out, serde_json::to_string_pretty(&topology_node)?)?;
    tracing::info!(path = %topology_out.display(), "wrote tree topology");

    if do_reconstruct {
        reconstruct::reconstruct_protolanguages(&mut phylogeny, root, &pdm, &empty_phoneme, threshold, &ConcatenateMerge);
        let reconstructed_tree = Tree::new(&phylogeny, root);
        let vocab_node = tree_to_node(&reconstructed_tree, true);
        let path = vocab_out.unwrap_or_else(|| topology_out.with_file_name("reconstructed.json"));
        std::fs::write(&path, serde_json::to_string_pretty(&vocab_node)?)?;
        tracing::info!(path = %path.display(), "wrote reconstructed vocabularies");
    }

    Ok(())
}

fn entry_lexemes(entry: &phylo::lexicon::lexeme::Entry) -> Vec<&phylo::lexicon::lexeme::Lexeme> {
    match entry {
        phylo::lexicon::lexeme::Entry::Single(lexeme) => vec![lexeme],
        phylo::lexicon::lexeme::Entry::Multiple(synonyms) => synonyms.lexemes().iter().collect(),
    }
}

#[cfg(not(feature = "parallel"))]
fn build_pdm(names: Vec<Phoneme>, tables: &LinguisticTables, config: &PhyloConfig) -> NamedMatrix<Phoneme, f64> {
    NamedMatrix::build(names.clone(), names, |a, b| phoneme_distance::distance(a, b, &tables.features, &config.phoneme_distance))
}

#[cfg(feature = "parallel")]
fn build_pdm(names: Vec<Phoneme>, tables: &LinguisticTables, config: &PhyloConfig) -> NamedMatrix<Phoneme, f64> {
    NamedMatrix::build_parallel(names.clone(), names, |a, b| phoneme_distance::distance(a, b, &tables.features, &config.phoneme_distance))
}
