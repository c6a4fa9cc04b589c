//! Lexeme-to-lexeme distance: Needleman-Wunsch alignment over phonemes, using
//! a precomputed phoneme distance matrix as the substitution/gap cost table.

use crate::distance::matrix::NamedMatrix;
use crate::lexicon::lexeme::Lexeme;
use crate::phon::phoneme::Phoneme;

/// Minimum-cost global alignment of `source` against `target`, normalized by
/// total phoneme count so longer words aren't automatically "more different".
///
/// `pdm` must contain an entry for every `(phoneme, empty_phoneme)` pair that
/// appears in either lexeme, in both orders.
pub fn distance(source: &Lexeme, target: &Lexeme, empty_phoneme: &Phoneme, pdm: &NamedMatrix<Phoneme, f64>) -> f64 {
    let source_len = source.len();
    let target_len = target.len();
    if source_len == 0 && target_len == 0 {
        return 0.0;
    }

    let mut matrix = vec![vec![0.0_f64; target_len + 1]; source_len + 1];
    for (i, source_phoneme) in source.phonemes().iter().enumerate() {
        matrix[i + 1][0] = matrix[i][0] + pdm.get(source_phoneme, empty_phoneme);
    }
    for (j, target_phoneme) in target.phonemes().iter().enumerate() {
        matrix[0][j + 1] = matrix[0][j] + pdm.get(empty_phoneme, target_phoneme);
    }
    for (j, target_phoneme) in target.phonemes().iter().enumerate() {
        for (i, source_phoneme) in source.phonemes().iter().enumerate() {
            let deletion = matrix[i][j + 1] + pdm.get(source_phoneme, empty_phoneme);
            let insertion = matrix[i + 1][j] + pdm.get(empty_phoneme, target_phoneme);
            let substitution = matrix[i][j] + pdm.get(source_phoneme, target_phoneme);
            matrix[i + 1][j + 1] = deletion.min(insertion).min(substitution);
        }
    }

    matrix[source_len][target_len] / (source_len + target_len) as f64
}
