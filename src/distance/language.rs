//! Language-to-language distance: the mean lexeme distance over every
//! meaning both languages share.

use crate::distance::lexeme;
use crate::distance::matrix::NamedMatrix;
use crate::lexicon::language::Language;
use crate::phon::phoneme::Phoneme;

/// Mean lexeme distance across `a`'s and `b`'s shared vocabulary.
///
/// Two languages with no shared meaning have no comparable evidence, so the
/// result is `f64::INFINITY` rather than a division by zero: a
/// neighbor-joining run can still treat it as "maximally distant" without panicking.
pub fn distance(a: &Language, b: &Language, empty_phoneme: &Phoneme, pdm: &NamedMatrix<Phoneme, f64>) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for meaning in a.shared_meanings(b) {
        let source = a.entry(meaning).expect("meaning came from a's own index").representative();
        let target = b.entry(meaning).expect("meaning came from b's own index").representative();
        total += lexeme::distance(source, target, empty_phoneme, pdm);
        count += 1;
    }
    if count == 0 {
        f64::INFINITY
    } else {
        total / count as f64
    }
}
