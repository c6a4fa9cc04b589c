//! Ancestral vocabulary reconstruction: walking a neighbor-joined tree
//! bottom-up, reconciling each pair of sibling vocabularies into their
//! common ancestor's vocabulary.

use crate::distance::lexeme;
use crate::distance::matrix::NamedMatrix;
use crate::lexicon::language::{LanguageId, Phylogeny};
use crate::lexicon::lexeme::{Entry, Lexeme, Synonyms};
use crate::phon::phoneme::Phoneme;

/// How to combine two descendant lexemes into one ancestral lexeme for the
/// same meaning, once they've been judged cognate rather than synonymous.
/// [`ConcatenateMerge`] concatenates phoneme sequences and ignores branch
/// distances; the trait exists so a real sound-change model can be dropped
/// in without touching the reconstruction walk.
pub trait ProtoMerge {
    fn merge(&self, a: &Lexeme, b: &Lexeme, distance_a: f64, distance_b: f64) -> Lexeme;
}

/// Concatenates both phoneme sequences, keeping the first lexeme's meaning
/// and language code.
pub struct ConcatenateMerge;

impl ProtoMerge for ConcatenateMerge {
    fn merge(&self, a: &Lexeme, b: &Lexeme, _distance_a: f64, _distance_b: f64) -> Lexeme {
        let mut phonemes = a.phonemes().to_vec();
        phonemes.extend(b.phonemes().iter().cloned());
        Lexeme::new(phonemes, a.meaning().to_string(), a.language_code().to_string())
    }
}

/// Reconstruct every internal node's vocabulary, starting from `root`.
///
/// Internal nodes (exactly two children, as produced by [`crate::nj`]) with no
/// vocabulary of their own are filled in by reconciling their two children's
/// vocabularies; nodes that already carry lexemes (attested languages) are
/// left untouched.
pub fn reconstruct_protolanguages(
    phylogeny: &mut Phylogeny,
    root: LanguageId,
    pdm: &NamedMatrix<Phoneme, f64>,
    empty_phoneme: &Phoneme,
    threshold: f64,
    merge: &dyn ProtoMerge,
) {
    reconstruct_language(phylogeny, root, pdm, empty_phoneme, threshold, merge);
}

fn reconstruct_language(
    phylogeny: &mut Phylogeny,
    node: LanguageId,
    pdm: &NamedMatrix<Phoneme, f64>,
    empty_phoneme: &Phoneme,
    threshold: f64,
    merge: &dyn ProtoMerge,
) {
    let children = phylogeny.get(node).children().to_vec();
    if children.len() != 2 {
        return;
    }
    for &(child_id, _) in &children {
        if phylogeny.get(child_id).entries().is_empty() {
            reconstruct_language(phylogeny, child_id, pdm, empty_phoneme, threshold, merge);
        }
    }

    let (child0, dist0) = children[0];
    let (child1, dist1) = children[1];
    let language_distance = dist0 + dist1;

    let meanings0: Vec<String> = phylogeny.get(child0).meanings().map(String::from).collect();
    let meanings1: std::collections::HashSet<String> = phylogeny.get(child1).meanings().map(String::from).collect();

    let mut new_entries = Vec::new();
    let mut propagations: Vec<(LanguageId, String, Lexeme, Lexeme)> = Vec::new();

    for meaning in &meanings0 {
        if !meanings1.contains(meaning) {
            new_entries.push(phylogeny.get(child0).entry(meaning).unwrap().clone());
            continue;
        }

        let entry0 = phylogeny.get(child0).entry(meaning).unwrap().clone();
        let entry1 = phylogeny.get(child1).entry(meaning).unwrap().clone();
        let lexemes0 = as_lexeme_list(&entry0);
        let lexemes1 = as_lexeme_list(&entry1);

        let mut best: Option<(f64, usize, usize)> = None;
        for (i, l0) in lexemes0.iter().enumerate() {
            for (j, l1) in lexemes1.iter().enumerate() {
                let d = lexeme::distance(l0, l1, empty_phoneme, pdm);
                if best.map_or(true, |(bd, ..)| d < bd) {
                    best = Some((d, i, j));
                }
            }
        }
        let (min_distance, bi, bj) = best.expect("both synonym bundles are non-empty");

        if min_distance > language_distance * threshold {
            let mut combined = lexemes0.clone();
            combined.extend(lexemes1.iter().cloned());
            new_entries.push(Entry::Multiple(Synonyms::new(combined)));
        } else {
            let proto = merge.merge(&lexemes0[bi], &lexemes1[bj], dist0, dist1);
            new_entries.push(Entry::Single(proto.clone()));
            propagations.push((child0, meaning.clone(), proto.clone(), lexemes0[bi].clone()));
            propagations.push((child1, meaning.clone(), proto, lexemes1[bj].clone()));
        }
    }
    for meaning in &meanings1 {
        if !meanings0.contains(meaning) {
            new_entries.push(phylogeny.get(child1).entry(meaning).unwrap().clone());
        }
    }

    for entry in new_entries {
        phylogeny.get_mut(node).set_entry(entry);
    }
    for (start, meaning, proto, matched) in propagations {
        propagate_to_descendants(phylogeny, start, &meaning, &proto, &matched);
    }
}

fn as_lexeme_list(entry: &Entry) -> Vec<Lexeme> {
    match entry {
        Entry::Single(lexeme) => vec![lexeme.clone()],
        Entry::Multiple(synonyms) => synonyms.lexemes().to_vec(),
    }
}

/// Push a just-decided ancestral lexeme down into any descendant whose entry
/// for `meaning` is still a synonym bundle containing `matched` — those
/// descendants inherited the ambiguity this reconstruction just resolved.
fn propagate_to_descendants(phylogeny: &mut Phylogeny, node: LanguageId, meaning: &str, proto: &Lexeme, matched: &Lexeme) {
    let should_replace = matches!(
        phylogeny.get(node).entry(meaning),
        Some(Entry::Multiple(synonyms)) if synonyms.lexemes().contains(matched)
    );
    if !should_replace {
        return;
    }
    phylogeny.get_mut(node).set_entry(Entry::Single(proto.clone()));
    let children: Vec<LanguageId> = phylogeny.get(node).children().iter().map(|(id, _)| *id).collect();
    for child in children {
        propagate_to_descendants(phylogeny, child, meaning, proto, matched);
    }
}
