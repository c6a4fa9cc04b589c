//! IPA string → [`Lexeme`] parsing.
//!
//! Four stages, left to right: character replacement, tokenization with
//! diacritics, digraph gathering, and symbol-to-phoneme construction.

use std::collections::BTreeSet;

use crate::data::LinguisticTables;
use crate::error::IpaError;
use crate::lexicon::lexeme::Lexeme;
use crate::phon::phoneme::Phoneme;

#[derive(Debug, Clone)]
struct Symbol {
    letter: String,
    modifiers: Vec<String>,
}

/// Stage 1: map every character through the replacement table; unrecognized
/// characters pass through unchanged.
fn replace_non_ipa(tables: &LinguisticTables, input: &str) -> Vec<char> {
    input
        .chars()
        .flat_map(|ch| match tables.char_replace.get(&ch) {
            Some(replacement) => replacement.chars().collect::<Vec<_>>(),
            None => vec![ch],
        })
        .collect()
}

/// Stage 2: left-to-right tokenization. A letter character starts a new
/// symbol; a modifier character is folded into the current symbol; an
/// ignored character is skipped; anything else is an [`IpaError::Unrecognized`].
fn group_with_modifiers(tables: &LinguisticTables, chars: &[char]) -> Result<Vec<Symbol>, IpaError> {
    let mut symbols: Vec<Symbol> = Vec::new();
    let modifier_str_set: Vec<&str> = tables.modifiers.keys().map(|s| s.as_str()).collect();
    for &ch in chars {
        let ch_str = ch.to_string();
        if !symbols.is_empty() && modifier_str_set.contains(&ch_str.as_str()) {
            symbols.last_mut().unwrap().modifiers.push(ch_str);
        } else if tables.letters.contains_key(&ch_str) {
            symbols.push(Symbol { letter: ch_str, modifiers: Vec::new() });
        } else if tables.ignore.contains(&ch) {
            continue;
        } else {
            let context: String = chars.iter().collect();
            return Err(IpaError::Unrecognized { ch, context });
        }
    }
    Ok(symbols)
}

/// Stage 3: merge two consecutive single-letter symbols into one if their
/// concatenation is itself a known digraph letter.
fn group_single_phoneme_symbols(tables: &LinguisticTables, symbols: Vec<Symbol>) -> Vec<Symbol> {
    let mut gathered = Vec::with_capacity(symbols.len());
    let mut i = 0;
    while i < symbols.len() {
        if i + 1 < symbols.len() {
            let double_letter = format!("{}{}", symbols[i].letter, symbols[i + 1].letter);
            if tables.letters.contains_key(&double_letter) {
                let mut modifiers = symbols[i].modifiers.clone();
                modifiers.extend(symbols[i + 1].modifiers.clone());
                gathered.push(Symbol { letter: double_letter, modifiers });
                i += 2;
                continue;
            }
        }
        gathered.push(symbols[i].clone());
        i += 1;
    }
    gathered
}

/// Stage 4: look up the base feature set for a symbol's letter, build a
/// [`Phoneme`], then apply each modifier's mutator actions in order.
fn symbol_to_phoneme(tables: &LinguisticTables, symbol: &Symbol) -> Result<Phoneme, IpaError> {
    let feature_codes = tables
        .letters
        .get(&symbol.letter)
        .ok_or_else(|| IpaError::LookupMissing { letter: symbol.letter.clone() })?;

    let glyph = format!("{}{}", symbol.letter, symbol.modifiers.join(""));
    let features: BTreeSet<_> = feature_codes.iter().map(|code| tables.features.get(code).clone()).collect();
    let mut phoneme = Phoneme::new(features, Some(glyph));

    for modifier in &symbol.modifiers {
        let Some(info) = tables.modifiers.get(modifier) else { continue };
        for (action, arg_code) in &info.actions {
            apply_mutator(tables, &mut phoneme, action, arg_code);
        }
    }
    phoneme.recompute();
    Ok(phoneme)
}

fn apply_mutator(tables: &LinguisticTables, phoneme: &mut Phoneme, action: &str, arg_code: &str) {
    match action {
        "add" => phoneme.add(tables.features.get(arg_code).clone(), true),
        "remove" => phoneme.remove(tables.features.get(arg_code), true),
        "set_place" => phoneme.set_place(tables.features.get(arg_code).clone(), true),
        "advance" => phoneme.advance(&tables.features, &tables.ipa_rules.advance, &tables.vowel_manners, true),
        "lower" => phoneme.lower(&tables.features, &tables.ipa_rules.lower, true),
        "upper" => phoneme.upper(&tables.features, &tables.ipa_rules.upper, true),
        "dentalize" => phoneme.dentalize(&tables.features, &tables.ipa_rules.dentalize, true),
        other => {
            tracing::warn!(action = other, "unknown IPA modifier action, ignoring");
        }
    }
}

/// Parse a raw IPA string into a [`Lexeme`]. On [`IpaError`], the caller
/// (the catalogue loader) logs and skips this lexeme; the rest of the
/// catalogue is unaffected.
pub fn parse_lexeme(
    tables: &LinguisticTables,
    ipa: &str,
    meaning: &str,
    language_code: &str,
) -> Result<Lexeme, IpaError> {
    let chars = replace_non_ipa(tables, ipa);
    let symbols = group_with_modifiers(tables, &chars)?;
    let gathered = group_single_phoneme_symbols(tables, symbols);
    let phonemes = gathered
        .iter()
        .map(|symbol| symbol_to_phoneme(tables, symbol))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Lexeme::new(phonemes, meaning.to_string(), language_code.to_string()))
}
