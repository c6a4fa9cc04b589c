//! Catalogue loading: a CSV of languages by Wiktionary-style codes, with one
//! column per gloss holding that language's IPA transcription.

use std::collections::HashSet;

use crate::data::LinguisticTables;
use crate::error::CatalogueError;
use crate::lexicon::language::Language;
use crate::lexicon::lexeme::Entry;
use crate::phon::ipa;

const REQUIRED_COLUMNS: [&str; 3] = ["Code", "Language", "#"];
const NON_MEANING_COLUMNS: [&str; 6] = ["Code", "Language", "Family", "Group", "Code2", "#"];

/// Load every language from `path` whose `#` (lexeme count) column exceeds
/// `min_words`, parsing each non-empty meaning column as an IPA transcription.
/// A lexeme that fails to parse is logged and dropped; the rest of the row
/// still loads.
pub fn load_catalogue(path: impl AsRef<std::path::Path>, min_words: u32, tables: &LinguisticTables) -> Result<Vec<Language>, CatalogueError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(CatalogueError::MissingColumn(required.to_string()));
        }
    }

    let non_meaning: HashSet<&str> = NON_MEANING_COLUMNS.into_iter().collect();
    let meaning_columns: Vec<String> = headers.iter().filter(|h| !non_meaning.contains(h)).map(String::from).collect();

    let mut languages = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: std::collections::HashMap<&str, &str> = headers.iter().zip(record.iter()).collect();

        let code = row.get("Code").copied().unwrap_or("").trim();
        if code.is_empty() {
            continue;
        }
        let name = row.get("Language").copied().unwrap_or("").to_string();
        let count_str = row.get("#").copied().unwrap_or("").trim();
        let count: u32 = if count_str.is_empty() {
            0
        } else {
            count_str.parse().map_err(|_| CatalogueError::InvalidLexemeCount { code: code.to_string(), value: count_str.to_string() })?
        };
        if count <= min_words {
            continue;
        }

        let mut entries = Vec::new();
        for meaning in &meaning_columns {
            let word = row.get(meaning.as_str()).copied().unwrap_or("").trim();
            if word.is_empty() {
                continue;
            }
            match ipa::parse_lexeme(tables, word, meaning, code) {
                Ok(lexeme) => entries.push(Entry::Single(lexeme)),
                Err(err) => {
                    tracing::warn!(language = code, meaning = meaning.as_str(), word, error = %err, "dropping unparseable lexeme");
                }
            }
        }
        languages.push(Language::new(name, code, entries));
    }

    Ok(languages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn tables() -> LinguisticTables {
        LinguisticTables::embedded().unwrap()
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn loads_languages_above_the_word_count_threshold() {
        let csv = "Code,Language,Family,Group,Code2,#,one,two\nxx,Xish,Fam,Grp,x2,50,ta,na\nyy,Yish,Fam,Grp,y2,10,da,ma\n";
        let file = write_csv(csv);
        let languages = load_catalogue(file.path(), 40, &tables()).unwrap();
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].code(), "xx");
        assert_eq!(languages[0].entries().len(), 2);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "Language,#,one\nXish,50,ta\n";
        let file = write_csv(csv);
        let err = load_catalogue(file.path(), 0, &tables()).unwrap_err();
        assert!(matches!(err, CatalogueError::MissingColumn(_)));
    }

    #[test]
    fn empty_code_row_is_skipped() {
        let csv = "Code,Language,Family,Group,Code2,#,one\n,Nameless,Fam,Grp,n2,50,ta\n";
        let file = write_csv(csv);
        let languages = load_catalogue(file.path(), 0, &tables()).unwrap();
        assert!(languages.is_empty());
    }

    #[test]
    fn unparseable_word_is_dropped_but_row_still_loads() {
        let csv = "Code,Language,Family,Group,Code2,#,one,two\nxx,Xish,Fam,Grp,x2,50,t😀a,na\n";
        let file = write_csv(csv);
        let languages = load_catalogue(file.path(), 0, &tables()).unwrap();
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].entries().len(), 1);
        assert_eq!(languages[0].entries()[0].meaning(), "two");
    }
}
