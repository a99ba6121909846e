//! Typo correction and repertoire deduplication
//!
//! A [`CorrectionTable`] maps known misspelled piece names to their corrected
//! form. Cleaning a repertoire applies the table once per entry, then keeps the
//! first occurrence of every resulting name.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Corrections shipped with the tool
const BUILTIN_CORRECTIONS: &[(&str, &str)] = &[
    ("Жастар биы", "Жастар биі"),
    ("Тепеңкөк", "Тепең көк"),
    ("Әлқиса", "Әлқисса"),
    ("Ерке сылқым (1,2 дауыс)", "Ерке сылқым"),
];

/// Exact-match substitution table for piece names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectionTable {
    entries: HashMap<String, String>,
}

impl CorrectionTable {
    /// Table with no corrections; cleaning only deduplicates
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table of known typos
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_CORRECTIONS.iter().copied())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a table from a JSON object of `"typo": "correction"` pairs
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let table: Self = serde_json::from_str(&content).map_err(|e| Error::parse(path, e))?;
        debug!("Loaded {} corrections from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn insert(&mut self, typo: impl Into<String>, correction: impl Into<String>) {
        self.entries.insert(typo.into(), correction.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Corrected form of a single piece name
    ///
    /// Applied once: the result is not looked up again, so chained entries
    /// (`a -> b`, `b -> c`) turn `a` into `b`, not `c`.
    pub fn correct<'a>(&'a self, piece: &'a str) -> &'a str {
        self.entries.get(piece).map(String::as_str).unwrap_or(piece)
    }

    /// Correct every piece, then drop repeats after their first occurrence
    ///
    /// Equality is exact string comparison; whitespace and case are significant.
    pub fn clean<I, S>(&self, pieces: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut cleaned = Vec::new();
        for piece in pieces {
            let corrected = self.correct(piece.as_ref());
            if seen.insert(corrected.to_string()) {
                cleaned.push(corrected.to_string());
            }
        }
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let table = CorrectionTable::empty();
        assert_eq!(table.clean(["X", "Y", "X", "Z", "Y"]), pieces(&["X", "Y", "Z"]));
    }

    #[test]
    fn test_corrected_duplicates_collapse() {
        let table = CorrectionTable::builtin();
        assert_eq!(
            table.clean(["Жастар биы", "Жастар биі"]),
            pieces(&["Жастар биі"])
        );
        // Correct form first, typo later: still one entry in the first position
        assert_eq!(
            table.clean(["Жастар биі", "Қосалқа", "Жастар биы"]),
            pieces(&["Жастар биі", "Қосалқа"])
        );
    }

    #[test]
    fn test_builtin_table_entries() {
        let table = CorrectionTable::builtin();
        assert_eq!(table.len(), 4);
        assert_eq!(table.correct("Тепеңкөк"), "Тепең көк");
        assert_eq!(table.correct("Әлқиса"), "Әлқисса");
        assert_eq!(table.correct("Ерке сылқым (1,2 дауыс)"), "Ерке сылқым");
        assert_eq!(table.correct("Нұрлы таң"), "Нұрлы таң");
    }

    #[test]
    fn test_exact_match_only() {
        let table = CorrectionTable::builtin();
        assert_eq!(table.correct("жастар биы"), "жастар биы");
        assert_eq!(table.correct("Жастар биы "), "Жастар биы ");
        assert_eq!(table.clean(["A", "A ", "a"]), pieces(&["A", "A ", "a"]));
    }

    #[test]
    fn test_correction_is_single_pass() {
        let table = CorrectionTable::from_pairs([("a", "b"), ("b", "c")]);
        assert_eq!(table.clean(["a", "b"]), pieces(&["b", "c"]));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let table = CorrectionTable::builtin();
        let inputs = [
            pieces(&[]),
            pieces(&["Әлқиса", "Әлқисса", "Тепеңкөк", "X", "Тепең көк", "X"]),
            pieces(&["Ерке сылқым (1,2 дауыс)", "Ерке сылқым", "Ерке сылқым"]),
        ];
        for input in inputs {
            let once = table.clean(&input);
            assert_eq!(table.clean(&once), once);
        }
    }

    #[test]
    fn test_output_is_subset_of_corrected_input_without_repeats() {
        let table = CorrectionTable::builtin();
        let input = pieces(&["Әлқиса", "B", "Әлқисса", "B", "C", "Тепеңкөк"]);
        let corrected: Vec<&str> = input.iter().map(|p| table.correct(p)).collect();
        let out = table.clean(&input);

        for piece in &out {
            assert!(corrected.contains(&piece.as_str()));
        }
        let unique: HashSet<&String> = out.iter().collect();
        assert_eq!(unique.len(), out.len());
        assert_eq!(out, pieces(&["Әлқисса", "B", "C", "Тепең көк"]));
    }

    #[test]
    fn test_table_from_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fixes.json");
        std::fs::write(&path, r#"{"Қосалка": "Қосалқа"}"#).unwrap();

        let table = CorrectionTable::from_json_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.correct("Қосалка"), "Қосалқа");
    }

    #[test]
    fn test_table_from_json_file_rejects_non_string_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fixes.json");
        std::fs::write(&path, r#"{"a": 1}"#).unwrap();

        let err = CorrectionTable::from_json_file(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
