//! Read-only document queries
//!
//! Who performs a piece, and which pieces the document holds at all.

use crate::model::Document;
use std::collections::HashSet;

/// Result limit used when the caller does not give one
pub const DEFAULT_SEARCH_LIMIT: usize = 1000;

/// A participant whose repertoire matched a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch<'a> {
    pub group: &'a str,
    pub name: &'a str,
}

/// Participants with a piece containing `piece`, case-insensitively
///
/// Groups and participants are visited in document order and the search stops
/// after `limit` matches. An empty `piece` matches every participant with a
/// non-empty repertoire.
pub fn search<'a>(document: &'a Document, piece: &str, limit: usize) -> Vec<SearchMatch<'a>> {
    let needle = piece.to_lowercase();

    document
        .groups()
        .iter()
        .flat_map(|group| group.participants.iter().map(move |p| (group.name.as_str(), p)))
        .filter(|(_, p)| {
            p.repertoire
                .iter()
                .any(|title| title.to_lowercase().contains(&needle))
        })
        .take(limit)
        .map(|(group, p)| SearchMatch {
            group,
            name: p.name.as_str(),
        })
        .collect()
}

/// Every distinct piece in the document, in first-seen order
///
/// Pieces are compared exactly, without correction or case folding.
pub fn unique_pieces(document: &Document) -> Vec<&str> {
    let mut seen = HashSet::new();
    document
        .groups()
        .iter()
        .flat_map(|g| g.participants.iter())
        .flat_map(|p| p.repertoire.iter())
        .map(String::as_str)
        .filter(|title| seen.insert(*title))
        .collect()
}
