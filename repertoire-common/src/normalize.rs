//! Group normalization
//!
//! Merges participant records sharing a name within a group and cleans every
//! repertoire with the correction table. Groups are independent of each other.

use crate::corrections::CorrectionTable;
use crate::model::{Document, Participant};
use std::collections::HashMap;
use tracing::{debug, info};

/// Totals from one normalization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Groups processed
    pub groups: usize,
    /// Participant records folded into an earlier record with the same name
    pub records_merged: usize,
    /// Repertoire entries dropped as typos of, or repeats of, another entry
    pub pieces_removed: usize,
}

/// Normalize one group's participant list
///
/// Records are visited in source order. The first record for a name seeds its
/// repertoire with the cleaned pieces. Each later record with that name is
/// appended to the accumulated repertoire as-is and the whole combined list is
/// cleaned again. Output keeps first-seen name order.
pub fn normalize_group(table: &CorrectionTable, participants: &[Participant]) -> Vec<Participant> {
    let mut merged: Vec<Participant> = Vec::with_capacity(participants.len());
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for record in participants {
        match index_by_name.get(record.name.as_str()) {
            Some(&index) => {
                let existing = &mut merged[index];
                let combined = existing.repertoire.iter().chain(record.repertoire.iter());
                existing.repertoire = table.clean(combined);
            }
            None => {
                index_by_name.insert(record.name.as_str(), merged.len());
                merged.push(Participant::new(
                    record.name.clone(),
                    table.clean(&record.repertoire),
                ));
            }
        }
    }

    merged
}

/// Normalize every group of the document in place
pub fn normalize_document(table: &CorrectionTable, document: &mut Document) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for group in document.groups_mut() {
        let pieces_before = piece_count(&group.participants);
        let records_before = group.participants.len();

        group.participants = normalize_group(table, &group.participants);

        let merged = records_before - group.participants.len();
        let removed = pieces_before - piece_count(&group.participants);
        debug!(
            "Group '{}': {} participants, {} records merged, {} pieces removed",
            group.name,
            group.participants.len(),
            merged,
            removed
        );

        report.groups += 1;
        report.records_merged += merged;
        report.pieces_removed += removed;
    }

    info!(
        "Normalized {} groups ({} duplicate records merged, {} repertoire entries removed)",
        report.groups, report.records_merged, report.pieces_removed
    );
    report
}

fn piece_count(participants: &[Participant]) -> usize {
    participants.iter().map(|p| p.repertoire.len()).sum()
}
