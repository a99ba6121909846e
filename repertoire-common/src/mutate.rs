//! Repertoire addition

use crate::corrections::CorrectionTable;
use crate::model::{Document, Participant};
use tracing::info;

/// What [`add_repertoire`] changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// The group did not exist and was appended to the document
    pub group_created: bool,
    /// The participant did not exist and was appended to the group
    pub participant_created: bool,
    /// Pieces the participant's repertoire grew by
    pub pieces_added: usize,
}

/// Add pieces to a participant, creating the group or participant if needed
///
/// `new_pieces` is cleaned on its own first. An existing participant (the first
/// record with that name) gets the cleaned concatenation of its current
/// repertoire and the new pieces; otherwise a new participant holding the
/// cleaned pieces is appended. Only the in-memory document changes.
pub fn add_repertoire<S: AsRef<str>>(
    table: &CorrectionTable,
    document: &mut Document,
    group_name: &str,
    participant_name: &str,
    new_pieces: &[S],
) -> AddOutcome {
    let group_created = !document.contains_group(group_name);
    let group = document.group_or_insert(group_name);
    let new_pieces = table.clean(new_pieces);

    let outcome = match group.iter_mut().find(|p| p.name == participant_name) {
        Some(participant) => {
            let before = participant.repertoire.len();
            participant.repertoire = table.clean(participant.repertoire.iter().chain(new_pieces.iter()));
            AddOutcome {
                group_created,
                participant_created: false,
                pieces_added: participant.repertoire.len().saturating_sub(before),
            }
        }
        None => {
            let pieces_added = new_pieces.len();
            group.push(Participant::new(participant_name, new_pieces));
            AddOutcome {
                group_created,
                participant_created: true,
                pieces_added,
            }
        }
    };

    info!(
        "Added {} pieces to '{}' in group '{}'{}",
        outcome.pieces_added,
        participant_name,
        group_name,
        if outcome.participant_created { " (new participant)" } else { "" }
    );
    outcome
}
