//! Document summaries for structure checks

use crate::model::Document;
use std::fmt;

/// Pieces listed per participant in the summary text
const PREVIEW_PIECES: usize = 3;

/// Per-participant line of a summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSummary {
    pub name: String,
    pub piece_count: usize,
    /// First few pieces of the repertoire
    pub preview: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub name: String,
    pub participants: Vec<ParticipantSummary>,
}

/// Counts and per-participant listing of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub groups: Vec<GroupSummary>,
    pub participant_count: usize,
    pub piece_count: usize,
}

impl DocumentSummary {
    pub fn from_document(document: &Document) -> Self {
        let groups: Vec<GroupSummary> = document
            .groups()
            .iter()
            .map(|group| GroupSummary {
                name: group.name.clone(),
                participants: group
                    .participants
                    .iter()
                    .map(|p| ParticipantSummary {
                        name: p.name.clone(),
                        piece_count: p.repertoire.len(),
                        preview: p.repertoire.iter().take(PREVIEW_PIECES).cloned().collect(),
                    })
                    .collect(),
            })
            .collect();

        let participant_count = groups.iter().map(|g| g.participants.len()).sum();
        let piece_count = groups
            .iter()
            .flat_map(|g| g.participants.iter())
            .map(|p| p.piece_count)
            .sum();

        Self {
            groups,
            participant_count,
            piece_count,
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(f, "Group: {}", group.name)?;
            for p in &group.participants {
                writeln!(f, "  Participant: {} ({} pieces)", p.name, p.piece_count)?;
                let ellipsis = if p.piece_count > p.preview.len() { "..." } else { "" };
                writeln!(f, "    Pieces: {}{}", p.preview.join(", "), ellipsis)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Summary:")?;
        writeln!(f, "  Total groups: {}", self.group_count())?;
        writeln!(f, "  Total participants: {}", self.participant_count)?;
        write!(f, "  Total pieces: {}", self.piece_count)
    }
}
