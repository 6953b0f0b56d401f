//! Completion proof submitted by a helper.

use super::TaskDomainError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Evidence that a task was fulfilled.
///
/// The digest is a SHA-256 hash over the note and every photo reference in
/// order, so later edits to the proof content are detectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionProof {
    note: String,
    photo_refs: Vec<String>,
    digest: String,
    submitted_at: DateTime<Utc>,
}

impl CompletionProof {
    /// Creates a proof from a note and optional photo references.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyProofNote`] when the note is blank.
    pub fn new(
        note: impl Into<String>,
        photo_refs: Vec<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let note = note.into();
        if note.trim().is_empty() {
            return Err(TaskDomainError::EmptyProofNote);
        }
        let digest = digest_content(&note, &photo_refs);
        Ok(Self {
            note,
            photo_refs,
            digest,
            submitted_at: clock.utc(),
        })
    }

    /// Returns the helper's note.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Returns the attached photo references.
    #[must_use]
    pub fn photo_refs(&self) -> &[String] {
        &self.photo_refs
    }

    /// Returns the lowercase hex SHA-256 digest of the proof content.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Returns when the proof was submitted.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

fn digest_content(note: &str, photo_refs: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(note.as_bytes());
    for photo_ref in photo_refs {
        hasher.update(photo_ref.as_bytes());
    }
    let digest = hasher.finalize();
    format!("{digest:x}")
}
