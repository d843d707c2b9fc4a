//! Track Strategy Types

use refactorhud_core::{Findings, Track};

/// Text a track produced for one file, with what it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct VariantOutcome {
    pub track: Track,
    pub text: String,
    /// Listed under `suggestions` in the track's file record
    pub findings: Findings,
}

impl VariantOutcome {
    pub fn new(track: Track, text: impl Into<String>, findings: Findings) -> Self {
        Self {
            track,
            text: text.into(),
            findings,
        }
    }
}
