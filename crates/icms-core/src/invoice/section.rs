//! Bounds the itemized block of an invoice's text.

use regex::Regex;

use super::rules::patterns::literal_pattern;

/// Scanning state of a [`SectionExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    /// Begin marker not seen yet.
    Searching,
    /// Inside the itemized block.
    InSection,
    /// End marker seen; remaining lines are ignored.
    Done,
}

/// State machine selecting the lines between the begin and end markers.
///
/// Both marker lines are part of the section. A single line carrying both
/// markers opens and closes the section at once.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    begin: Regex,
    end: Regex,
    state: SectionState,
}

impl SectionExtractor {
    pub fn new(begin_marker: &str, end_marker: &str) -> Self {
        Self {
            begin: literal_pattern(&[begin_marker]),
            end: literal_pattern(&[end_marker]),
            state: SectionState::Searching,
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    /// Whether the begin marker has been seen.
    pub fn saw_begin(&self) -> bool {
        self.state != SectionState::Searching
    }

    pub fn is_done(&self) -> bool {
        self.state == SectionState::Done
    }

    /// Advance over `line`; returns whether the line belongs to the section.
    pub fn feed(&mut self, line: &str) -> bool {
        if self.state == SectionState::Searching && self.begin.is_match(line) {
            self.state = SectionState::InSection;
        }

        if self.state != SectionState::InSection {
            return false;
        }

        if self.end.is_match(line) {
            self.state = SectionState::Done;
        }
        true
    }

    /// Start over for a new document.
    pub fn reset(&mut self) {
        self.state = SectionState::Searching;
    }
}
