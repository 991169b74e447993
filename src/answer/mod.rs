//! Answer post-processing for Askdoc
//!
//! This module turns the raw service response into a display-ready result:
//! `normalize` cleans the answer text, `sources` parses the citation
//! metadata. Both halves are pure functions with no networking or state.

pub mod normalize;
pub mod sources;

pub use normalize::normalize_answer;
pub use sources::{parse_source_summary, SegmentDetail, SourceSummary};

use crate::service::RawAnswer;

/// A display-ready answer, immutable once constructed
///
/// Built from a raw query response by running the text through the
/// normalization pipeline and the source payload through the summary parser.
/// A missing or malformed source payload leaves `source_summary` empty
/// without affecting the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAnswer {
    /// Cleaned display string
    pub text: String,
    /// Parsed citation summary, when the response carried source metadata
    pub source_summary: Option<SourceSummary>,
}

impl NormalizedAnswer {
    /// Build a normalized answer from a raw query response
    ///
    /// # Examples
    ///
    /// ```
    /// use askdoc::answer::NormalizedAnswer;
    /// use askdoc::service::RawAnswer;
    ///
    /// let raw = RawAnswer {
    ///     text: "**Paris** is the capital.".to_string(),
    ///     sources: None,
    /// };
    /// let answer = NormalizedAnswer::from_raw(&raw);
    /// assert_eq!(answer.text, "Paris is the capital.");
    /// assert!(answer.source_summary.is_none());
    /// ```
    pub fn from_raw(raw: &RawAnswer) -> Self {
        Self {
            text: normalize_answer(&raw.text),
            source_summary: parse_source_summary(raw.sources.as_ref()),
        }
    }
}
