//! Source-summary parsing
//!
//! Extracts the structured citation summary from the raw source-metadata
//! payload attached to a query response. The parser is tolerant end to end:
//! a payload that is absent or not the expected shape yields no summary, and
//! a missing relevance pairing at some index drops only that entry's badge.
//! Parsing never aborts the answer.

use serde_json::Value;

/// Structured citation metadata accompanying an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    /// Number of retrieved text segments backing the answer
    pub total_chunks_used: usize,
    /// Page identifiers, one per contributing segment, order as received
    pub page_references: Vec<String>,
    /// Per-segment detail aligned index-for-index with `page_references`
    pub segment_details: Vec<SegmentDetail>,
    /// Filenames contributing to the answer, deduplicated, insertion order
    pub referenced_files: Vec<String>,
}

/// Detail for one retrieved segment
///
/// Relevance is an integer percentage as reported by the service; entries
/// with no pairing in the raw payload carry `None` and are rendered without
/// a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDetail {
    /// Relevance percentage, when the service reported one
    pub relevance: Option<u8>,
}

/// Parse the raw source-metadata payload into a citation summary
///
/// Returns `None` when the payload is absent, is not an object, or lacks a
/// `pages` array. The reported relevance values are passed through without
/// range validation; a value that does not fit the percentage type is
/// treated like a missing pairing.
///
/// # Examples
///
/// ```
/// use askdoc::answer::parse_source_summary;
/// use serde_json::json;
///
/// let payload = json!({
///     "chunks_used": 2,
///     "pages": ["p1", "p2"],
///     "segments": [{"relevance": 80}, {"relevance": 95}],
///     "files": ["a.pdf"]
/// });
/// let summary = parse_source_summary(Some(&payload)).unwrap();
/// assert_eq!(summary.page_references, vec!["p1", "p2"]);
/// assert_eq!(summary.segment_details[1].relevance, Some(95));
/// ```
pub fn parse_source_summary(raw: Option<&Value>) -> Option<SourceSummary> {
    let obj = raw?.as_object()?;
    let pages = obj.get("pages")?.as_array()?;
    let segments = obj.get("segments").and_then(Value::as_array);

    let mut page_references = Vec::new();
    let mut segment_details = Vec::new();
    for (idx, page) in pages.iter().enumerate() {
        let Some(label) = page_label(page) else {
            continue;
        };
        page_references.push(label);
        segment_details.push(SegmentDetail {
            relevance: relevance_at(segments, idx),
        });
    }

    let total_chunks_used = obj
        .get("chunks_used")
        .and_then(Value::as_u64)
        .unwrap_or(0) as usize;

    let mut referenced_files: Vec<String> = Vec::new();
    if let Some(files) = obj.get("files").and_then(Value::as_array) {
        for file in files.iter().filter_map(Value::as_str) {
            if !referenced_files.iter().any(|f| f == file) {
                referenced_files.push(file.to_string());
            }
        }
    }

    Some(SourceSummary {
        total_chunks_used,
        page_references,
        segment_details,
        referenced_files,
    })
}

/// Render a page identifier, accepting both string and numeric entries
fn page_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read the relevance percentage paired with the segment at `idx`
fn relevance_at(segments: Option<&Vec<Value>>, idx: usize) -> Option<u8> {
    segments?
        .get(idx)?
        .get("relevance")?
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
}
