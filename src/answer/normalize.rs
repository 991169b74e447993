//! Answer text normalization
//!
//! Converts a raw, possibly markdown-laden model response into clean
//! display prose. The pipeline is a fixed sequence of text passes; order
//! matters because later patterns assume earlier collapsing already
//! happened. Every pass is total, so normalization never fails.

use regex::Regex;

/// Normalize raw answer text into display-ready prose
///
/// Applies, in order: whitespace collapsing, emphasis-markup stripping,
/// boilerplate opener/closer removal, list-marker normalization, repeated
/// terminal-punctuation collapsing, blank-line collapsing, trimming, and
/// upper-casing of the leading character.
///
/// Whitespace collapsing keeps line breaks intact (runs of blanks within a
/// line become one space, blanks around a newline are dropped) so the
/// list-marker and blank-line passes still see real lines.
///
/// The opener and closer phrase tables are fixed; only the stock phrasings
/// below are recognized.
///
/// # Examples
///
/// ```
/// use askdoc::answer::normalize_answer;
///
/// assert_eq!(
///     normalize_answer("**Paris** is the capital."),
///     "Paris is the capital."
/// );
/// assert_eq!(normalize_answer("- one\n- two"), "• one\n• two");
/// assert_eq!(normalize_answer(""), "");
/// ```
pub fn normalize_answer(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Whitespace: collapse blank runs within lines, strip blanks around
    // newlines, keep the newlines themselves.
    let mut text = Regex::new(r"[^\S\n]+")
        .unwrap()
        .replace_all(raw, " ")
        .to_string();
    text = Regex::new(r" ?\n ?")
        .unwrap()
        .replace_all(&text, "\n")
        .to_string();

    // Emphasis markup: unwrap bold, italic, underline, and inline code,
    // then drop any stray asterisks left over.
    text = Regex::new(r"\*\*(.*?)\*\*")
        .unwrap()
        .replace_all(&text, "$1")
        .to_string();
    text = Regex::new(r"\*(.*?)\*")
        .unwrap()
        .replace_all(&text, "$1")
        .to_string();
    text = text.replace('*', "");
    text = Regex::new(r"__(.*?)__")
        .unwrap()
        .replace_all(&text, "$1")
        .to_string();
    text = Regex::new(r"`(.*?)`")
        .unwrap()
        .replace_all(&text, "$1")
        .to_string();

    // Stock opener at the start of the text, including its punctuation.
    text = Regex::new(
        r"(?i)^(based on the document|according to the text|the document states|in summary)[,:]\s*",
    )
    .unwrap()
    .replace(&text, "")
    .to_string();

    // Stock closer: from its characteristic prefix through end of string.
    text = Regex::new(r"(?is)\s*(let me know if you need|is there anything else|hope this helps).*$")
        .unwrap()
        .replace(&text, "")
        .to_string();

    // List markers: bullets become `• `, numeric ordinals are dropped.
    // Matching stays within the line so a blank line before a list survives.
    text = Regex::new(r"(?m)^[^\S\n]*[-•*][^\S\n]+")
        .unwrap()
        .replace_all(&text, "• ")
        .to_string();
    text = Regex::new(r"(?m)^[^\S\n]*\d+\.[^\S\n]+")
        .unwrap()
        .replace_all(&text, "")
        .to_string();

    // Repeated terminal punctuation.
    text = Regex::new(r"\.{2,}")
        .unwrap()
        .replace_all(&text, ".")
        .to_string();
    text = Regex::new(r"!{2,}")
        .unwrap()
        .replace_all(&text, "!")
        .to_string();
    text = Regex::new(r"\?{2,}")
        .unwrap()
        .replace_all(&text, "?")
        .to_string();

    // Runs of blank lines down to a single blank line.
    text = Regex::new(r"\n{3,}")
        .unwrap()
        .replace_all(&text, "\n\n")
        .to_string();

    let text = text.trim();

    // Upper-case the first character; identity for non-alphabetic starts.
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
