//! SVG canonicalization for stable comparison.
//!
//! # Overview
//!
//! Raw SVG exports differ in prolog noise, editor metadata and whitespace
//! even when they render identically. Canonicalization strips the parts
//! that carry no visual meaning so that fingerprinting and similarity
//! scoring see a normalized form:
//!
//! - XML declaration and DOCTYPE
//! - Comments
//! - `<metadata>`, `<title>` and `<desc>` elements
//! - Inter-tag whitespace and whitespace runs
//!
//! Canonicalization is fallible. Callers fall back to the raw content on
//! failure; a canonicalization error never aborts a run.

use regex::Regex;
use thiserror::Error;

/// Errors that can occur during SVG canonicalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizeError {
    /// A `<!--` comment opener with no matching `-->`.
    #[error("Unterminated comment in SVG content")]
    UnterminatedComment,

    /// Canonicalization removed everything, leaving no content to hash.
    #[error("Canonicalization produced empty content")]
    EmptyResult,
}

/// Canonicalizer for SVG markup.
///
/// Compiles its patterns once; reuse a single instance for a whole run.
#[derive(Debug)]
pub struct Canonicalizer {
    xml_decl: Regex,
    doctype: Regex,
    comment: Regex,
    metadata: Regex,
    title: Regex,
    desc: Regex,
    between_tags: Regex,
    whitespace: Regex,
}

impl Canonicalizer {
    /// Create a new canonicalizer.
    ///
    /// # Errors
    ///
    /// Returns a [`regex::Error`] if any internal pattern fails to
    /// compile. The patterns are fixed, so this only fires if the build
    /// itself is broken.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            xml_decl: Regex::new(r"(?s)<\?xml.*?\?>")?,
            doctype: Regex::new(r"(?is)<!DOCTYPE[^>]*>")?,
            comment: Regex::new(r"(?s)<!--.*?-->")?,
            metadata: Regex::new(r"(?is)<metadata\b[^>]*>.*?</metadata\s*>")?,
            title: Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>")?,
            desc: Regex::new(r"(?is)<desc\b[^>]*>.*?</desc\s*>")?,
            between_tags: Regex::new(r">\s+<")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Canonicalize SVG content.
    ///
    /// # Arguments
    ///
    /// * `content` - Raw SVG markup
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizeError`] when the content cannot be
    /// normalized. Callers are expected to fall back to the raw content.
    pub fn canonicalize(&self, content: &str) -> Result<String, CanonicalizeError> {
        let stripped = self.comment.replace_all(content, "");
        if stripped.contains("<!--") {
            return Err(CanonicalizeError::UnterminatedComment);
        }

        let stripped = self.xml_decl.replace_all(&stripped, "");
        let stripped = self.doctype.replace_all(&stripped, "");
        let stripped = self.metadata.replace_all(&stripped, "");
        let stripped = self.title.replace_all(&stripped, "");
        let stripped = self.desc.replace_all(&stripped, "");

        let collapsed = self.between_tags.replace_all(&stripped, "><");
        let collapsed = self.whitespace.replace_all(&collapsed, " ");
        let result = collapsed.trim().to_string();

        if result.is_empty() {
            return Err(CanonicalizeError::EmptyResult);
        }

        Ok(result)
    }
}
