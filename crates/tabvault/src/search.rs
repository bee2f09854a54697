//! Line-oriented search across every document.
//!
//! A query is compiled once into a [`Regex`]. Plain queries are escaped first,
//! so `a.b` only matches the literal text. Matching runs line by line over each
//! document's content and reports byte offsets within the line, which is what a
//! client needs to highlight the hit.
//!
//! Empty matches (`^`, `x*` on a line without `x`) carry nothing to highlight and
//! are dropped.

use crate::error::Result;
use crate::model::{Document, DocumentId};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Treat the query as a regular expression instead of literal text.
    pub regex: bool,
    pub case_sensitive: bool,
}

/// One hit on one line. `start..end` is a byte range into `line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    pub line_number: usize,
    pub line: String,
    pub start: usize,
    pub end: usize,
}

impl LineMatch {
    pub fn matched_text(&self) -> &str {
        &self.line[self.start..self.end]
    }
}

/// All hits within a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMatches {
    pub document_id: DocumentId,
    pub name: String,
    pub matches: Vec<LineMatch>,
}

pub fn compile(query: &str, options: SearchOptions) -> Result<Regex> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()?;
    Ok(regex)
}

/// Search `documents` for `query`, keeping only documents with at least one hit.
///
/// A blank query returns nothing. An invalid regex is
/// [`crate::error::TabvaultError::InvalidPattern`].
pub fn search(
    documents: &[Document],
    query: &str,
    options: SearchOptions,
) -> Result<Vec<DocumentMatches>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    let regex = compile(query, options)?;

    let results = documents
        .iter()
        .filter_map(|doc| {
            let matches = match_lines(&regex, &doc.content);
            if matches.is_empty() {
                None
            } else {
                Some(DocumentMatches {
                    document_id: doc.id,
                    name: doc.name.clone(),
                    matches,
                })
            }
        })
        .collect();
    Ok(results)
}

pub fn total_matches(results: &[DocumentMatches]) -> usize {
    results.iter().map(|r| r.matches.len()).sum()
}

fn match_lines(regex: &Regex, content: &str) -> Vec<LineMatch> {
    let mut matches = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        for m in regex.find_iter(line) {
            if m.start() == m.end() {
                continue;
            }
            matches.push(LineMatch {
                line_number: idx + 1,
                line: line.to_string(),
                start: m.start(),
                end: m.end(),
            });
        }
    }
    matches
}
