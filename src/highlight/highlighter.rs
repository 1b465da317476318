//! Theme-bound tokenizer
//!
//! Compiles one highlight query per supported language up front, then
//! tokenizes samples on demand. Parsers are created per call (they are
//! cheap next to query compilation and not `Sync`), so a constructed
//! `Highlighter` is immutable and freely shareable.

use std::collections::HashMap;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser, Query, QueryCursor};

use crate::languages::{LanguageId, ALL_LANGUAGES};
use crate::theme::{Color, Theme};

/// A styled span of source text, the unit consumed by every renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The text of the span
    pub text: String,
    /// Byte offset of the span within its line
    pub start: usize,
    /// Capture name that matched, None for unstyled gaps
    pub scope: Option<String>,
    /// Theme color for the scope, None renders in the default foreground
    pub color: Option<Color>,
}

#[derive(Debug)]
struct LanguageSupport {
    grammar: Language,
    /// None when the highlight query failed to compile; the language then
    /// degrades to unstyled tokens
    query: Option<Query>,
}

/// Tokenizer bound to a theme and the full supported language set.
///
/// Immutable once constructed. Construction compiles every language's
/// highlight query, which is expensive; share one instance per process via
/// [`HighlighterCache`](super::HighlighterCache).
#[derive(Debug)]
pub struct Highlighter {
    theme: Theme,
    languages: HashMap<LanguageId, LanguageSupport>,
}

impl Highlighter {
    /// Construct a highlighter for the given theme.
    pub fn new(theme: Theme) -> Self {
        let mut languages = HashMap::new();
        for &lang in ALL_LANGUAGES {
            let grammar = lang.grammar();
            let query = match Query::new(&grammar, lang.highlight_query()) {
                Ok(query) => Some(query),
                Err(e) => {
                    tracing::error!("Failed to compile query for {:?}: {:?}", lang, e);
                    None
                }
            };
            languages.insert(lang, LanguageSupport { grammar, query });
        }
        tracing::info!(
            "Constructed highlighter with theme {} ({} languages)",
            theme.name,
            languages.len()
        );
        Self { theme, languages }
    }

    /// The theme this highlighter renders with
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Tokenize a sample into styled spans, one `Vec<Token>` per line.
    ///
    /// Every byte of every line is covered by exactly one token; spans the
    /// query did not capture come back unstyled. An unknown language yields
    /// one unstyled token per line (callers are expected to gate on the
    /// registry first).
    pub fn tokenize(&self, code: &str, lang: &str) -> Vec<Vec<Token>> {
        let Some(lang_id) = LanguageId::from_name(lang) else {
            tracing::debug!("Tokenize requested for unknown language {}", lang);
            return unstyled_lines(code);
        };
        let support = match self.languages.get(&lang_id) {
            Some(s) => s,
            None => return unstyled_lines(code),
        };

        let mut parser = Parser::new();
        if parser.set_language(&support.grammar).is_err() {
            tracing::error!("Grammar version mismatch for {:?}", lang_id);
            return unstyled_lines(code);
        }
        let Some(tree) = parser.parse(code, None) else {
            tracing::warn!("Parse failed for {:?}", lang_id);
            return unstyled_lines(code);
        };
        let Some(query) = &support.query else {
            return unstyled_lines(code);
        };

        let lines: Vec<&str> = code.lines().collect();
        let mut spans: Vec<Vec<CaptureSpan<'_>>> = vec![Vec::new(); lines.len()];

        let mut cursor = QueryCursor::new();
        let mut captures = cursor.captures(query, tree.root_node(), code.as_bytes());
        while let Some((query_match, capture_idx)) = captures.next() {
            let capture = &query_match.captures[*capture_idx];
            let capture_name = query.capture_names()[capture.index as usize];

            let node = capture.node;
            let start = node.start_position();
            let end = node.end_position();

            // Multi-line captures are split per line, teacher-style
            for row in start.row..=end.row {
                let Some(line) = lines.get(row) else { break };
                let from = if row == start.row { start.column } else { 0 };
                let to = if row == end.row {
                    end.column.min(line.len())
                } else {
                    line.len()
                };
                if from < to {
                    spans[row].push(CaptureSpan {
                        start: from,
                        end: to,
                        capture: capture_name,
                    });
                }
            }
        }

        lines
            .iter()
            .zip(spans.iter_mut())
            .map(|(line, line_spans)| self.split_line(line, line_spans))
            .collect()
    }

    /// Turn a line plus its capture spans into a gap-free token list.
    /// Spans are ordered by start then end, so on overlap the earliest
    /// start wins and at an equal start the shortest span wins; exact
    /// (start, end) ties keep match order (the stable sort leaves the
    /// pattern listed first in the query in front).
    fn split_line(&self, line: &str, spans: &mut [CaptureSpan<'_>]) -> Vec<Token> {
        spans.sort_by_key(|s| (s.start, s.end));

        let mut tokens = Vec::new();
        let mut cursor = 0usize;
        for span in spans.iter() {
            if span.start < cursor {
                continue; // overlapped by an earlier span
            }
            if span.start > cursor {
                tokens.push(Token {
                    text: line[cursor..span.start].to_string(),
                    start: cursor,
                    scope: None,
                    color: None,
                });
            }
            tokens.push(Token {
                text: line[span.start..span.end].to_string(),
                start: span.start,
                scope: Some(span.capture.to_string()),
                color: self.theme.color_for(span.capture),
            });
            cursor = span.end;
        }
        if cursor < line.len() {
            tokens.push(Token {
                text: line[cursor..].to_string(),
                start: cursor,
                scope: None,
                color: None,
            });
        }
        tokens
    }
}

#[derive(Debug, Clone, Copy)]
struct CaptureSpan<'a> {
    start: usize,
    end: usize,
    capture: &'a str,
}

fn unstyled_lines(code: &str) -> Vec<Vec<Token>> {
    code.lines()
        .map(|line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![Token {
                    text: line.to_string(),
                    start: 0,
                    scope: None,
                    color: None,
                }]
            }
        })
        .collect()
}
