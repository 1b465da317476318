//! Compiler-annotated renderer
//!
//! The tokens renderer augmented with the analysis result: tokens inside a
//! diagnostic span are marked, each affected line is followed by its error
//! messages, hover answers become data-lsp attributes, and query markers
//! get their resolved type appended under the queried line.

use crate::analysis::{AnalysisResult, Diagnostic, HoverInfo, QueryAnswer, Severity};
use crate::highlight::Token;

use super::{escape_html, wrap_pre, HtmlOptions};

/// Render tokens with compiler-derived annotations.
pub fn annotated_renderer(
    lines: &[Vec<Token>],
    options: &HtmlOptions,
    analysis: &AnalysisResult,
) -> String {
    let mut body = String::new();
    let mut line_start = 0usize;

    for (line_no, tokens) in lines.iter().enumerate() {
        let line_len: usize = tokens.iter().map(|t| t.text.len()).sum();

        // Multi-file samples get a separator where each virtual file begins
        for file in analysis.files.iter().filter(|f| f.start == line_start) {
            body.push_str(&format!(
                "<div class=\"file-name\">{}</div>",
                escape_html(&file.name)
            ));
        }

        body.push_str("<div class=\"line\">");
        for token in tokens {
            let start = line_start + token.start;
            let end = start + token.text.len();
            body.push_str(&render_annotated_token(token, start, end, analysis));
        }
        body.push_str("</div>");

        for diagnostic in analysis
            .diagnostics
            .iter()
            .filter(|d| d.span.line == line_no)
        {
            body.push_str(&render_error_line(diagnostic));
        }
        for query in analysis.queries.iter().filter(|q| q.line == line_no) {
            body.push_str(&render_query_line(query));
        }

        line_start += line_len + 1;
    }

    wrap_pre(Some("typecheck"), options.lang_id.as_deref(), &body)
}

fn render_annotated_token(
    token: &Token,
    start: usize,
    end: usize,
    analysis: &AnalysisResult,
) -> String {
    let errored = analysis
        .diagnostics
        .iter()
        .any(|d| d.span.intersects(start, end));
    let hover = analysis
        .hovers
        .iter()
        .find(|h| h.span.intersects(start, end));

    let mut attrs = String::new();
    if errored {
        attrs.push_str(" class=\"data-err\"");
    }
    if let Some(color) = token.color {
        attrs.push_str(&format!(" style=\"color: {}\"", color.to_css_hex()));
    }
    if let Some(hover) = hover {
        attrs.push_str(&format!(" data-lsp=\"{}\"", escape_html(&hover_payload(hover))));
    }
    format!("<span{}>{}</span>", attrs, escape_html(&token.text))
}

/// Hover text plus its attached documentation, when present.
fn hover_payload(hover: &HoverInfo) -> String {
    match &hover.docs {
        Some(docs) => format!("{}\n{}", hover.text, docs),
        None => hover.text.clone(),
    }
}

fn render_error_line(diagnostic: &Diagnostic) -> String {
    let class = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Suggestion | Severity::Message => "info",
    };
    let code = match diagnostic.code {
        Some(code) => format!("<span class=\"code\">{}</span>", code),
        None => String::new(),
    };
    format!(
        "<div class=\"{}\"><span class=\"message\">{}</span>{}</div>",
        class,
        escape_html(&diagnostic.message),
        code
    )
}

fn render_query_line(query: &QueryAnswer) -> String {
    let answer = query.text.as_deref().unwrap_or("unresolved");
    format!(
        "<div class=\"query\" style=\"margin-left: {}ch\"><span>{}</span></div>",
        query.offset,
        escape_html(answer)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{HoverInfo, Span};

    fn lines_for(code: &str) -> Vec<Vec<Token>> {
        code.lines()
            .map(|line| {
                vec![Token {
                    text: line.to_string(),
                    start: 0,
                    scope: None,
                    color: None,
                }]
            })
            .collect()
    }

    #[test]
    fn test_error_marks_token_and_appends_message() {
        let code = "const x: string = 1";
        let mut analysis = AnalysisResult::clean(code, "typescript");
        analysis.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message: "Type 'number' is not assignable to type 'string'.".to_string(),
            code: Some(2322),
            span: Span {
                start: 6,
                length: 1,
                line: 0,
                character: 6,
            },
        });

        let html = annotated_renderer(&lines_for(code), &HtmlOptions::default(), &analysis);
        assert!(html.contains("class=\"data-err\""));
        assert!(html.contains("not assignable"));
        assert!(html.contains("<span class=\"code\">2322</span>"));
    }

    #[test]
    fn test_hover_becomes_data_lsp() {
        let code = "const x = 1";
        let mut analysis = AnalysisResult::clean(code, "typescript");
        analysis.hovers.push(HoverInfo {
            text: "const x: number".to_string(),
            docs: None,
            span: Span {
                start: 6,
                length: 1,
                line: 0,
                character: 6,
            },
        });

        let html = annotated_renderer(&lines_for(code), &HtmlOptions::default(), &analysis);
        assert!(html.contains("data-lsp=\"const x: number\""));
    }

    #[test]
    fn test_hover_docs_join_the_lsp_payload() {
        let code = "const x = 1";
        let mut analysis = AnalysisResult::clean(code, "typescript");
        analysis.hovers.push(HoverInfo {
            text: "const x: number".to_string(),
            docs: Some("The answer.".to_string()),
            span: Span {
                start: 6,
                length: 1,
                line: 0,
                character: 6,
            },
        });

        let html = annotated_renderer(&lines_for(code), &HtmlOptions::default(), &analysis);
        assert!(html.contains("data-lsp=\"const x: number\nThe answer.\""));
    }

    #[test]
    fn test_file_boundaries_become_separators() {
        let code = "export const a = 1\nimport { a } from './a'";
        let mut analysis = AnalysisResult::clean(code, "typescript");
        analysis.files.push(crate::analysis::FileBoundary {
            name: "a.ts".to_string(),
            start: 0,
            end: 19,
        });
        analysis.files.push(crate::analysis::FileBoundary {
            name: "b.ts".to_string(),
            start: 19,
            end: code.len(),
        });

        let html = annotated_renderer(&lines_for(code), &HtmlOptions::default(), &analysis);
        assert!(html.contains("<div class=\"file-name\">a.ts</div>"));
        let b_pos = html.find("<div class=\"file-name\">b.ts</div>").unwrap();
        let second_line_pos = html.rfind("<div class=\"line\">").unwrap();
        // The separator precedes the line that starts the second file
        assert!(b_pos < second_line_pos);
    }

    #[test]
    fn test_query_answer_follows_its_line() {
        let code = "const x = 1\nx";
        let mut analysis = AnalysisResult::clean(code, "typescript");
        analysis.queries.push(QueryAnswer {
            text: Some("number".to_string()),
            line: 1,
            offset: 0,
        });

        let html = annotated_renderer(&lines_for(code), &HtmlOptions::default(), &analysis);
        let query_pos = html.find("class=\"query\"").unwrap();
        let second_line_pos = html.rfind("<div class=\"line\">").unwrap();
        assert!(query_pos > second_line_pos);
        assert!(html.contains("<span>number</span>"));
    }

    #[test]
    fn test_container_carries_typecheck_class() {
        let analysis = AnalysisResult::clean("x", "typescript");
        let html = annotated_renderer(&lines_for("x"), &HtmlOptions::default(), &analysis);
        assert!(html.starts_with("<pre class=\"shiki typecheck\">"));
    }
}
