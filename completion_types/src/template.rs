//! Template parsing
//!
//! Template syntax:
//! - `$$` is a literal `$`
//! - `${name}` is a parameter; a later `${name}` is a copy of it
//! - `${cursor}` marks where the caret ends up
//!
//! An unterminated `${` leaves the rest of the string as literal text.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name reserved for the ending-offset marker
pub const END_MARKER: &str = "cursor";

/// One parsed piece of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplatePiece {
    Text(String),
    Param(String),
    ParamCopy(String),
}

/// A parsed template
///
/// `end_marker` is the index of the piece that follows `${cursor}`, which
/// may equal `pieces.len()` when the marker is last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pieces: Vec<TemplatePiece>,
    end_marker: Option<usize>,
    end_marker_count: usize,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut pieces = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut text = String::new();
        let mut end_marker = None;
        let mut end_marker_count = 0;

        let flush = |text: &mut String, pieces: &mut Vec<TemplatePiece>| {
            if !text.is_empty() {
                pieces.push(TemplatePiece::Text(std::mem::take(text)));
            }
        };

        let mut rest = source;
        while let Some(pos) = rest.find('$') {
            text.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            if let Some(tail) = after.strip_prefix('$') {
                text.push('$');
                rest = tail;
            } else if let Some(body) = after.strip_prefix('{') {
                let Some(close) = body.find('}') else {
                    // Unterminated: keep the remainder verbatim
                    text.push_str(&rest[pos..]);
                    rest = "";
                    break;
                };
                let name = &body[..close];
                flush(&mut text, &mut pieces);
                if name == END_MARKER {
                    end_marker = Some(pieces.len());
                    end_marker_count += 1;
                } else if seen.contains(name) {
                    pieces.push(TemplatePiece::ParamCopy(name.to_string()));
                } else {
                    seen.insert(name.to_string());
                    pieces.push(TemplatePiece::Param(name.to_string()));
                }
                rest = &body[close + 1..];
            } else {
                text.push('$');
                rest = after;
            }
        }
        text.push_str(rest);
        flush(&mut text, &mut pieces);

        Self {
            pieces,
            end_marker,
            end_marker_count,
        }
    }

    pub fn pieces(&self) -> &[TemplatePiece] {
        &self.pieces
    }

    /// Index of the piece following `${cursor}`, if the template has one
    pub fn end_marker(&self) -> Option<usize> {
        self.end_marker
    }

    /// Number of `${cursor}` markers seen while parsing
    pub fn end_marker_count(&self) -> usize {
        self.end_marker_count
    }

    /// Distinct parameter names, in order of first appearance
    pub fn param_names(&self) -> Vec<&str> {
        self.pieces
            .iter()
            .filter_map(|piece| match piece {
                TemplatePiece::Param(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn param_count(&self) -> usize {
        self.param_names().len()
    }

    /// Serializes back to template syntax
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for (index, piece) in self.pieces.iter().enumerate() {
            if self.end_marker == Some(index) {
                out.push_str("${cursor}");
            }
            match piece {
                TemplatePiece::Text(text) => out.push_str(&text.replace('$', "$$")),
                TemplatePiece::Param(name) | TemplatePiece::ParamCopy(name) => {
                    out.push_str("${");
                    out.push_str(name);
                    out.push('}');
                }
            }
        }
        if self.end_marker == Some(self.pieces.len()) {
            out.push_str("${cursor}");
        }
        out
    }

    /// Plain expansion with parameters shown by name
    ///
    /// Returns the text and the character offset of the ending marker (the
    /// end of the text when there is none).
    pub fn expand(&self) -> (String, usize) {
        let mut out = String::new();
        let mut chars = 0;
        let mut cursor = None;
        for (index, piece) in self.pieces.iter().enumerate() {
            if self.end_marker == Some(index) {
                cursor = Some(chars);
            }
            let text = match piece {
                TemplatePiece::Text(text) => text,
                TemplatePiece::Param(name) | TemplatePiece::ParamCopy(name) => name,
            };
            out.push_str(text);
            chars += text.chars().count();
        }
        (out, cursor.unwrap_or(chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOR_LOOP: &str = "for (int ${i} = 0; ${i} < ${n}; ${i}++) { ${cursor} }";

    #[test]
    fn test_parse_for_loop() {
        let template = Template::parse(FOR_LOOP);
        let params: Vec<_> = template
            .pieces()
            .iter()
            .filter(|p| matches!(p, TemplatePiece::Param(_)))
            .collect();
        let copies: Vec<_> = template
            .pieces()
            .iter()
            .filter(|p| matches!(p, TemplatePiece::ParamCopy(_)))
            .collect();

        assert_eq!(
            params,
            vec![
                &TemplatePiece::Param("i".to_string()),
                &TemplatePiece::Param("n".to_string())
            ]
        );
        assert_eq!(copies.len(), 2);
        assert!(copies
            .iter()
            .all(|p| **p == TemplatePiece::ParamCopy("i".to_string())));
        assert_eq!(template.param_names(), vec!["i", "n"]);
        assert_eq!(template.end_marker_count(), 1);

        let marker = template.end_marker().unwrap();
        assert_eq!(
            template.pieces()[marker],
            TemplatePiece::Text(" }".to_string())
        );
    }

    #[test]
    fn test_round_trip_for_loop() {
        let template = Template::parse(FOR_LOOP);
        assert_eq!(template.to_source(), FOR_LOOP);
    }

    #[test]
    fn test_dollar_escape() {
        let template = Template::parse("cost: $$${amount}");
        assert_eq!(
            template.pieces(),
            &[
                TemplatePiece::Text("cost: $".to_string()),
                TemplatePiece::Param("amount".to_string()),
            ]
        );
        assert_eq!(template.to_source(), "cost: $$${amount}");
    }

    #[test]
    fn test_lone_dollar_is_text() {
        let template = Template::parse("a $b");
        assert_eq!(template.pieces(), &[TemplatePiece::Text("a $b".to_string())]);
    }

    #[test]
    fn test_unterminated_marker() {
        let template = Template::parse("x = ${a} + ${b");
        assert_eq!(
            template.pieces(),
            &[
                TemplatePiece::Text("x = ".to_string()),
                TemplatePiece::Param("a".to_string()),
                TemplatePiece::Text(" + ${b".to_string()),
            ]
        );
    }

    #[test]
    fn test_cursor_never_a_param() {
        let template = Template::parse("${cursor}${x}");
        assert_eq!(template.end_marker(), Some(0));
        assert_eq!(template.param_names(), vec!["x"]);
    }

    #[test]
    fn test_cursor_at_end() {
        let template = Template::parse("return ${value};${cursor}");
        assert_eq!(template.end_marker(), Some(template.pieces().len()));
        assert_eq!(template.to_source(), "return ${value};${cursor}");
    }

    #[test]
    fn test_duplicate_cursor_counted() {
        let template = Template::parse("${cursor} and ${cursor}");
        assert_eq!(template.end_marker_count(), 2);
        assert_eq!(template.end_marker(), Some(1));
    }

    #[test]
    fn test_expand() {
        let template = Template::parse("while (${cond}) {${cursor}}");
        let (text, cursor) = template.expand();
        assert_eq!(text, "while (cond) {}");
        assert_eq!(cursor, 14);
    }

    #[test]
    fn test_expand_without_marker() {
        let (text, cursor) = Template::parse("${a}-${a}").expand();
        assert_eq!(text, "a-a");
        assert_eq!(cursor, 3);
    }
}
