//! Template scanner
//!
//! Splits raw template source into literal text runs, `{{ ... }}` variable
//! tokens and `{% ... %}` block tokens. Spans are byte ranges into the
//! original source so later errors can point at the offending directive.

use crate::error::ParseError;
use crate::parser::lexer::Span;

/// One raw token of template source, before directive parsing
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawToken<'a> {
    Text { text: &'a str },
    /// Trimmed contents of a `{{ ... }}` pair
    Var { body: &'a str, span: Span },
    /// Trimmed contents of a `{% ... %}` pair
    Tag { body: &'a str, span: Span },
}

enum Delim {
    Tag,
    Var,
}

/// Find the next opening delimiter at or after `from`
fn find_open(source: &str, from: usize) -> Option<(usize, Delim)> {
    let tag = source[from..].find("{%").map(|i| i + from);
    let var = source[from..].find("{{").map(|i| i + from);
    match (tag, var) {
        (Some(t), Some(v)) if t <= v => Some((t, Delim::Tag)),
        (Some(t), None) => Some((t, Delim::Tag)),
        (_, Some(v)) => Some((v, Delim::Var)),
        (None, None) => None,
    }
}

/// Scan template source into raw tokens
pub(crate) fn scan(source: &str) -> Result<Vec<RawToken<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    while cursor < source.len() {
        let Some((open, delim)) = find_open(source, cursor) else {
            tokens.push(RawToken::Text {
                text: &source[cursor..],
            });
            break;
        };

        if open > cursor {
            tokens.push(RawToken::Text {
                text: &source[cursor..open],
            });
        }

        let (close, opening) = match delim {
            Delim::Tag => ("%}", "{%"),
            Delim::Var => ("}}", "{{"),
        };
        let body_start = open + 2;
        let Some(rel) = source[body_start..].find(close) else {
            return Err(ParseError::UnclosedDelimiter {
                span: open..source.len(),
                delimiter: opening,
            });
        };
        let body_end = body_start + rel;

        // Span covers the trimmed body only
        let raw = &source[body_start..body_end];
        let lead = raw.len() - raw.trim_start().len();
        let body = raw.trim();
        let span = body_start + lead..body_start + lead + body.len();

        tokens.push(match delim {
            Delim::Tag => RawToken::Tag { body, span },
            Delim::Var => RawToken::Var { body, span },
        });

        cursor = body_end + 2;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let tokens = scan("hello world").expect("Should scan");
        assert_eq!(
            tokens,
            vec![RawToken::Text {
                text: "hello world"
            }]
        );
    }

    #[test]
    fn test_variable_token() {
        let tokens = scan("a {{ name }} b").expect("Should scan");
        assert_eq!(
            tokens,
            vec![
                RawToken::Text { text: "a " },
                RawToken::Var {
                    body: "name",
                    span: 5..9
                },
                RawToken::Text { text: " b" },
            ]
        );
    }

    #[test]
    fn test_tag_token() {
        let tokens = scan(r#"{% position top_left for "news" %}"#).expect("Should scan");
        assert_eq!(
            tokens,
            vec![RawToken::Tag {
                body: r#"position top_left for "news""#,
                span: 3..31
            }]
        );
    }

    #[test]
    fn test_mixed_tokens() {
        let tokens = scan("x{% endposition %}{{ y }}").expect("Should scan");
        assert_eq!(tokens.len(), 3);
        assert!(matches!(tokens[1], RawToken::Tag { body: "endposition", .. }));
        assert!(matches!(tokens[2], RawToken::Var { body: "y", .. }));
    }

    #[test]
    fn test_unclosed_tag_delimiter() {
        let err = scan("text {% position").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnclosedDelimiter {
                delimiter: "{%",
                ..
            }
        ));
    }

    #[test]
    fn test_unclosed_var_delimiter() {
        let err = scan("{{ name").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnclosedDelimiter {
                delimiter: "{{",
                ..
            }
        ));
    }
}
