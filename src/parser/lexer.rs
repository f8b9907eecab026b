//! Lexer for directive argument streams using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Argument keywords
    #[token("for")]
    For,
    #[token("using")]
    Using,
    #[token("nofallback")]
    Nofallback,

    // Identifiers: bare position names, category variables (dotted paths
    // allowed) and slug-shaped literals (hyphens allowed)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.-]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    Str(String),
}

/// Lex a directive's argument text into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_keywords() {
        let tokens: Vec<_> = lex("for using nofallback").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::For, Token::Using, Token::Nofallback]);
    }

    #[test]
    fn test_identifiers_and_strings() {
        let tokens: Vec<_> = lex(r#"top_left "news""#).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("top_left".to_string()),
                Token::Str("news".to_string())
            ]
        );
    }

    #[test]
    fn test_dotted_and_hyphenated_identifiers() {
        let tokens: Vec<_> = lex("article.category top-left").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("article.category".to_string()),
                Token::Ident("top-left".to_string())
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        // "format" starts with "for" but must lex as a single identifier
        let tokens: Vec<_> = lex("format").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Ident("format".to_string())]);
    }

    #[test]
    fn test_full_directive_arguments() {
        let tokens: Vec<_> = lex(r#"top_left for "news" using detail nofallback"#)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("top_left".to_string()),
                Token::For,
                Token::Str("news".to_string()),
                Token::Using,
                Token::Ident("detail".to_string()),
                Token::Nofallback,
            ]
        );
    }
}
