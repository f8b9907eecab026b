//! Error types for template compilation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Compile-time template errors
///
/// Render-time lookup misses are not errors: they produce empty output or the
/// conditional false branch and never surface here.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed directive arguments
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    /// An opening `{%` or `{{` without its closing pair
    #[error("Unclosed '{delimiter}' at {span:?}")]
    UnclosedDelimiter { span: Span, delimiter: &'static str },

    /// A block directive without its end tag
    #[error("Unclosed block: {{% {tag} %}} is missing {{% end{tag} %}}")]
    UnclosedBlock { span: Span, tag: String },

    /// An `else` or end tag outside the block it belongs to
    #[error("Unexpected tag {{% {tag} %}}")]
    UnexpectedTag { span: Span, tag: String },

    /// A directive name this engine does not know
    #[error("Unknown tag {{% {tag} %}}")]
    UnknownTag { span: Span, tag: String },
}

impl ParseError {
    /// Byte span of the offending source text
    pub fn span(&self) -> Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::UnclosedDelimiter { span, .. }
            | ParseError::UnclosedBlock { span, .. }
            | ParseError::UnexpectedTag { span, .. }
            | ParseError::UnknownTag { span, .. } => span.clone(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span();
        // Labels get the message plus, for syntax errors, the accepted shapes
        let label_message = match self {
            ParseError::Syntax {
                message, expected, ..
            } if !expected.is_empty() => {
                format!("{}\nExpected: {}", message, expected.join(" or "))
            }
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(label_message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}
