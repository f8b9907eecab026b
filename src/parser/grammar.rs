//! Directive parsing using chumsky
//!
//! Two layers: a chumsky parser over the logos token stream validates one
//! directive's argument shape, and a recursive pass over the scanner's raw
//! tokens assembles block bodies (position bodies, ifposition branches).

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::lexer::{self, Token};
use crate::parser::scanner::{scan, RawToken};

/// Parse template source into a compiled template
pub fn parse(source: &str) -> Result<Template, ParseError> {
    let tokens = scan(source)?;
    let mut pos = 0;
    // No stop tags at the top level, so the stop marker is always None here
    let (nodes, _) = parse_nodes(&tokens, &mut pos, &[])?;
    Ok(Template { nodes })
}

/// Parse nodes until one of the `stop` tags or the end of input
///
/// Returns the nodes plus the stop tag that ended the run, if any. The caller
/// owning a block treats `None` as a missing end tag.
fn parse_nodes(
    tokens: &[RawToken<'_>],
    pos: &mut usize,
    stop: &[&str],
) -> Result<(NodeList, Option<String>), ParseError> {
    let mut nodes = NodeList::new();

    while *pos < tokens.len() {
        match &tokens[*pos] {
            RawToken::Text { text } => {
                nodes.push(Node::Text((*text).to_string()));
                *pos += 1;
            }
            RawToken::Var { body, span } => {
                if body.is_empty() {
                    return Err(ParseError::Syntax {
                        span: span.clone(),
                        message: "Empty variable expression".to_string(),
                        expected: vec![],
                    });
                }
                nodes.push(Node::Variable(VariableRef::new(*body)));
                *pos += 1;
            }
            RawToken::Tag { body, span } => {
                let name = body
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                *pos += 1;

                if stop.contains(&name.as_str()) {
                    return Ok((nodes, Some(name)));
                }

                let after = &body[name.len()..];
                let lead = after.len() - after.trim_start().len();
                let args = after.trim();
                let args_offset = span.start + name.len() + lead;

                match name.as_str() {
                    "position" => {
                        let args = parse_tag_args(&name, args, args_offset)?;
                        let (body_nodes, stopped) = parse_nodes(tokens, pos, &["endposition"])?;
                        if stopped.is_none() {
                            return Err(ParseError::UnclosedBlock {
                                span: span.clone(),
                                tag: name,
                            });
                        }
                        nodes.push(Node::Position(PositionNode {
                            args,
                            body: body_nodes,
                        }));
                    }
                    "ifposition" => {
                        let args = parse_tag_args(&name, args, args_offset)?;
                        let (true_branch, stopped) =
                            parse_nodes(tokens, pos, &["else", "endifposition"])?;
                        let false_branch = match stopped.as_deref() {
                            Some("else") => {
                                let (branch, stopped) =
                                    parse_nodes(tokens, pos, &["endifposition"])?;
                                if stopped.is_none() {
                                    return Err(ParseError::UnclosedBlock {
                                        span: span.clone(),
                                        tag: name,
                                    });
                                }
                                branch
                            }
                            Some(_) => NodeList::new(),
                            None => {
                                return Err(ParseError::UnclosedBlock {
                                    span: span.clone(),
                                    tag: name,
                                });
                            }
                        };
                        nodes.push(Node::IfPosition(IfPositionNode {
                            args,
                            true_branch,
                            false_branch,
                        }));
                    }
                    "else" | "endposition" | "endifposition" => {
                        return Err(ParseError::UnexpectedTag {
                            span: span.clone(),
                            tag: name,
                        });
                    }
                    _ => {
                        return Err(ParseError::UnknownTag {
                            span: span.clone(),
                            tag: name,
                        });
                    }
                }
            }
        }
    }

    Ok((nodes, None))
}

/// Parse one directive's argument text into bound arguments
///
/// `offset` is the byte position of `args` in the full template source, used
/// to shift error spans back into source coordinates.
pub(crate) fn parse_tag_args(
    tag: &str,
    args: &str,
    offset: usize,
) -> Result<TagArgs, ParseError> {
    let len = args.len();
    let token_iter = lexer::lex(args).map(|(tok, span)| (tok, span.into()));
    let token_stream =
        Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    tag_args_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| syntax_error(tag, offset, len, errs))
}

fn tag_args_parser<'a, I>() -> impl Parser<'a, I, TagArgs, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let position_name = select! {
        Token::Ident(s) => s,
    };

    let category = select! {
        Token::Ident(s) => CategoryArg::Variable(s),
        Token::Str(s) => CategoryArg::Slug(s),
    };

    let box_type = select! {
        Token::Ident(s) => s,
        Token::Str(s) => s,
    };

    position_name
        .then_ignore(just(Token::For))
        .then(category)
        .then(just(Token::Using).ignore_then(box_type).or_not())
        .then(just(Token::Nofallback).or_not())
        .then_ignore(end())
        .map(|(((position, category), box_type), nofallback)| TagArgs {
            position,
            category,
            box_type,
            nofallback: nofallback.is_some(),
        })
}

/// The accepted argument shapes, used in error output
fn expected_shapes(tag: &str) -> Vec<String> {
    vec![
        format!("{{% {tag} POSITION_NAME for CATEGORY [nofallback] %}}"),
        format!("{{% {tag} POSITION_NAME for CATEGORY using BOX_TYPE [nofallback] %}}"),
    ]
}

fn syntax_error(tag: &str, offset: usize, len: usize, errs: Vec<Rich<'_, Token>>) -> ParseError {
    let span = errs
        .first()
        .map(|e| e.span().into_range())
        .unwrap_or(0..len);

    ParseError::Syntax {
        span: offset + span.start..offset + span.end,
        message: format!(
            "Invalid {{% {tag} %}} syntax: expected \
             {{% {tag} POSITION_NAME for CATEGORY [using BOX_TYPE] [nofallback] %}}"
        ),
        expected: expected_shapes(tag),
    }
}
