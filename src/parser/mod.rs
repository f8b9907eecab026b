//! Parser for position template directives

pub mod ast;
mod grammar;
pub mod lexer;
mod scanner;

pub use ast::*;
pub use grammar::parse;
