//! Source front end: one line of Susan text in, one instruction out.

pub mod lexer;
pub mod parser;
pub mod parser_error;
pub mod token;
pub mod token_dumper;

pub use lexer::{LexError, Lexer, Spanned};
pub use parser::{Parser, parse_line};
pub use parser_error::ParserError;
pub use token::{Token, TokenKind};
