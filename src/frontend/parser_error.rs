use crate::frontend::lexer::LexError;
use crate::frontend::token::TokenKind;

/// A syntax error in one source line.
///
/// Lexer failures raised while the parser pulls its lookahead are passed
/// through unchanged as [`ParserError::Lex`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("syntax error: unexpected {found}, expected {expected}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },

    #[error("syntax error: unknown instruction starting with {found}")]
    UnknownInstruction { found: TokenKind },

    #[error(transparent)]
    Lex(#[from] LexError),
}
