use std::num::IntErrorKind;

use crate::bytecode::Shape;
use crate::frontend::token::{Token, TokenKind};

/// Longest accepted command word.
pub const MAX_COMMAND_LEN: usize = 10;
/// Longest accepted shape name after `$`.
pub const MAX_SHAPE_LEN: usize = 6;

/// A token together with the 1-based column it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub col: usize,
}

/// A lexical error. `col` is the 1-based column of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("column {col}: unexpected {token} (missing delimiter)")]
    MissingDelimiter { token: TokenKind, col: usize },

    #[error("column {col}: missing register index")]
    MissingRegisterIndex { col: usize },

    #[error("column {col}: invalid register r{index} [use registers r0:r9]")]
    RegisterOutOfRange { index: String, col: usize },

    #[error("column {col}: integer overflow: {literal}")]
    IntegerOverflow { literal: String, col: usize },

    #[error("column {col}: integer underflow: {literal}")]
    IntegerUnderflow { literal: String, col: usize },

    #[error("column {col}: invalid command: max length reached ({})", MAX_COMMAND_LEN)]
    CommandTooLong { col: usize },

    #[error("column {col}: undefined: '{word}'")]
    UnknownCommand { word: String, col: usize },

    #[error("column {col}: invalid shape: max length reached ({})", MAX_SHAPE_LEN)]
    ShapeTooLong { col: usize },

    #[error("column {col}: invalid shape: '{name}'")]
    UnknownShape { name: String, col: usize },

    #[error("column {col}: missing shape after '$'")]
    MissingShape { col: usize },

    #[error("column {col}: input is case sensitive: invalid '{ch}'")]
    CaseViolation { ch: char, col: usize },

    #[error("column {col}: invalid character: '{ch}'")]
    InvalidCharacter { ch: char, col: usize },

    #[error("column {col}: unrecognized symbol: {ch:?}")]
    UnrecognizedSymbol { ch: char, col: usize },
}

/// Tokenizer for a single line of Susan source.
///
/// Tokens are produced on demand by [`Lexer::next_token`]; once the line is
/// exhausted every further call yields EOF. A fresh lexer is built per line.
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(line: &str) -> Self {
        Self::at(line, 0)
    }

    /// Starts lexing `line` at cursor `pos` (0-based, in characters).
    pub fn at(line: &str, pos: usize) -> Self {
        Lexer {
            source: line.chars().collect(),
            pos,
        }
    }

    /// Current character, `None` once the cursor is past the end.
    fn current(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn previous(&self) -> Option<char> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.source.get(i).copied())
    }

    fn advance(&mut self) {
        if self.pos < self.source.len() {
            self.pos += 1;
        }
    }

    fn col(&self) -> usize {
        self.pos + 1
    }

    /// True if the character just before the cursor is a space or a comma.
    fn after_delimiter(&self) -> bool {
        matches!(self.previous(), Some(ch) if ch == ',' || ch.is_whitespace())
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.current().filter(char::is_ascii_digit) {
            digits.push(ch);
            self.advance();
        }
        digits
    }

    /// `r<d>` / `R<d>`. The marker may also open the line.
    fn read_register(&mut self) -> Result<Token, LexError> {
        let col = self.col();
        if self.pos > 0 && !self.after_delimiter() {
            return Err(LexError::MissingDelimiter {
                token: TokenKind::Reg,
                col,
            });
        }
        self.advance(); // 'r' or 'R'

        let digits = self.read_digits();
        let mut chars = digits.chars();
        match (chars.next().and_then(|ch| ch.to_digit(10)), chars.next()) {
            (None, _) => Err(LexError::MissingRegisterIndex { col }),
            (Some(index), None) => Ok(Token::new(TokenKind::Reg, index as i32)),
            (Some(_), Some(_)) => Err(LexError::RegisterOutOfRange { index: digits, col }),
        }
    }

    /// Decimal literal, optionally negative.
    fn read_integer(&mut self) -> Result<Token, LexError> {
        let col = self.col();
        if !self.after_delimiter() {
            return Err(LexError::MissingDelimiter {
                token: TokenKind::Int,
                col,
            });
        }

        let mut literal = String::new();
        if self.current() == Some('-') {
            literal.push('-');
            self.advance();
        }
        literal.push_str(&self.read_digits());

        match literal.parse::<i32>() {
            Ok(value) => Ok(Token::new(TokenKind::Int, value)),
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => {
                Err(LexError::IntegerUnderflow { literal, col })
            }
            Err(_) => Err(LexError::IntegerOverflow { literal, col }),
        }
    }

    /// `$heart` / `$bird`
    fn read_shape(&mut self) -> Result<Token, LexError> {
        let col = self.col();
        if !self.after_delimiter() {
            return Err(LexError::MissingDelimiter {
                token: TokenKind::Shape,
                col,
            });
        }
        self.advance(); // '$'

        let mut name = String::new();
        while let Some(ch) = self.current().filter(char::is_ascii_lowercase) {
            if name.len() == MAX_SHAPE_LEN {
                return Err(LexError::ShapeTooLong { col });
            }
            name.push(ch);
            self.advance();
        }

        if name.is_empty() {
            return Err(LexError::MissingShape { col });
        }

        match Shape::from_name(&name) {
            Some(shape) => Ok(Token::new(TokenKind::Shape, shape.id())),
            None => Err(LexError::UnknownShape { name, col }),
        }
    }

    /// Uppercase command word.
    fn read_command(&mut self) -> Result<Token, LexError> {
        let col = self.col();
        let mut word = String::new();
        while let Some(ch) = self.current().filter(char::is_ascii_uppercase) {
            if word.len() == MAX_COMMAND_LEN {
                return Err(LexError::CommandTooLong { col });
            }
            word.push(ch);
            self.advance();
        }

        match TokenKind::command(&word) {
            Some(kind) => Ok(Token::new(kind, 0)),
            None => Err(LexError::UnknownCommand { word, col }),
        }
    }

    /// Lexes the next token and the column it starts at.
    pub fn next_spanned(&mut self) -> Result<Spanned, LexError> {
        loop {
            let col = self.col();
            let Some(ch) = self.current() else {
                return Ok(Spanned {
                    token: Token::eof(),
                    col,
                });
            };

            let token = match ch {
                ch if ch.is_whitespace() => {
                    self.skip_whitespace();
                    continue;
                }
                'r' | 'R' => self.read_register()?,
                ch if ch.is_ascii_digit() => self.read_integer()?,
                '-' if self.peek().is_some_and(|next| next.is_ascii_digit()) => {
                    self.read_integer()?
                }
                ',' => {
                    self.advance();
                    Token::new(TokenKind::Comma, 0)
                }
                '$' => self.read_shape()?,
                ch if ch.is_lowercase() => return Err(LexError::CaseViolation { ch, col }),
                ch if ch.is_ascii_punctuation() => {
                    return Err(LexError::InvalidCharacter { ch, col });
                }
                ch if ch.is_ascii_uppercase() => self.read_command()?,
                ch => return Err(LexError::UnrecognizedSymbol { ch, col }),
            };

            return Ok(Spanned { token, col });
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.next_spanned().map(|spanned| spanned.token)
    }

    /// Lexes the rest of the line. The last element is always EOF.
    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_spanned()?;
            let done = spanned.token.kind == TokenKind::Eof;
            tokens.push(spanned);
            if done {
                return Ok(tokens);
            }
        }
    }
}
