use std::fmt::Write;

use crate::frontend::lexer::Spanned;
use crate::frontend::token::TokenKind;

/// Renders lexed lines as `[line:col] KIND value` rows.
pub struct TokenDumper {
    pub color: bool,
}

impl Default for TokenDumper {
    fn default() -> Self {
        Self { color: true }
    }
}

impl TokenDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const DIM: &'static str = "\x1b[2m";
    const YEL: &'static str = "\x1b[33m";
    const CYN: &'static str = "\x1b[36m";
    const MAG: &'static str = "\x1b[35m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    /// Prints the tokens of source line `line` (1-based) to stdout.
    pub fn dump(&self, line: usize, tokens: &[Spanned]) {
        print!("{}", self.render(line, tokens));
    }

    pub fn render(&self, line: usize, tokens: &[Spanned]) -> String {
        let mut out = String::new();
        for s in tokens {
            let (colr, reset) = if self.color {
                (Self::color(s.token.kind), Self::RESET)
            } else {
                ("", "")
            };
            let _ = writeln!(
                out,
                "[{:02}:{:02}] {}{:<8} {}{}",
                line,
                s.col,
                colr,
                s.token.kind.to_string(),
                s.token,
                reset
            );
        }
        out
    }

    fn color(kind: TokenKind) -> &'static str {
        match kind {
            TokenKind::Eof => Self::DIM,
            TokenKind::Int | TokenKind::Shape => Self::CYN,
            TokenKind::Reg => Self::YEL,
            TokenKind::Comma => Self::MAG,
            _ => Self::RESET,
        }
    }
}
