use crate::bytecode::Opcode;

/// Classification of a lexed token. Every mnemonic gets its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Operands
    Int,
    Reg,
    Comma,
    Shape,

    // Commands
    Stdout,
    Ldi,
    Jump,
    Add,
    Addv,
    Draw,
    Blink,
    Printr,

    // Special
    Eof,
}

impl TokenKind {
    /// Looks up an uppercase command word.
    pub fn command(word: &str) -> Option<TokenKind> {
        Opcode::from_mnemonic(word).map(TokenKind::from)
    }

    /// Returns true if this kind is a command mnemonic.
    pub fn is_command(self) -> bool {
        self.opcode().is_some()
    }

    /// The opcode a command kind encodes to.
    pub fn opcode(self) -> Option<Opcode> {
        Some(match self {
            TokenKind::Stdout => Opcode::Stdout,
            TokenKind::Ldi => Opcode::Ldi,
            TokenKind::Jump => Opcode::Jump,
            TokenKind::Add => Opcode::Add,
            TokenKind::Addv => Opcode::Addv,
            TokenKind::Draw => Opcode::Draw,
            TokenKind::Blink => Opcode::Blink,
            TokenKind::Printr => Opcode::Printr,
            TokenKind::Int | TokenKind::Reg | TokenKind::Comma | TokenKind::Shape | TokenKind::Eof => {
                return None;
            }
        })
    }
}

impl From<Opcode> for TokenKind {
    fn from(op: Opcode) -> Self {
        match op {
            Opcode::Stdout => TokenKind::Stdout,
            Opcode::Ldi => TokenKind::Ldi,
            Opcode::Jump => TokenKind::Jump,
            Opcode::Add => TokenKind::Add,
            Opcode::Addv => TokenKind::Addv,
            Opcode::Draw => TokenKind::Draw,
            Opcode::Blink => TokenKind::Blink,
            Opcode::Printr => TokenKind::Printr,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(op) = self.opcode() {
            return f.write_str(op.mnemonic());
        }
        match self {
            TokenKind::Int => write!(f, "INT"),
            TokenKind::Reg => write!(f, "REG"),
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::Shape => write!(f, "SHAPE"),
            _ => write!(f, "EOF"),
        }
    }
}

/// A token: kind plus its 32-bit payload.
///
/// `value` is the register index for REG, the literal for INT and the shape id
/// for SHAPE; it is 0 for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: i32,
}

impl Token {
    pub fn new(kind: TokenKind, value: i32) -> Self {
        Token { kind, value }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, 0)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Int => write!(f, "{}", self.value),
            TokenKind::Reg => write!(f, "r{}", self.value),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Shape => match crate::bytecode::Shape::from_id(self.value) {
                Some(shape) => write!(f, "{}", shape),
                None => write!(f, "$#{}", self.value),
            },
            kind => write!(f, "{}", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_kinds_map_to_opcodes() {
        for op in Opcode::ALL {
            let kind = TokenKind::command(op.mnemonic()).unwrap();
            assert!(kind.is_command());
            assert_eq!(kind.opcode(), Some(op));
        }
        assert_eq!(TokenKind::command("PEW"), None);
        assert!(!TokenKind::Reg.is_command());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::new(TokenKind::Reg, 3).to_string(), "r3");
        assert_eq!(Token::new(TokenKind::Int, -12).to_string(), "-12");
        assert_eq!(Token::new(TokenKind::Shape, 1).to_string(), "$heart");
        assert_eq!(Token::new(TokenKind::Addv, 0).to_string(), "ADDV");
        assert_eq!(TokenKind::Comma.to_string(), "COMMA");
        assert_eq!(Token::eof().to_string(), "EOF");
    }
}
