use crate::bytecode::{Instruction, Opcode};
use crate::frontend::lexer::Lexer;
use crate::frontend::parser_error::ParserError;
use crate::frontend::token::{Token, TokenKind};

/// Single-line parser for Susan.
///
/// The parser pulls tokens from its own [`Lexer`] one at a time, keeping a
/// single token of lookahead, and encodes the line as one [`Instruction`].
///
/// Grammar (one rule per mnemonic, tokens consumed left to right):
///
/// ```text
/// STDOUT REG
/// LDI    REG COMMA INT
/// JUMP   INT
/// ADD    REG COMMA REG
/// ADDV   REG COMMA REG
/// DRAW   SHAPE
/// BLINK  SHAPE
/// PRINTR
/// ```
///
/// Every rule must be followed by the end of the line: trailing tokens such
/// as the `r1` in `PRINTR r1` are rejected with an `UnexpectedToken` error
/// expecting EOF.
pub struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    /// Creates a parser for `line` and lexes its first token.
    ///
    /// # Errors
    /// Fails if the first token does not lex.
    pub fn new(line: &str) -> Result<Self, ParserError> {
        let mut lexer = Lexer::new(line);
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    /// The lookahead token.
    pub fn current(&self) -> Token {
        self.current
    }

    /// Consumes the lookahead if it has kind `expected` and pulls the next
    /// token from the lexer. Returns the consumed token.
    ///
    /// # Errors
    /// - `UnexpectedToken` if the lookahead has another kind.
    /// - `Lex` if the following token fails to lex.
    pub fn advance(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        if self.current.kind != expected {
            return Err(ParserError::UnexpectedToken {
                expected,
                found: self.current.kind,
            });
        }
        let consumed = self.current;
        self.current = self.lexer.next_token()?;
        Ok(consumed)
    }

    /// Parses the whole line as one instruction.
    pub fn parse_instruction(&mut self) -> Result<Instruction, ParserError> {
        let instruction = match self.current.kind {
            TokenKind::Stdout => self.parse_unary(Opcode::Stdout, TokenKind::Reg)?,
            TokenKind::Jump => self.parse_unary(Opcode::Jump, TokenKind::Int)?,
            TokenKind::Draw => self.parse_unary(Opcode::Draw, TokenKind::Shape)?,
            TokenKind::Blink => self.parse_unary(Opcode::Blink, TokenKind::Shape)?,
            TokenKind::Ldi => self.parse_binary(Opcode::Ldi, TokenKind::Int)?,
            TokenKind::Add => self.parse_binary(Opcode::Add, TokenKind::Reg)?,
            TokenKind::Addv => self.parse_binary(Opcode::Addv, TokenKind::Reg)?,
            TokenKind::Printr => {
                self.advance(TokenKind::Printr)?;
                Instruction::Nullary(Opcode::Printr)
            }
            found => return Err(ParserError::UnknownInstruction { found }),
        };

        self.expect_end()?;
        Ok(instruction)
    }

    /// `COMMAND operand`
    fn parse_unary(
        &mut self,
        opcode: Opcode,
        operand: TokenKind,
    ) -> Result<Instruction, ParserError> {
        self.advance(TokenKind::from(opcode))?;
        let arg = self.advance(operand)?.value;
        Ok(Instruction::Unary(opcode, arg))
    }

    /// `COMMAND REG COMMA second`
    fn parse_binary(
        &mut self,
        opcode: Opcode,
        second: TokenKind,
    ) -> Result<Instruction, ParserError> {
        self.advance(TokenKind::from(opcode))?;
        let reg = self.advance(TokenKind::Reg)?.value;
        self.advance(TokenKind::Comma)?;
        let arg = self.advance(second)?.value;
        Ok(Instruction::Binary(opcode, reg, arg))
    }

    fn expect_end(&self) -> Result<(), ParserError> {
        match self.current.kind {
            TokenKind::Eof => Ok(()),
            found => Err(ParserError::UnexpectedToken {
                expected: TokenKind::Eof,
                found,
            }),
        }
    }
}

/// Parses one source line into an instruction.
pub fn parse_line(line: &str) -> Result<Instruction, ParserError> {
    Parser::new(line)?.parse_instruction()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::LexError;
    use proptest::prelude::*;

    fn accepts(source: &str) -> bool {
        parse_line(source).is_ok()
    }

    #[test]
    fn test_encodings() {
        assert_eq!(
            parse_line("STDOUT r1").unwrap(),
            Instruction::Unary(Opcode::Stdout, 1)
        );
        assert_eq!(
            parse_line("LDI r8, 89").unwrap(),
            Instruction::Binary(Opcode::Ldi, 8, 89)
        );
        assert_eq!(
            parse_line("JUMP 4").unwrap(),
            Instruction::Unary(Opcode::Jump, 4)
        );
        assert_eq!(
            parse_line("  ADD R1,   R2 ").unwrap(),
            Instruction::Binary(Opcode::Add, 1, 2)
        );
        assert_eq!(
            parse_line("ADDV r3,r4").unwrap(),
            Instruction::Binary(Opcode::Addv, 3, 4)
        );
        assert_eq!(
            parse_line("DRAW $heart").unwrap(),
            Instruction::Unary(Opcode::Draw, 1)
        );
        assert_eq!(
            parse_line("BLINK $bird").unwrap(),
            Instruction::Unary(Opcode::Blink, 2)
        );
        assert_eq!(
            parse_line("PRINTR").unwrap(),
            Instruction::Nullary(Opcode::Printr)
        );
    }

    #[test]
    fn test_accepted_lines() {
        for source in [
            "STDOUT r1",
            "LDI r1,3",
            "LDI r1 , 3 ",
            "LDI r8, 89",
            "LDI r2, -40",
            "JUMP 4",
            "ADD r1,r2",
            "  ADD R1,   R2 ",
            "ADDV r1,r2",
            "  ADDV R1,   R2 ",
            "DRAW $heart",
            "DRAW $bird",
            "BLINK $heart",
            "BLINK $bird",
            "PRINTR",
            "\tPRINTR\t",
        ] {
            assert!(accepts(source), "should accept {source:?}");
        }
    }

    #[test]
    fn test_rejected_lines() {
        for source in [
            // STDOUT REG
            "STDOUTr1",
            "STDOUT3",
            "STDOUT 3",
            " r1 STDOUT",
            " ,STDOUT",
            "STDOUT,",
            // LDI REG COMMA INT
            "LDI , 3",
            "LDIr1, 3",
            "LDI r1 3",
            "LDI r1, ",
            "LDI 3, r1",
            " 3LDI r1,3",
            " $LDI r1,3",
            // JUMP INT
            "JUMP r4",
            "JUMP4",
            "JUMP , 4",
            "JUMP ",
            " 4 JUMP",
            // ADD REG COMMA REG
            "ADDr1, r2",
            "ADD r1 r2",
            "ADD rr2, r1",
            "ADD , r2",
            "ADD r1 ,",
            " r1 ADD , r2",
            "ADD 1,r2",
            "ADD r1, 2",
            "ADD 1, 22",
            " $ADD r1,r2",
            // ADDV REG COMMA REG
            "ADDV , r2",
            "ADDV r1 r2",
            "ADDV r1 ,",
            " r1 ADDV , r2",
            "ADDV 1,r2",
            "ADDV r1, 2",
            "ADDV 1, 22",
            " $ADDV r1,r2",
            // DRAW/BLINK SHAPE
            "DRAW $hi",
            "DRAW",
            "BLINK",
            "DRAW$heart",
            "BLINK$heart",
            "DRAW $HEART",
            // trailing tokens
            "PRINTR r1",
            "STDOUT r1 r2",
            "JUMP 4, 5",
            // blank line
            "",
            "   ",
        ] {
            assert!(!accepts(source), "should reject {source:?}");
        }
    }

    #[test]
    fn test_advance_reports_kinds() {
        assert_eq!(
            parse_line("STDOUT 3"),
            Err(ParserError::UnexpectedToken {
                expected: TokenKind::Reg,
                found: TokenKind::Int
            })
        );
        assert_eq!(
            parse_line("LDI r1 3"),
            Err(ParserError::UnexpectedToken {
                expected: TokenKind::Comma,
                found: TokenKind::Int
            })
        );
        assert_eq!(
            parse_line("JUMP "),
            Err(ParserError::UnexpectedToken {
                expected: TokenKind::Int,
                found: TokenKind::Eof
            })
        );
        assert_eq!(
            parse_line("PRINTR r1"),
            Err(ParserError::UnexpectedToken {
                expected: TokenKind::Eof,
                found: TokenKind::Reg
            })
        );
    }

    #[test]
    fn test_unknown_instruction() {
        assert_eq!(
            parse_line(" r1 STDOUT"),
            Err(ParserError::UnknownInstruction {
                found: TokenKind::Reg
            })
        );
        assert_eq!(
            parse_line(""),
            Err(ParserError::UnknownInstruction {
                found: TokenKind::Eof
            })
        );
    }

    #[test]
    fn test_lexer_errors_pass_through() {
        assert_eq!(
            parse_line("JUMP4"),
            Err(ParserError::Lex(LexError::MissingDelimiter {
                token: TokenKind::Int,
                col: 5
            }))
        );
        assert!(matches!(
            Parser::new("PEW r1"),
            Err(ParserError::Lex(LexError::UnknownCommand { .. }))
        ));
        assert_eq!(
            parse_line("LDI r1, 9999999999").unwrap_err().to_string(),
            "column 9: integer overflow: 9999999999"
        );
    }

    #[test]
    fn test_advance_step_by_step() {
        let mut parser = Parser::new("LDI r4, 7").unwrap();
        assert_eq!(parser.current().kind, TokenKind::Ldi);
        assert!(parser.advance(TokenKind::Reg).is_err());
        parser.advance(TokenKind::Ldi).unwrap();
        assert_eq!(parser.advance(TokenKind::Reg).unwrap().value, 4);
        parser.advance(TokenKind::Comma).unwrap();
        assert_eq!(parser.advance(TokenKind::Int).unwrap().value, 7);
        assert_eq!(parser.current(), Token::eof());
    }

    fn any_instruction() -> impl Strategy<Value = Instruction> {
        let reg = 0i32..=9;
        let shape = 1i32..=2;
        prop_oneof![
            reg.clone().prop_map(|r| Instruction::Unary(Opcode::Stdout, r)),
            any::<i32>().prop_map(|t| Instruction::Unary(Opcode::Jump, t)),
            shape.clone().prop_map(|s| Instruction::Unary(Opcode::Draw, s)),
            shape.prop_map(|s| Instruction::Unary(Opcode::Blink, s)),
            (reg.clone(), any::<i32>()).prop_map(|(r, v)| Instruction::Binary(Opcode::Ldi, r, v)),
            (reg.clone(), reg.clone()).prop_map(|(a, b)| Instruction::Binary(Opcode::Add, a, b)),
            (reg.clone(), reg).prop_map(|(a, b)| Instruction::Binary(Opcode::Addv, a, b)),
            Just(Instruction::Nullary(Opcode::Printr)),
        ]
    }

    proptest! {
        #[test]
        fn prop_assembly_round_trip(instruction in any_instruction()) {
            let text = instruction.to_string();
            prop_assert_eq!(parse_line(&text), Ok(instruction));
        }

        #[test]
        fn prop_ldi_operands_survive_encoding(reg in 1i32..=9, value: i32) {
            let decoded = parse_line(&format!("LDI r{reg},{value}")).unwrap();
            prop_assert_eq!(decoded.opcode(), Opcode::Ldi);
            prop_assert_eq!(decoded.arg1(), reg);
            prop_assert_eq!(decoded.arg2(), value);
        }
    }
}
