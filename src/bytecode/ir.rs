use crate::bytecode::op::{Opcode, Shape};
use serde::{Deserialize, Serialize};

/// A single bytecode instruction.
///
/// Every variant answers `opcode`, `arg1` and `arg2`; missing arguments read
/// as `0`, so the interpreter never needs to know which arity it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// `PRINTR`
    Nullary(Opcode),
    /// `STDOUT r`, `JUMP addr`, `DRAW $shape`, `BLINK $shape`
    Unary(Opcode, i32),
    /// `LDI r, value`, `ADD r, r`, `ADDV r, r`
    Binary(Opcode, i32, i32),
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match *self {
            Instruction::Nullary(op) | Instruction::Unary(op, _) | Instruction::Binary(op, _, _) => {
                op
            }
        }
    }

    pub fn arg1(&self) -> i32 {
        match *self {
            Instruction::Nullary(_) => 0,
            Instruction::Unary(_, a) | Instruction::Binary(_, a, _) => a,
        }
    }

    pub fn arg2(&self) -> i32 {
        match *self {
            Instruction::Binary(_, _, b) => b,
            _ => 0,
        }
    }

    /// Number of encoded arguments.
    pub fn arity(&self) -> usize {
        match self {
            Instruction::Nullary(_) => 0,
            Instruction::Unary(..) => 1,
            Instruction::Binary(..) => 2,
        }
    }
}

impl std::fmt::Display for Instruction {
    /// Formats the instruction as Susan assembly that the parser accepts back.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = self.opcode();
        match op {
            Opcode::Printr => write!(f, "{}", op),
            Opcode::Stdout => write!(f, "{} r{}", op, self.arg1()),
            Opcode::Jump => write!(f, "{} {}", op, self.arg1()),
            Opcode::Draw | Opcode::Blink => match Shape::from_id(self.arg1()) {
                Some(shape) => write!(f, "{} {}", op, shape),
                None => write!(f, "{} $#{}", op, self.arg1()),
            },
            Opcode::Ldi => write!(f, "{} r{}, {}", op, self.arg1(), self.arg2()),
            Opcode::Add | Opcode::Addv => {
                write!(f, "{} r{}, r{}", op, self.arg1(), self.arg2())
            }
        }
    }
}

/// Version tag written at the front of every serialized code block.
pub const IMAGE_VERSION: u16 = 1;

/// An assembled program: the code block the interpreter walks.
///
/// Index `n` holds the instruction parsed from source line `n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub version: u16,
    pub instructions: Vec<Instruction>,
}

impl Default for CodeBlock {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CodeBlock {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            version: IMAGE_VERSION,
            instructions,
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Encodes the block as a postcard image.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ImageError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Decodes a postcard image produced by [`CodeBlock::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let block: CodeBlock = postcard::from_bytes(bytes)?;
        if block.version != IMAGE_VERSION {
            return Err(ImageError::Version {
                found: block.version,
                expected: IMAGE_VERSION,
            });
        }
        Ok(block)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("malformed image: {0}")]
    Codec(#[from] postcard::Error),

    #[error("unsupported image version {found} (expected {expected})")]
    Version { found: u16, expected: u16 },
}
