use serde::{Deserialize, Serialize};

// =============================================================================
// OPCODE - Susan instruction set
// =============================================================================

/// Operation code of a Susan instruction.
///
/// The discriminants are the byte encodings of the Susan ISA. Both the
/// parser (encoding) and the interpreter (dispatch) go through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    /// `STDOUT REG` - print a register.
    Stdout = 0x00,
    /// `LDI REG, INT` - load immediate.
    Ldi = 0x01,
    /// `JUMP INT` - forward jump to an absolute address.
    Jump = 0x02,
    /// `ADD REG, REG` - wrapping add into the first register.
    Add = 0x17,
    /// `ADDV REG, REG` - visual add, operands limited to 10.
    Addv = 0x18,
    /// `DRAW SHAPE`
    Draw = 0x19,
    /// `BLINK SHAPE`
    Blink = 0x20,
    /// `PRINTR` - print every register.
    Printr = 0x21,
}

impl Opcode {
    pub const ALL: [Opcode; 8] = [
        Opcode::Stdout,
        Opcode::Ldi,
        Opcode::Jump,
        Opcode::Add,
        Opcode::Addv,
        Opcode::Draw,
        Opcode::Blink,
        Opcode::Printr,
    ];

    /// Byte encoding of this opcode.
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Source mnemonic, as written in Susan programs.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Stdout => "STDOUT",
            Opcode::Ldi => "LDI",
            Opcode::Jump => "JUMP",
            Opcode::Add => "ADD",
            Opcode::Addv => "ADDV",
            Opcode::Draw => "DRAW",
            Opcode::Blink => "BLINK",
            Opcode::Printr => "PRINTR",
        }
    }

    pub fn from_mnemonic(word: &str) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| op.mnemonic() == word)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Opcode::ALL
            .into_iter()
            .find(|op| op.byte() == byte)
            .ok_or(byte)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

// =============================================================================
// SHAPE - operands of DRAW / BLINK
// =============================================================================

/// A drawable shape. The discriminant is the id carried by SHAPE tokens and
/// by DRAW/BLINK instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Shape {
    Heart = 1,
    Bird = 2,
}

impl Shape {
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Heart => "heart",
            Shape::Bird => "bird",
        }
    }

    pub fn from_name(name: &str) -> Option<Shape> {
        match name {
            "heart" => Some(Shape::Heart),
            "bird" => Some(Shape::Bird),
            _ => None,
        }
    }

    pub fn from_id(id: i32) -> Option<Shape> {
        match id {
            1 => Some(Shape::Heart),
            2 => Some(Shape::Bird),
            _ => None,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_bytes_match_isa() {
        assert_eq!(Opcode::Stdout.byte(), 0x00);
        assert_eq!(Opcode::Ldi.byte(), 0x01);
        assert_eq!(Opcode::Jump.byte(), 0x02);
        assert_eq!(Opcode::Add.byte(), 0x17);
        assert_eq!(Opcode::Addv.byte(), 0x18);
        assert_eq!(Opcode::Draw.byte(), 0x19);
        assert_eq!(Opcode::Blink.byte(), 0x20);
        assert_eq!(Opcode::Printr.byte(), 0x21);
    }

    #[test]
    fn test_opcode_from_byte() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::try_from(op.byte()), Ok(op));
        }
        assert_eq!(Opcode::try_from(0x03), Err(0x03));
        assert_eq!(Opcode::try_from(0xff), Err(0xff));
    }

    #[test]
    fn test_mnemonic_lookup_is_exact() {
        assert_eq!(Opcode::from_mnemonic("ADDV"), Some(Opcode::Addv));
        assert_eq!(Opcode::from_mnemonic("PRINTR"), Some(Opcode::Printr));
        assert_eq!(Opcode::from_mnemonic("AD"), None);
        assert_eq!(Opcode::from_mnemonic("add"), None);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(Shape::from_name("heart"), Some(Shape::Heart));
        assert_eq!(Shape::from_name("bird"), Some(Shape::Bird));
        assert_eq!(Shape::from_name("hi"), None);
        assert_eq!(Shape::from_id(2), Some(Shape::Bird));
        assert_eq!(Shape::from_id(3), None);
        assert_eq!(Shape::Heart.to_string(), "$heart");
    }
}
