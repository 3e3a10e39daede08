pub mod disasm;
pub mod ir;
pub mod op;

pub use ir::{CodeBlock, IMAGE_VERSION, ImageError, Instruction};
pub use op::{Opcode, Shape};
