use std::io;

/// A failure raised while executing a code block.
///
/// Execution stops at the first error; whatever earlier instructions wrote to
/// the registers stays there.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("write to R{index}: permission denied [R0 is read-only]")]
    ReadOnlyRegister { index: i32 },

    #[error("invalid register: R{index} [use registers R0:R9]")]
    InvalidRegister { index: i32 },

    #[error("JUMP at addr {from} to {to}: infinite loop warning")]
    InfiniteLoop { from: i32, to: i32 },

    #[error("JUMP to {target}: segmentation violation [code block holds {bound} instructions]")]
    Segfault { target: i32, bound: i32 },

    #[error("invalid shape id: {id}")]
    InvalidShape { id: i32 },

    #[error("ADDV {left} + {right}: visual add only takes values up to 10")]
    VisualAddRange { left: i32, right: i32 },

    #[error("program counter {pc} is outside the code block")]
    ProgramCounterOutOfBounds { pc: i32 },

    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}
