pub mod interpreter;
pub mod registers;
pub mod render;
pub mod runtime_error;

pub use interpreter::Interpreter;
pub use registers::{NUM_REGISTERS, Registers};
pub use render::{
    CapturedOutput, NullRenderer, Output, RenderConfig, Renderer, StdoutSink, TerminalRenderer,
    WriteSink,
};
pub use runtime_error::RuntimeError;
