//! Susan: a toy register machine.
//!
//! Source text is assembled one line at a time by the [`frontend`] into the
//! instructions of [`bytecode`], which the [`runtime`] interpreter executes
//! against ten 32-bit registers. [`machine::Machine`] ties the phases
//! together and [`shell::Shell`] wraps it in the interactive loop.

pub mod bytecode;
pub mod frontend;
pub mod machine;
pub mod runtime;
pub mod shell;

pub use machine::{Machine, MachineError};
