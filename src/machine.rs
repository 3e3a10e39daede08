use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::bytecode::{CodeBlock, ImageError};
use crate::frontend::{ParserError, parse_line};
use crate::runtime::{Interpreter, Output, Registers, Renderer, RuntimeError};

#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    #[error("failed to open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read program: {0}")]
    Read(#[source] io::Error),

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParserError,
    },

    #[error("runtime error at address {address}: {source}")]
    Runtime {
        address: i32,
        #[source]
        source: RuntimeError,
    },

    #[error("program too large: {len} instructions")]
    ProgramTooLarge { len: usize },

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Owns the register file and the loaded code block.
///
/// A program goes through two phases: every source line is parsed into the
/// code block, then the block length is written into `R0` and control passes
/// to the [`Interpreter`].
#[derive(Debug, Default)]
pub struct Machine {
    registers: Registers,
    code: CodeBlock,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn code(&self) -> &CodeBlock {
        &self.code
    }

    pub fn load_source(&mut self, source: &str) -> Result<(), MachineError> {
        self.load_reader(source.as_bytes())
    }

    /// Parses one instruction per line.
    ///
    /// The first bad line aborts the load and the previous program, if any,
    /// stays in place.
    pub fn load_reader(&mut self, reader: impl BufRead) -> Result<(), MachineError> {
        let mut instructions = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(MachineError::Read)?;
            let instruction = parse_line(&line).map_err(|source| MachineError::Parse {
                line: index + 1,
                source,
            })?;
            trace!(addr = index, %instruction, "assembled");
            instructions.push(instruction);
        }

        self.load_code(CodeBlock::new(instructions))
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), MachineError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading program");
        let file = File::open(path).map_err(|source| MachineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_reader(BufReader::new(file))
    }

    /// Installs an assembled code block and clears the registers.
    pub fn load_code(&mut self, code: CodeBlock) -> Result<(), MachineError> {
        if i32::try_from(code.len()).is_err() {
            return Err(MachineError::ProgramTooLarge { len: code.len() });
        }
        debug!(instructions = code.len(), "program loaded");
        self.code = code;
        self.registers = Registers::new();
        Ok(())
    }

    /// Decodes a postcard image and installs it.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), MachineError> {
        self.load_code(CodeBlock::from_bytes(bytes)?)
    }

    /// Runs the loaded program on a fresh register file.
    ///
    /// The registers stay readable afterwards, including after a runtime
    /// error.
    pub fn run(
        &mut self,
        output: &mut dyn Output,
        renderer: &mut dyn Renderer,
    ) -> Result<(), MachineError> {
        let bound = i32::try_from(self.code.len()).map_err(|_| MachineError::ProgramTooLarge {
            len: self.code.len(),
        })?;
        self.registers = Registers::new();
        self.registers.set_bound(bound);

        let mut interp =
            Interpreter::new(&mut self.registers, &self.code.instructions, output, renderer);
        match interp.run() {
            Ok(()) => {
                debug!(pc = interp.pc(), "halted");
                Ok(())
            }
            Err(source) => Err(MachineError::Runtime {
                address: interp.pc(),
                source,
            }),
        }
    }

    /// Loads `path` and runs it to completion.
    pub fn execute_file(
        &mut self,
        path: impl AsRef<Path>,
        output: &mut dyn Output,
        renderer: &mut dyn Renderer,
    ) -> Result<(), MachineError> {
        self.load_file(path)?;
        self.run(output, renderer)
    }
}
