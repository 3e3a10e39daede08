use crate::runtime::runtime_error::RuntimeError;

pub const NUM_REGISTERS: usize = 10;

/// The register file: `R0` holds the bound, `R1`..`R9` are general purpose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    regs: [i32; NUM_REGISTERS],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(index: i32) -> Result<usize, RuntimeError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < NUM_REGISTERS)
            .ok_or(RuntimeError::InvalidRegister { index })
    }

    pub fn read(&self, index: i32) -> Result<i32, RuntimeError> {
        Ok(self.regs[Self::slot(index)?])
    }

    /// Writes a general purpose register. `R0` is never writable here.
    pub fn write(&mut self, index: i32, value: i32) -> Result<(), RuntimeError> {
        if index == 0 {
            return Err(RuntimeError::ReadOnlyRegister { index });
        }
        let slot = Self::slot(index)?;
        self.regs[slot] = value;
        Ok(())
    }

    /// Number of instructions in the loaded code block.
    pub fn bound(&self) -> i32 {
        self.regs[0]
    }

    pub(crate) fn set_bound(&mut self, bound: i32) {
        self.regs[0] = bound;
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.regs
    }
}
