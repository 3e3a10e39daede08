use tracing::trace;

use crate::bytecode::{Instruction, Opcode, Shape};
use crate::runtime::registers::{NUM_REGISTERS, Registers};
use crate::runtime::render::{Output, Renderer};
use crate::runtime::runtime_error::RuntimeError;

/// Decode-and-dispatch engine over a borrowed code block.
///
/// The interpreter is running while `pc < R0` and halted once the program
/// counter reaches the bound. Every instruction except `JUMP` advances the
/// program counter by one; `JUMP` may only move it forward and never past
/// the last address.
pub struct Interpreter<'vm> {
    pc: i32,
    registers: &'vm mut Registers,
    code: &'vm [Instruction],
    output: &'vm mut dyn Output,
    renderer: &'vm mut dyn Renderer,
}

impl<'vm> Interpreter<'vm> {
    pub fn new(
        registers: &'vm mut Registers,
        code: &'vm [Instruction],
        output: &'vm mut dyn Output,
        renderer: &'vm mut dyn Renderer,
    ) -> Self {
        Self {
            pc: 0,
            registers,
            code,
            output,
            renderer,
        }
    }

    /// Address of the next instruction, or of the one that just failed.
    pub fn pc(&self) -> i32 {
        self.pc
    }

    pub fn is_halted(&self) -> bool {
        self.pc >= self.registers.bound()
    }

    /// Runs until halted or the first error.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        while !self.is_halted() {
            self.step()?;
        }
        Ok(())
    }

    /// Executes exactly one instruction. Does nothing once halted.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        if self.is_halted() {
            return Ok(());
        }

        let instruction = self.fetch()?;
        trace!(pc = self.pc, %instruction, "dispatch");

        let (a, b) = (instruction.arg1(), instruction.arg2());
        match instruction.opcode() {
            Opcode::Jump => return self.jump_to(a),
            Opcode::Ldi => self.registers.write(a, b)?,
            Opcode::Add => self.add(a, b)?,
            Opcode::Addv => self.add_visual(a, b)?,
            Opcode::Stdout => {
                let value = self.registers.read(a)?;
                self.output.value(value)?;
            }
            Opcode::Printr => self.print_registers()?,
            Opcode::Draw => self.draw(a, false)?,
            Opcode::Blink => self.draw(a, true)?,
        }

        self.pc += 1;
        Ok(())
    }

    fn fetch(&self) -> Result<Instruction, RuntimeError> {
        usize::try_from(self.pc)
            .ok()
            .and_then(|addr| self.code.get(addr))
            .copied()
            .ok_or(RuntimeError::ProgramCounterOutOfBounds { pc: self.pc })
    }

    fn check_jump(&self, target: i32) -> Result<(), RuntimeError> {
        if target <= self.pc {
            return Err(RuntimeError::InfiniteLoop {
                from: self.pc,
                to: target,
            });
        }
        let bound = self.registers.bound();
        if target >= bound {
            return Err(RuntimeError::Segfault { target, bound });
        }
        Ok(())
    }

    fn jump_to(&mut self, target: i32) -> Result<(), RuntimeError> {
        self.check_jump(target)?;
        self.pc = target;
        Ok(())
    }

    fn add(&mut self, ri: i32, rj: i32) -> Result<(), RuntimeError> {
        let sum = self
            .registers
            .read(ri)?
            .wrapping_add(self.registers.read(rj)?);
        self.registers.write(ri, sum)
    }

    fn add_visual(&mut self, ri: i32, rj: i32) -> Result<(), RuntimeError> {
        let left = self.registers.read(ri)?;
        let right = self.registers.read(rj)?;
        if left > 10 || right > 10 {
            return Err(RuntimeError::VisualAddRange { left, right });
        }
        let sum = left.wrapping_add(right);
        self.registers.write(ri, sum)?;
        self.renderer.visual_add(left, right, sum)?;
        Ok(())
    }

    fn print_registers(&mut self) -> Result<(), RuntimeError> {
        for index in 0..NUM_REGISTERS {
            let value = self.registers.as_slice()[index];
            self.output.register(index, value)?;
        }
        Ok(())
    }

    fn draw(&mut self, id: i32, blink: bool) -> Result<(), RuntimeError> {
        let shape = Shape::from_id(id).ok_or(RuntimeError::InvalidShape { id })?;
        self.renderer.draw(shape, blink)?;
        Ok(())
    }
}
