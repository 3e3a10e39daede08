use std::fmt::Write;

use crate::bytecode::{CodeBlock, Instruction, Opcode};

/// Print disassembly of a code block
pub fn print_bc(name: &str, block: &CodeBlock) {
    print!("{}", disassemble(name, &block.instructions));
}

/// Disassemble a code block into a listing.
///
/// Each row shows the address, the instruction as assembly and its raw
/// encoding. Addresses targeted by a JUMP are marked with `►`.
pub fn disassemble(name: &str, code: &[Instruction]) -> String {
    let mut out = String::new();
    let jump_targets = collect_jump_targets(code);

    let _ = writeln!(out, "════════════════════════════════════════");
    let _ = writeln!(out, " {}", name);
    let _ = writeln!(out, " {} instructions", code.len());
    let _ = writeln!(out, "════════════════════════════════════════");

    for (addr, instruction) in code.iter().enumerate() {
        let marked = jump_targets.contains(&addr);
        if marked {
            let _ = writeln!(out, "      ┌──────────────────────────────────");
        }
        let marker = if marked { "► " } else { "  " };
        let _ = writeln!(
            out,
            "{:04} {}{:<24} ; {}",
            addr,
            marker,
            format_instruction(instruction, addr),
            encoding(instruction)
        );
    }

    out
}

fn collect_jump_targets(code: &[Instruction]) -> Vec<usize> {
    let mut targets = Vec::new();

    for instruction in code {
        if instruction.opcode() == Opcode::Jump {
            if let Ok(target) = usize::try_from(instruction.arg1()) {
                if target < code.len() && !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
    }

    targets
}

fn format_instruction(instruction: &Instruction, addr: usize) -> String {
    match instruction.opcode() {
        Opcode::Jump => {
            let target = instruction.arg1();
            let direction = if target as i64 <= addr as i64 { "↑" } else { "↓" };
            format!("{} {} (→ {:04})", instruction, direction, target)
        }
        _ => instruction.to_string(),
    }
}

/// Raw `opcode arg1 arg2` bytes as the interpreter sees them.
fn encoding(instruction: &Instruction) -> String {
    match instruction.arity() {
        0 => format!("{:#04x}", instruction.opcode().byte()),
        1 => format!("{:#04x} {}", instruction.opcode().byte(), instruction.arg1()),
        _ => format!(
            "{:#04x} {} {}",
            instruction.opcode().byte(),
            instruction.arg1(),
            instruction.arg2()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_marks_jump_targets() {
        let code = vec![
            Instruction::Binary(Opcode::Ldi, 1, 1),
            Instruction::Unary(Opcode::Jump, 3),
            Instruction::Binary(Opcode::Add, 1, 1),
            Instruction::Unary(Opcode::Stdout, 1),
        ];
        let listing = disassemble("main", &code);
        let rows: Vec<&str> = listing.lines().collect();

        assert_eq!(rows[1], " main");
        assert_eq!(rows[2], " 4 instructions");
        assert!(rows[4].starts_with("0000   LDI r1, 1"));
        assert!(rows[4].ends_with("; 0x01 1 1"));
        assert!(rows[5].contains("JUMP 3 ↓ (→ 0003)"));
        assert!(rows[6].starts_with("0002   ADD r1, r1"));
        assert!(rows[6].ends_with("; 0x17 1 1"));
        assert!(rows[7].contains('┌'));
        assert!(rows[8].starts_with("0003 ► STDOUT r1"));
        assert!(rows[8].ends_with("; 0x00 1"));
    }

    #[test]
    fn test_backward_and_wild_jumps() {
        let code = vec![
            Instruction::Nullary(Opcode::Printr),
            Instruction::Unary(Opcode::Jump, 0),
            Instruction::Unary(Opcode::Jump, 40),
        ];
        let listing = disassemble("loop", &code);
        assert!(listing.contains("0000 ► PRINTR"));
        assert!(listing.contains("JUMP 0 ↑ (→ 0000)"));
        assert!(listing.contains("JUMP 40 ↓ (→ 0040)"));
        assert!(listing.contains("; 0x21"));
    }
}
