//! Instruction-level reader for assembled scripts.
//!
//! Splits a script into `[opcode]{operand}` instructions using each opcode's
//! [`OperandLayout`]. Nothing is executed; the reader only recovers operands.

use crate::script::errors::ScriptError;
use crate::script::opcode::{OpCode, OperandLayout};
use std::fmt::Write;

/// One decoded instruction borrowed from the script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// Byte offset of the opcode within the script.
    pub offset: usize,
    pub opcode: OpCode,
    /// Everything after the opcode byte, including any length prefix.
    pub operand: &'a [u8],
}

impl<'a> Instruction<'a> {
    /// Returns the payload of a data push, without its length prefix.
    ///
    /// `PUSH0` yields an empty payload. Constant pushes such as `PUSH1` and
    /// non-push opcodes yield `None`.
    pub fn push_data(&self) -> Option<&'a [u8]> {
        match self.opcode.operand_layout() {
            OperandLayout::Inline(_) => Some(self.operand),
            OperandLayout::Prefixed(width) => self.operand.get(width..),
            _ if self.opcode == OpCode::Push0 => Some(&[]),
            _ => None,
        }
    }

    /// Returns the signed offset of a jump instruction.
    pub fn jump_offset(&self) -> Option<i16> {
        match self.opcode.operand_layout() {
            OperandLayout::Jump => self.operand.try_into().ok().map(i16::from_le_bytes),
            _ => None,
        }
    }

    /// Returns the encoded size of the instruction.
    pub fn size(&self) -> usize {
        1 + self.operand.len()
    }
}

/// Iterator over the instructions of a script.
///
/// Yields an error once and then stops if the script is malformed.
pub struct ScriptReader<'a> {
    script: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> ScriptReader<'a> {
    pub fn new(script: &'a [u8]) -> Self {
        Self {
            script,
            pos: 0,
            failed: false,
        }
    }

    /// Returns the offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, n: usize, offset: usize) -> Result<&'a [u8], ScriptError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.script.len())
            .ok_or(ScriptError::UnexpectedEndOfScript { offset })?;
        let bytes = &self.script[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_instruction(&mut self) -> Result<Instruction<'a>, ScriptError> {
        let offset = self.pos;
        let opcode = OpCode::try_from(self.script[offset])
            .map_err(|_| ScriptError::UnknownOpCode {
                opcode: self.script[offset],
                offset,
            })?;
        self.pos += 1;
        let start = self.pos;

        match opcode.operand_layout() {
            OperandLayout::Bare => {}
            OperandLayout::Inline(n) => {
                self.take(n, offset)?;
            }
            OperandLayout::Prefixed(width) => {
                let prefix = self.take(width, offset)?;
                let mut len_bytes = [0u8; 8];
                len_bytes[..width].copy_from_slice(prefix);
                let len = u64::from_le_bytes(len_bytes) as usize;
                self.take(len, offset)?;
            }
            OperandLayout::Jump => {
                self.take(2, offset)?;
            }
            OperandLayout::ScriptHash => {
                self.take(20, offset)?;
            }
            OperandLayout::SysCall => {
                let len = self.take(1, offset)?[0] as usize;
                self.take(len, offset)?;
            }
        }

        Ok(Instruction {
            offset,
            opcode,
            operand: &self.script[start..self.pos],
        })
    }
}

impl<'a> Iterator for ScriptReader<'a> {
    type Item = Result<Instruction<'a>, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.script.len() {
            return None;
        }
        let result = self.read_instruction();
        self.failed = result.is_err();
        Some(result)
    }
}

/// Renders `script` as one `offset: MNEMONIC operand` line per instruction.
pub fn disassemble(script: &[u8]) -> Result<String, ScriptError> {
    let mut out = String::new();
    for instr in ScriptReader::new(script) {
        let instr = instr?;
        let _ = write!(out, "{:04x}: {}", instr.offset, instr.opcode);
        if let Some(offset) = instr.jump_offset() {
            let _ = write!(out, " {offset}");
        } else if !instr.operand.is_empty() {
            let _ = write!(out, " {}", hex::encode(instr.operand));
        }
        out.push('\n');
    }
    Ok(out)
}
