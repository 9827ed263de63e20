use crate::script::opcode::OpCode;
use thiserror::Error;

/// Errors that can occur while building or reading a script.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A push was requested for a parameter whose value was never supplied.
    #[error("operand data is empty")]
    EmptyOperand,
    /// Jump requested with an opcode outside the jump family.
    #[error("invalid jump opcode {0}")]
    InvalidOpCode(OpCode),
    /// Contract or hash identifier has the wrong width.
    #[error("invalid identifier length: expected {expected} bytes, got {actual}")]
    InvalidIdentifierLength { expected: usize, actual: usize },
    /// Uncompressed syscall name exceeds the single-byte length prefix budget.
    #[error("syscall name is too long: {len} bytes")]
    NameTooLong { len: usize },
    /// Syscall name is empty.
    #[error("syscall name is empty")]
    EmptyApiName,
    /// Push payload does not fit in a 4-byte length field.
    #[error("operand of {len} bytes exceeds the PUSHDATA4 limit")]
    OperandTooLarge { len: usize },
    /// Byte in the script does not map to an opcode.
    #[error("unknown opcode 0x{opcode:02x} at offset {offset}")]
    UnknownOpCode { opcode: u8, offset: usize },
    /// Script ended in the middle of an instruction.
    #[error("unexpected end of script at offset {offset}")]
    UnexpectedEndOfScript { offset: usize },
}
