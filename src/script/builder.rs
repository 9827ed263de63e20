//! Invocation script builder.
//!
//! [`ScriptBuilder`] appends AVM instructions to an owned byte buffer. Every
//! operation only appends; nothing already written is read back or rewritten.
//! Failing operations return immediately and leave previously appended bytes
//! in place.

use crate::crypto::digest::interop_id;
use crate::debug;
use crate::script::errors::ScriptError;
use crate::script::opcode::OpCode;
use crate::types::contract_parameter::ContractParameter;
use crate::types::uint::{UInt160, UInt256};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Largest payload pushed with the length itself as the opcode byte.
pub const MAX_INLINE_PUSH_LEN: usize = OpCode::PushBytes75 as usize;

/// Longest interop name accepted by an uncompressed `SYSCALL`.
pub const MAX_SYSCALL_NAME_LEN: usize = 252;

/// Append-only AVM script assembler.
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    buffer: Vec<u8>,
}

impl ScriptBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Creates an empty builder with room for `cap` bytes.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(cap),
        }
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the script written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the builder and returns the assembled script.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Appends a bare opcode.
    pub fn emit(&mut self, op: OpCode) {
        self.buffer.push(op.byte());
    }

    /// Appends an opcode followed by `operand` verbatim.
    ///
    /// The operand is not checked against the opcode's layout.
    pub fn emit_with_operand(&mut self, op: OpCode, operand: &[u8]) {
        self.buffer.push(op.byte());
        self.buffer.extend_from_slice(operand);
    }

    /// Appends a relative jump or call within the current script.
    ///
    /// Returns [`ScriptError::InvalidOpCode`] unless `op` is `JMP`, `JMPIF`,
    /// `JMPIFNOT` or `CALL`.
    pub fn emit_jump(&mut self, op: OpCode, offset: i16) -> Result<(), ScriptError> {
        if !op.is_jump() {
            return Err(ScriptError::InvalidOpCode(op));
        }
        self.emit_with_operand(op, &offset.to_le_bytes());
        Ok(())
    }

    /// Appends a call into another contract.
    pub fn emit_app_call(&mut self, script_hash: &UInt160, use_tail_call: bool) {
        let op = if use_tail_call {
            OpCode::TailCall
        } else {
            OpCode::AppCall
        };
        self.emit_with_operand(op, script_hash.as_slice());
    }

    /// Appends a push of `data` using the smallest length tier that fits.
    ///
    /// | length          | encoding                       |
    /// |-----------------|--------------------------------|
    /// | 0..=75          | `len` as opcode, data          |
    /// | 76..=255        | `PUSHDATA1`, u8 len, data      |
    /// | 256..=65535     | `PUSHDATA2`, u16 LE len, data  |
    /// | 65536..=u32 max | `PUSHDATA4`, u32 LE len, data  |
    pub fn emit_push_bytes(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let len = data.len();
        if len <= MAX_INLINE_PUSH_LEN {
            self.buffer.push(len as u8);
        } else if let Ok(len) = u8::try_from(len) {
            self.emit_with_operand(OpCode::PushData1, &[len]);
        } else if let Ok(len) = u16::try_from(len) {
            self.emit_with_operand(OpCode::PushData2, &len.to_le_bytes());
        } else if let Ok(len) = u32::try_from(len) {
            self.emit_with_operand(OpCode::PushData4, &len.to_le_bytes());
        } else {
            return Err(ScriptError::OperandTooLarge { len });
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Appends a push of the UTF-8 bytes of `data`.
    pub fn emit_push_string(&mut self, data: &str) -> Result<(), ScriptError> {
        self.emit_push_bytes(data.as_bytes())
    }

    pub fn emit_push_bool(&mut self, data: bool) {
        self.emit(if data { OpCode::PUSH_T } else { OpCode::PUSH_F });
    }

    pub fn emit_push_integer(&mut self, number: i64) -> Result<(), ScriptError> {
        self.emit_push_big_int(&BigInt::from(number))
    }

    /// Appends a push of an arbitrary precision integer.
    ///
    /// `-1` and `0..=16` have dedicated opcodes; every other value is pushed
    /// as its minimal big-endian two's-complement bytes.
    pub fn emit_push_big_int(&mut self, number: &BigInt) -> Result<(), ScriptError> {
        match number.to_i8() {
            Some(-1) => {
                self.emit(OpCode::PushM1);
                Ok(())
            }
            Some(0) => {
                self.emit(OpCode::Push0);
                Ok(())
            }
            Some(n @ 1..=16) => {
                self.buffer.push(OpCode::Push1.byte() + (n as u8 - 1));
                Ok(())
            }
            _ => self.emit_push_bytes(&number.to_signed_bytes_be()),
        }
    }

    /// Appends the push sequence for one contract parameter.
    ///
    /// Arrays push their elements last-to-first, then the element count,
    /// then `PACK`, so the VM rebuilds them in declaration order. The first
    /// failing element aborts the whole parameter.
    pub fn emit_push_parameter(&mut self, param: &ContractParameter) -> Result<(), ScriptError> {
        match param {
            ContractParameter::ByteArray(data)
            | ContractParameter::PublicKey(data)
            | ContractParameter::Signature(data) => self.emit_push_bytes(data),
            ContractParameter::Boolean(value) => {
                self.emit_push_bool(*value);
                Ok(())
            }
            ContractParameter::Integer(value) => self.emit_push_integer(*value),
            ContractParameter::Hash160(data) => {
                let hash = UInt160::from_slice(data)?;
                self.emit_push_bytes(hash.as_slice())
            }
            ContractParameter::Hash256(data) => {
                let hash = UInt256::from_slice(data)?;
                self.emit_push_bytes(hash.as_slice())
            }
            ContractParameter::String(value) => self.emit_push_string(value),
            ContractParameter::Array(items) => self.emit_pack(items),
            ContractParameter::Empty(_) => Err(ScriptError::EmptyOperand),
        }
    }

    /// Pushes `items` in reverse, their count, and `PACK`.
    fn emit_pack(&mut self, items: &[ContractParameter]) -> Result<(), ScriptError> {
        for item in items.iter().rev() {
            self.emit_push_parameter(item)?;
        }
        self.emit_push_big_int(&BigInt::from(items.len()))?;
        self.emit(OpCode::Pack);
        Ok(())
    }

    /// Appends a complete `APPCALL` invocation of `operation` on the contract
    /// identified by `script_hash`.
    ///
    /// `None` for `args` writes nothing. `Some(&[])` still writes the zero
    /// count, `PACK`, the operation name and the call.
    pub fn make_invocation_script(
        &mut self,
        script_hash: &[u8],
        operation: &str,
        args: Option<&[ContractParameter]>,
    ) -> Result<(), ScriptError> {
        self.make_invocation_script_with(script_hash, operation, args, false)
    }

    /// Like [`make_invocation_script`](Self::make_invocation_script), choosing
    /// between `APPCALL` and `TAILCALL`.
    ///
    /// The script hash is validated before anything is written.
    pub fn make_invocation_script_with(
        &mut self,
        script_hash: &[u8],
        operation: &str,
        args: Option<&[ContractParameter]>,
        use_tail_call: bool,
    ) -> Result<(), ScriptError> {
        let Some(args) = args else {
            return Ok(());
        };
        let script_hash = UInt160::from_slice(script_hash)?;
        let start = self.len();

        self.emit_pack(args)?;
        self.emit_push_string(operation)?;
        self.emit_app_call(&script_hash, use_tail_call);

        debug!(
            "assembled invocation: contract={} operation={} args={} bytes={}",
            script_hash,
            operation,
            args.len(),
            self.len() - start
        );
        Ok(())
    }

    /// Appends a `SYSCALL` to the interop service `api`.
    ///
    /// Uncompressed calls carry the name itself; compressed calls carry the
    /// first 4 bytes of its SHA-256 digest.
    pub fn emit_sys_call(&mut self, api: &str, compress: bool) -> Result<(), ScriptError> {
        if api.is_empty() {
            return Err(ScriptError::EmptyApiName);
        }

        let id;
        let name: &[u8] = if compress {
            id = interop_id(api);
            &id
        } else {
            if api.len() > MAX_SYSCALL_NAME_LEN {
                return Err(ScriptError::NameTooLong { len: api.len() });
            }
            api.as_bytes()
        };

        let mut operand = Vec::with_capacity(name.len() + 1);
        operand.push(name.len() as u8);
        operand.extend_from_slice(name);
        self.emit_with_operand(OpCode::SysCall, &operand);
        Ok(())
    }
}
