//! AVM opcode table.
//!
//! The [`for_each_opcode!`](crate::for_each_opcode) macro holds the canonical
//! opcode definitions and hands them to a callback macro for code generation,
//! so the enum, the byte decoding and the operand layouts cannot drift apart.
//!
//! This module generates:
//! - The [`OpCode`] enum with byte values
//! - `TryFrom<u8>` for decoding opcodes
//! - [`OpCode::mnemonic`] and [`OpCode::operand_layout`]
//!
//! # Operand layouts
//!
//! - `PUSHBYTES1..75`: the opcode byte is the payload length
//! - `PUSHDATA1/2/4`: 1, 2 or 4 byte little-endian length, then the payload
//! - `JMP`, `JMPIF`, `JMPIFNOT`, `CALL`: 2 byte little-endian signed offset
//! - `APPCALL`, `TAILCALL`: 20 byte script hash
//! - `SYSCALL`: 1 byte name length, then the name

use crate::script::errors::ScriptError;
use std::fmt;

/// Shape of the operand that follows an opcode byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OperandLayout {
    /// No operand.
    Bare,
    /// Exactly `n` payload bytes.
    Inline(usize),
    /// Little-endian length field of `n` bytes, then that many payload bytes.
    Prefixed(usize),
    /// Signed 16-bit little-endian jump offset.
    Jump,
    /// 20-byte script hash.
    ScriptHash,
    /// One length byte, then the interop name or its hash.
    SysCall,
}

/// Invokes a callback macro with the complete opcode definition list.
#[macro_export]
macro_rules! for_each_opcode {
    ($callback:ident) => {
        $callback! {
            // =========================
            // Constants
            // =========================
            /// PUSH0 ; push an empty byte array (also PUSHF)
            Push0 = 0x00, "PUSH0" => Bare,
            PushBytes1 = 0x01, "PUSHBYTES1" => Inline(1),
            PushBytes2 = 0x02, "PUSHBYTES2" => Inline(2),
            PushBytes3 = 0x03, "PUSHBYTES3" => Inline(3),
            PushBytes4 = 0x04, "PUSHBYTES4" => Inline(4),
            PushBytes5 = 0x05, "PUSHBYTES5" => Inline(5),
            PushBytes6 = 0x06, "PUSHBYTES6" => Inline(6),
            PushBytes7 = 0x07, "PUSHBYTES7" => Inline(7),
            PushBytes8 = 0x08, "PUSHBYTES8" => Inline(8),
            PushBytes9 = 0x09, "PUSHBYTES9" => Inline(9),
            PushBytes10 = 0x0A, "PUSHBYTES10" => Inline(10),
            PushBytes11 = 0x0B, "PUSHBYTES11" => Inline(11),
            PushBytes12 = 0x0C, "PUSHBYTES12" => Inline(12),
            PushBytes13 = 0x0D, "PUSHBYTES13" => Inline(13),
            PushBytes14 = 0x0E, "PUSHBYTES14" => Inline(14),
            PushBytes15 = 0x0F, "PUSHBYTES15" => Inline(15),
            PushBytes16 = 0x10, "PUSHBYTES16" => Inline(16),
            PushBytes17 = 0x11, "PUSHBYTES17" => Inline(17),
            PushBytes18 = 0x12, "PUSHBYTES18" => Inline(18),
            PushBytes19 = 0x13, "PUSHBYTES19" => Inline(19),
            PushBytes20 = 0x14, "PUSHBYTES20" => Inline(20),
            PushBytes21 = 0x15, "PUSHBYTES21" => Inline(21),
            PushBytes22 = 0x16, "PUSHBYTES22" => Inline(22),
            PushBytes23 = 0x17, "PUSHBYTES23" => Inline(23),
            PushBytes24 = 0x18, "PUSHBYTES24" => Inline(24),
            PushBytes25 = 0x19, "PUSHBYTES25" => Inline(25),
            PushBytes26 = 0x1A, "PUSHBYTES26" => Inline(26),
            PushBytes27 = 0x1B, "PUSHBYTES27" => Inline(27),
            PushBytes28 = 0x1C, "PUSHBYTES28" => Inline(28),
            PushBytes29 = 0x1D, "PUSHBYTES29" => Inline(29),
            PushBytes30 = 0x1E, "PUSHBYTES30" => Inline(30),
            PushBytes31 = 0x1F, "PUSHBYTES31" => Inline(31),
            PushBytes32 = 0x20, "PUSHBYTES32" => Inline(32),
            PushBytes33 = 0x21, "PUSHBYTES33" => Inline(33),
            PushBytes34 = 0x22, "PUSHBYTES34" => Inline(34),
            PushBytes35 = 0x23, "PUSHBYTES35" => Inline(35),
            PushBytes36 = 0x24, "PUSHBYTES36" => Inline(36),
            PushBytes37 = 0x25, "PUSHBYTES37" => Inline(37),
            PushBytes38 = 0x26, "PUSHBYTES38" => Inline(38),
            PushBytes39 = 0x27, "PUSHBYTES39" => Inline(39),
            PushBytes40 = 0x28, "PUSHBYTES40" => Inline(40),
            PushBytes41 = 0x29, "PUSHBYTES41" => Inline(41),
            PushBytes42 = 0x2A, "PUSHBYTES42" => Inline(42),
            PushBytes43 = 0x2B, "PUSHBYTES43" => Inline(43),
            PushBytes44 = 0x2C, "PUSHBYTES44" => Inline(44),
            PushBytes45 = 0x2D, "PUSHBYTES45" => Inline(45),
            PushBytes46 = 0x2E, "PUSHBYTES46" => Inline(46),
            PushBytes47 = 0x2F, "PUSHBYTES47" => Inline(47),
            PushBytes48 = 0x30, "PUSHBYTES48" => Inline(48),
            PushBytes49 = 0x31, "PUSHBYTES49" => Inline(49),
            PushBytes50 = 0x32, "PUSHBYTES50" => Inline(50),
            PushBytes51 = 0x33, "PUSHBYTES51" => Inline(51),
            PushBytes52 = 0x34, "PUSHBYTES52" => Inline(52),
            PushBytes53 = 0x35, "PUSHBYTES53" => Inline(53),
            PushBytes54 = 0x36, "PUSHBYTES54" => Inline(54),
            PushBytes55 = 0x37, "PUSHBYTES55" => Inline(55),
            PushBytes56 = 0x38, "PUSHBYTES56" => Inline(56),
            PushBytes57 = 0x39, "PUSHBYTES57" => Inline(57),
            PushBytes58 = 0x3A, "PUSHBYTES58" => Inline(58),
            PushBytes59 = 0x3B, "PUSHBYTES59" => Inline(59),
            PushBytes60 = 0x3C, "PUSHBYTES60" => Inline(60),
            PushBytes61 = 0x3D, "PUSHBYTES61" => Inline(61),
            PushBytes62 = 0x3E, "PUSHBYTES62" => Inline(62),
            PushBytes63 = 0x3F, "PUSHBYTES63" => Inline(63),
            PushBytes64 = 0x40, "PUSHBYTES64" => Inline(64),
            PushBytes65 = 0x41, "PUSHBYTES65" => Inline(65),
            PushBytes66 = 0x42, "PUSHBYTES66" => Inline(66),
            PushBytes67 = 0x43, "PUSHBYTES67" => Inline(67),
            PushBytes68 = 0x44, "PUSHBYTES68" => Inline(68),
            PushBytes69 = 0x45, "PUSHBYTES69" => Inline(69),
            PushBytes70 = 0x46, "PUSHBYTES70" => Inline(70),
            PushBytes71 = 0x47, "PUSHBYTES71" => Inline(71),
            PushBytes72 = 0x48, "PUSHBYTES72" => Inline(72),
            PushBytes73 = 0x49, "PUSHBYTES73" => Inline(73),
            PushBytes74 = 0x4A, "PUSHBYTES74" => Inline(74),
            PushBytes75 = 0x4B, "PUSHBYTES75" => Inline(75),
            /// PUSHDATA1 len:u8 data ; push up to 255 bytes
            PushData1 = 0x4C, "PUSHDATA1" => Prefixed(1),
            /// PUSHDATA2 len:u16 data ; push up to 65535 bytes
            PushData2 = 0x4D, "PUSHDATA2" => Prefixed(2),
            /// PUSHDATA4 len:u32 data ; push up to 4 GiB
            PushData4 = 0x4E, "PUSHDATA4" => Prefixed(4),
            /// PUSHM1 ; push the number -1
            PushM1 = 0x4F, "PUSHM1" => Bare,
            /// PUSH1 ; push the number 1 (also PUSHT)
            Push1 = 0x51, "PUSH1" => Bare,
            Push2 = 0x52, "PUSH2" => Bare,
            Push3 = 0x53, "PUSH3" => Bare,
            Push4 = 0x54, "PUSH4" => Bare,
            Push5 = 0x55, "PUSH5" => Bare,
            Push6 = 0x56, "PUSH6" => Bare,
            Push7 = 0x57, "PUSH7" => Bare,
            Push8 = 0x58, "PUSH8" => Bare,
            Push9 = 0x59, "PUSH9" => Bare,
            Push10 = 0x5A, "PUSH10" => Bare,
            Push11 = 0x5B, "PUSH11" => Bare,
            Push12 = 0x5C, "PUSH12" => Bare,
            Push13 = 0x5D, "PUSH13" => Bare,
            Push14 = 0x5E, "PUSH14" => Bare,
            Push15 = 0x5F, "PUSH15" => Bare,
            Push16 = 0x60, "PUSH16" => Bare,
            // =========================
            // Flow control
            // =========================
            /// NOP ; does nothing
            Nop = 0x61, "NOP" => Bare,
            /// JMP offset ; unconditional relative jump
            Jmp = 0x62, "JMP" => Jump,
            /// JMPIF offset ; jump if the top item is true
            JmpIf = 0x63, "JMPIF" => Jump,
            /// JMPIFNOT offset ; jump if the top item is false
            JmpIfNot = 0x64, "JMPIFNOT" => Jump,
            /// CALL offset ; call a function inside the current script
            Call = 0x65, "CALL" => Jump,
            /// RET ; return from the current context
            Ret = 0x66, "RET" => Bare,
            /// APPCALL hash ; call another contract
            AppCall = 0x67, "APPCALL" => ScriptHash,
            /// SYSCALL name ; call an interop service
            SysCall = 0x68, "SYSCALL" => SysCall,
            /// TAILCALL hash ; call another contract, replacing the current context
            TailCall = 0x69, "TAILCALL" => ScriptHash,
            // =========================
            // Stack
            // =========================
            DupFromAltStack = 0x6A, "DUPFROMALTSTACK" => Bare,
            ToAltStack = 0x6B, "TOALTSTACK" => Bare,
            FromAltStack = 0x6C, "FROMALTSTACK" => Bare,
            XDrop = 0x6D, "XDROP" => Bare,
            XSwap = 0x72, "XSWAP" => Bare,
            XTuck = 0x73, "XTUCK" => Bare,
            Depth = 0x74, "DEPTH" => Bare,
            Drop = 0x75, "DROP" => Bare,
            Dup = 0x76, "DUP" => Bare,
            Nip = 0x77, "NIP" => Bare,
            Over = 0x78, "OVER" => Bare,
            Pick = 0x79, "PICK" => Bare,
            Roll = 0x7A, "ROLL" => Bare,
            Rot = 0x7B, "ROT" => Bare,
            Swap = 0x7C, "SWAP" => Bare,
            Tuck = 0x7D, "TUCK" => Bare,
            // =========================
            // Splice
            // =========================
            Cat = 0x7E, "CAT" => Bare,
            SubStr = 0x7F, "SUBSTR" => Bare,
            Left = 0x80, "LEFT" => Bare,
            Right = 0x81, "RIGHT" => Bare,
            Size = 0x82, "SIZE" => Bare,
            // =========================
            // Bitwise logic
            // =========================
            Invert = 0x83, "INVERT" => Bare,
            And = 0x84, "AND" => Bare,
            Or = 0x85, "OR" => Bare,
            Xor = 0x86, "XOR" => Bare,
            Equal = 0x87, "EQUAL" => Bare,
            // =========================
            // Arithmetic
            // =========================
            Inc = 0x8B, "INC" => Bare,
            Dec = 0x8C, "DEC" => Bare,
            Sign = 0x8D, "SIGN" => Bare,
            Negate = 0x8F, "NEGATE" => Bare,
            Abs = 0x90, "ABS" => Bare,
            Not = 0x91, "NOT" => Bare,
            Nz = 0x92, "NZ" => Bare,
            Add = 0x93, "ADD" => Bare,
            Sub = 0x94, "SUB" => Bare,
            Mul = 0x95, "MUL" => Bare,
            Div = 0x96, "DIV" => Bare,
            Mod = 0x97, "MOD" => Bare,
            Shl = 0x98, "SHL" => Bare,
            Shr = 0x99, "SHR" => Bare,
            BoolAnd = 0x9A, "BOOLAND" => Bare,
            BoolOr = 0x9B, "BOOLOR" => Bare,
            NumEqual = 0x9C, "NUMEQUAL" => Bare,
            NumNotEqual = 0x9E, "NUMNOTEQUAL" => Bare,
            Lt = 0x9F, "LT" => Bare,
            Gt = 0xA0, "GT" => Bare,
            Lte = 0xA1, "LTE" => Bare,
            Gte = 0xA2, "GTE" => Bare,
            Min = 0xA3, "MIN" => Bare,
            Max = 0xA4, "MAX" => Bare,
            Within = 0xA5, "WITHIN" => Bare,
            // =========================
            // Crypto
            // =========================
            Sha1 = 0xA7, "SHA1" => Bare,
            Sha256 = 0xA8, "SHA256" => Bare,
            Hash160 = 0xA9, "HASH160" => Bare,
            Hash256 = 0xAA, "HASH256" => Bare,
            CheckSig = 0xAC, "CHECKSIG" => Bare,
            Verify = 0xAD, "VERIFY" => Bare,
            CheckMultiSig = 0xAE, "CHECKMULTISIG" => Bare,
            // =========================
            // Arrays
            // =========================
            ArraySize = 0xC0, "ARRAYSIZE" => Bare,
            /// PACK ; pop n, then pop n items into a new array
            Pack = 0xC1, "PACK" => Bare,
            Unpack = 0xC2, "UNPACK" => Bare,
            PickItem = 0xC3, "PICKITEM" => Bare,
            SetItem = 0xC4, "SETITEM" => Bare,
            NewArray = 0xC5, "NEWARRAY" => Bare,
            NewStruct = 0xC6, "NEWSTRUCT" => Bare,
            NewMap = 0xC7, "NEWMAP" => Bare,
            Append = 0xC8, "APPEND" => Bare,
            Reverse = 0xC9, "REVERSE" => Bare,
            Remove = 0xCA, "REMOVE" => Bare,
            HasKey = 0xCB, "HASKEY" => Bare,
            Keys = 0xCC, "KEYS" => Bare,
            Values = 0xCD, "VALUES" => Bare,
            // =========================
            // Exceptions
            // =========================
            Throw = 0xF0, "THROW" => Bare,
            ThrowIfNot = 0xF1, "THROWIFNOT" => Bare,
        }
    };
}

#[macro_export]
macro_rules! define_opcodes {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $byte:literal, $mnemonic:literal => $layout:ident $( ($n:literal) )?
        ),* $(,)?
    ) => {
        /// A single AVM opcode byte.
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum OpCode {
            $(
                $(#[$doc])*
                $name = $byte,
            )*
        }

        impl TryFrom<u8> for OpCode {
            type Error = ScriptError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $byte => Ok(OpCode::$name), )*
                    _ => Err(ScriptError::UnknownOpCode {
                        opcode: value,
                        offset: 0,
                    }),
                }
            }
        }

        impl OpCode {
            /// Returns the assembly mnemonic for this opcode.
            pub const fn mnemonic(&self) -> &'static str {
                match self {
                    $( OpCode::$name => $mnemonic, )*
                }
            }

            /// Returns the layout of the operand following this opcode.
            pub const fn operand_layout(&self) -> OperandLayout {
                match self {
                    $( OpCode::$name => OperandLayout::$layout $( ($n) )?, )*
                }
            }
        }
    };
}

for_each_opcode!(define_opcodes);

impl OpCode {
    /// Pushes boolean `true`; shares its byte with [`OpCode::Push1`].
    pub const PUSH_T: OpCode = OpCode::Push1;
    /// Pushes boolean `false`; shares its byte with [`OpCode::Push0`].
    pub const PUSH_F: OpCode = OpCode::Push0;

    /// Returns the raw byte value.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Returns true for the opcodes accepted by a relative jump.
    pub const fn is_jump(self) -> bool {
        matches!(
            self,
            OpCode::Jmp | OpCode::JmpIf | OpCode::JmpIfNot | OpCode::Call
        )
    }

    /// Returns true for every opcode that pushes data or a constant.
    pub const fn is_push(self) -> bool {
        self as u8 <= OpCode::Push16 as u8
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_try_from_invalid() {
        for byte in [0x50u8, 0x6E, 0x8A, 0xFF] {
            assert!(matches!(
                OpCode::try_from(byte),
                Err(ScriptError::UnknownOpCode { opcode, .. }) if opcode == byte
            ));
        }
    }

    #[test]
    fn opcode_round_trips_its_byte() {
        for byte in 0..=u8::MAX {
            if let Ok(op) = OpCode::try_from(byte) {
                assert_eq!(op.byte(), byte);
            }
        }
    }

    #[test]
    fn push_bytes_range_is_contiguous() {
        for n in 1..=75u8 {
            let op = OpCode::try_from(n).unwrap();
            assert_eq!(op.operand_layout(), OperandLayout::Inline(n as usize));
        }
        assert_eq!(OpCode::PushBytes75.byte(), 0x4B);
        assert_eq!(OpCode::PushBytes75.mnemonic(), "PUSHBYTES75");
    }

    #[test]
    fn small_integer_range() {
        assert_eq!(OpCode::Push1.byte(), 0x51);
        assert_eq!(OpCode::Push16.byte(), 0x60);
        assert_eq!(OpCode::Push16.byte() - OpCode::Push1.byte(), 15);
        assert_eq!(OpCode::PUSH_T, OpCode::Push1);
        assert_eq!(OpCode::PUSH_F.byte(), 0x00);
    }

    #[test]
    fn jump_family() {
        assert!(OpCode::Jmp.is_jump());
        assert!(OpCode::Call.is_jump());
        assert!(!OpCode::Ret.is_jump());
        assert!(!OpCode::AppCall.is_jump());
        assert_eq!(OpCode::JmpIfNot.operand_layout(), OperandLayout::Jump);
    }

    #[test]
    fn call_family_layouts() {
        assert_eq!(OpCode::AppCall.operand_layout(), OperandLayout::ScriptHash);
        assert_eq!(OpCode::TailCall.operand_layout(), OperandLayout::ScriptHash);
        assert_eq!(OpCode::SysCall.operand_layout(), OperandLayout::SysCall);
        assert_eq!(OpCode::PushData2.operand_layout(), OperandLayout::Prefixed(2));
        assert_eq!(OpCode::Pack.operand_layout(), OperandLayout::Bare);
    }

    #[test]
    fn display_uses_mnemonic() {
        assert_eq!(OpCode::Pack.to_string(), "PACK");
        assert_eq!(OpCode::PushM1.to_string(), "PUSHM1");
    }
}
