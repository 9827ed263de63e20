//! AVM script assembly.
//!
//! Builds the byte scripts the NEO 2.x stack virtual machine executes when a
//! contract is invoked.
//!
//! # Script format
//!
//! A script is a flat sequence of `[opcode]{operand}` instructions with no
//! delimiters. Arguments are pushed onto the evaluation stack in reverse,
//! packed into an array, followed by the operation name and an `APPCALL`.
//!
//! # Modules
//!
//! - [`builder`]: the append-only [`ScriptBuilder`](builder::ScriptBuilder)
//! - [`errors`]: [`ScriptError`](errors::ScriptError)
//! - [`opcode`]: opcode table and operand layouts
//! - [`reader`]: instruction decoding and disassembly

pub mod builder;
pub mod errors;
pub mod opcode;
pub mod reader;
