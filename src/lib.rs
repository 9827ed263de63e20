//! NEO script library.
//!
//! Assembles contract invocation scripts for the NEO 2.x stack virtual machine:
//! typed contract parameters, the opcode table, fixed-width identifiers and a
//! reader for the produced byte stream.

pub mod crypto;
pub mod script;
pub mod types;
pub mod utils;
