//! Core value types for script assembly.
//!
//! - `ContractParameter`: typed invocation arguments
//! - `UInt160` / `UInt256`: fixed-width identifiers with length validation

pub mod contract_parameter;
pub mod uint;
