//! Cryptographic helpers.

pub mod digest;
