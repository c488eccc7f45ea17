//! The `Assembly` table (0x20), ECMA-335 II.22.2.
//!
//! Holds at most one row: the identity of the assembly this module is the manifest of.

use bitflags::bitflags;

mod raw;

pub use raw::*;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    /// `AssemblyFlags`, ECMA-335 II.23.1.2
    pub struct AssemblyFlags : u32 {
        /// The assembly reference holds the full (unhashed) public key
        const PUBLIC_KEY = 0x0001;
        /// The implementation of this assembly used at runtime is not expected to match the version seen at compile time
        const RETARGETABLE = 0x0100;
        /// Reserved
        const DISABLE_JIT_COMPILE_OPTIMIZER = 0x4000;
        /// Reserved
        const ENABLE_JIT_COMPILE_TRACKING = 0x8000;
    }
}

#[allow(non_snake_case)]
/// `AssemblyHashAlgorithm`, ECMA-335 II.23.1.1
pub mod AssemblyHashAlgorithm {
    /// No hash
    pub const NONE: u32 = 0x0000;
    /// MD5
    pub const MD5: u32 = 0x8003;
    /// SHA1
    pub const SHA1: u32 = 0x8004;
}
