//! The `ModuleRef` table (0x1A), ECMA-335 II.22.31.

mod raw;

pub use raw::*;
