//! The `TypeSpec` table (0x1B), ECMA-335 II.22.39.

mod raw;

pub use raw::*;
