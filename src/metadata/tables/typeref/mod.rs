//! The `TypeRef` table (0x01), ECMA-335 II.22.38.

mod raw;

pub use raw::*;
