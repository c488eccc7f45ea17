//! The `Field` table (0x04), ECMA-335 II.22.15.

mod raw;

pub use raw::*;
