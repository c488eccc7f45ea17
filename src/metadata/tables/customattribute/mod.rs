//! The `CustomAttribute` table (0x0C), ECMA-335 II.22.10.

mod raw;

pub use raw::*;
