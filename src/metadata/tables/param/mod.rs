//! The `Param` table (0x08), ECMA-335 II.22.33.

mod raw;

pub use raw::*;
