//! The `StandAloneSig` table (0x11), ECMA-335 II.22.36.

mod raw;

pub use raw::*;
