//! The `EncMap` table (0x1F).
//!
//! Lists, sorted by token, the rows an EnC delta carries. The n-th row of a table in the delta
//! corresponds to the n-th `EncMap` token of that table.

mod raw;

pub use raw::*;
