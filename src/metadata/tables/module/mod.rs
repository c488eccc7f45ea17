//! The `Module` table (0x00), ECMA-335 II.22.30.
//!
//! Exactly one row describing the current module. In an EnC delta the row carries the
//! generation counter and the `EncId`/`EncBaseId` GUIDs that chain deltas to their base.

mod raw;

pub use raw::*;
