//! The `MethodDef` table (0x06), ECMA-335 II.22.26.
//!
//! `rva` locates the method body. In a full image it is a PE relative virtual address; in an
//! EnC delta it is an offset into the delta IL stream.

mod raw;

pub use raw::*;
