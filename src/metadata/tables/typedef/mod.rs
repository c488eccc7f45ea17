//! The `TypeDef` table (0x02), ECMA-335 II.22.37.
//!
//! `field_list` and `method_list` start a run of rows in the `Field` and `MethodDef` tables
//! that ends where the next type's run begins.

mod raw;

pub use raw::*;

#[allow(non_snake_case)]
/// Selected `TypeAttributes`, ECMA-335 II.23.1.15
pub mod TypeAttributes {
    /// Use this mask to retrieve visibility information
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Class is public scope
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Class is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Class cannot be extended
    pub const SEALED: u32 = 0x0000_0100;
}
