//! Metadata tables, ECMA-335 II.22.
//!
//! Every table is read into generic [`RawRow`]s through its column schema. The tables this crate
//! renders in full also have a typed record (`ModuleRaw`, `AssemblyRaw`, ...) that is built from a
//! [`RawRow`] through [`RowRecord`]. [`TableRow`] ties both together: one variant per typed table
//! and an [`TableRow::Opaque`] variant for the rest.

mod types;
pub use types::*;

mod row;
pub use row::TableRow;

mod assembly;
pub use assembly::*;
mod assemblyref;
pub use assemblyref::*;
mod customattribute;
pub use customattribute::*;
mod enclog;
pub use enclog::*;
mod encmap;
pub use encmap::*;
mod field;
pub use field::*;
mod memberref;
pub use memberref::*;
mod methoddef;
pub use methoddef::*;
mod module;
pub use module::*;
mod moduleref;
pub use moduleref::*;
mod param;
pub use param::*;
mod standalonesig;
pub use standalonesig::*;
mod typedef;
pub use typedef::*;
mod typeref;
pub use typeref::*;
mod typespec;
pub use typespec::*;
