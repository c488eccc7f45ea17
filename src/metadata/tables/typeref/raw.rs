//! # `TypeRef` Raw Implementation
//!
//! Table 0x01. References to types defined in other scopes.
use crate::{
    metadata::{
        tables::{expect_table, CodedIndex, CodedIndexType, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `TypeRef` table row, a reference to a type defined elsewhere
#[derive(Clone, Debug, PartialEq)]
pub struct TypeRefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// an index into a Module, ModuleRef, AssemblyRef or TypeRef table; a `ResolutionScope` coded index
    pub resolution_scope: CodedIndex,
    /// an index into the String heap
    pub type_name: u32,
    /// an index into the String heap
    pub type_namespace: u32,
}

impl RowRecord for TypeRefRaw {
    const TABLE: TableId = TableId::TypeRef;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(TypeRefRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            resolution_scope: CodedIndexType::ResolutionScope.decode(row.value(0)?)?,
            type_name: row.value(1)?,
            type_namespace: row.value(2)?,
        })
    }
}
