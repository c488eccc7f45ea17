//! # `MemberRef` Raw Implementation
//!
//! Table 0x0A. References to fields and methods of other types.
use crate::{
    metadata::{
        tables::{expect_table, CodedIndex, CodedIndexType, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `MemberRef` table row, a reference to a field or method of another type
#[derive(Clone, Debug, PartialEq)]
pub struct MemberRefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// an index into the `MethodDef`, `ModuleRef`, `TypeDef`, `TypeRef`, or `TypeSpec` tables; a `MemberRefParent` coded index
    pub class: CodedIndex,
    /// an index into the String heap
    pub name: u32,
    /// an index into the Blob heap
    pub signature: u32,
}

impl RowRecord for MemberRefRaw {
    const TABLE: TableId = TableId::MemberRef;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(MemberRefRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            class: CodedIndexType::MemberRefParent.decode(row.value(0)?)?,
            name: row.value(1)?,
            signature: row.value(2)?,
        })
    }
}
