//! # `TypeDef` Raw Implementation
//!
//! Table 0x02. Type definitions with their field and method list starts.
use crate::{
    metadata::{
        tables::{expect_table, CodedIndex, CodedIndexType, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `TypeDef` table row
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a 4-byte bitmask of type `TypeAttributes`, §II.23.1.15
    pub flags: u32,
    /// an index into the String heap
    pub type_name: u32,
    /// an index into the String heap
    pub type_namespace: u32,
    /// an index into the `TypeDef`, `TypeRef`, or `TypeSpec` table; a `TypeDefOrRef` coded index
    pub extends: CodedIndex,
    /// an index into the Field table
    pub field_list: u32,
    /// an index into the `MethodDef` table
    pub method_list: u32,
}

impl RowRecord for TypeDefRaw {
    const TABLE: TableId = TableId::TypeDef;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(TypeDefRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            flags: row.value(0)?,
            type_name: row.value(1)?,
            type_namespace: row.value(2)?,
            extends: CodedIndexType::TypeDefOrRef.decode(row.value(3)?)?,
            field_list: row.value(4)?,
            method_list: row.value(5)?,
        })
    }
}
