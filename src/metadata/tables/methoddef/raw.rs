//! # `MethodDef` Raw Implementation
//!
//! Table 0x06. Method definitions. The RVA points into the IL of the image, or into the delta IL
//! for rows of an EnC delta.
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `MethodDef` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a 4-byte constant
    pub rva: u32,
    /// a 2-byte bitmask of type `MethodImplAttributes`, §II.23.1.10
    pub impl_flags: u16,
    /// a 2-byte bitmask of type `MethodAttributes`, §II.23.1.10
    pub flags: u16,
    /// an index into the String heap
    pub name: u32,
    /// an index into the Blob heap
    pub signature: u32,
    /// an index into the Param table
    pub param_list: u32,
}

impl RowRecord for MethodDefRaw {
    const TABLE: TableId = TableId::MethodDef;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(MethodDefRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            rva: row.value(0)?,
            impl_flags: row.value_u16(1)?,
            flags: row.value_u16(2)?,
            name: row.value(3)?,
            signature: row.value(4)?,
            param_list: row.value(5)?,
        })
    }
}
