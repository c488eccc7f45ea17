//! # `Field` Raw Implementation
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `Field` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a 2-byte bitmask of type `FieldAttributes`, §II.23.1.5
    pub flags: u16,
    /// an index into the String heap
    pub name: u32,
    /// an index into the Blob heap
    pub signature: u32,
}

impl RowRecord for FieldRaw {
    const TABLE: TableId = TableId::Field;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(FieldRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            flags: row.value_u16(0)?,
            name: row.value(1)?,
            signature: row.value(2)?,
        })
    }
}
