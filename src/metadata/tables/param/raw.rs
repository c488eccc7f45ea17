//! # `Param` Raw Implementation
//!
//! Table 0x08. Parameter rows, ordered by sequence within their method.
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `Param` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a 2-byte bitmask of type `ParamAttributes`, §II.23.1.13
    pub flags: u16,
    /// a 2-byte constant, 0 is the return value
    pub sequence: u16,
    /// an index into the String heap
    pub name: u32,
}

impl RowRecord for ParamRaw {
    const TABLE: TableId = TableId::Param;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(ParamRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            flags: row.value_u16(0)?,
            sequence: row.value_u16(1)?,
            name: row.value(2)?,
        })
    }
}
