//! # `ModuleRef` Raw Implementation
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `ModuleRef` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleRefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// an index into the String heap
    pub name: u32,
}

impl RowRecord for ModuleRefRaw {
    const TABLE: TableId = TableId::ModuleRef;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(ModuleRefRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            name: row.value(0)?,
        })
    }
}
