//! # `StandAloneSig` Raw Implementation
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `StandAloneSig` table row, usually the local variable signature of a method body
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandAloneSigRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// an index into the Blob heap
    pub signature: u32,
}

impl RowRecord for StandAloneSigRaw {
    const TABLE: TableId = TableId::StandAloneSig;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(StandAloneSigRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            signature: row.value(0)?,
        })
    }
}
