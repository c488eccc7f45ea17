//! # `EncMap` Raw Implementation
//!
//! Table 0x1F. The Edit and Continue map of delta rows to the tokens they define.
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `EncMap` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncMapRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// the token a delta row maps to
    pub original_token: Token,
}

impl RowRecord for EncMapRaw {
    const TABLE: TableId = TableId::EncMap;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(EncMapRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            original_token: Token::new(row.value(0)?),
        })
    }
}
