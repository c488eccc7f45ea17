//! # `Module` Raw Implementation
//!
//! Table 0x00. The `Module` row, with the GUIDs that tie EnC generations together.
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `Module` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a 2-byte value, reserved, shall be zero outside of EnC
    pub generation: u16,
    /// an index into the String heap
    pub name: u32,
    /// an index into the Guid heap; distinguishes between two versions of the same module
    pub mvid: u32,
    /// an index into the Guid heap; the id of this EnC generation
    pub encid: u32,
    /// an index into the Guid heap; the id of the generation this one is based on
    pub encbaseid: u32,
}

impl RowRecord for ModuleRaw {
    const TABLE: TableId = TableId::Module;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(ModuleRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            generation: row.value_u16(0)?,
            name: row.value(1)?,
            mvid: row.value(2)?,
            encid: row.value(3)?,
            encbaseid: row.value(4)?,
        })
    }
}
