//! # `TypeSpec` Raw Implementation
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `TypeSpec` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSpecRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// an index into the Blob heap
    pub signature: u32,
}

impl RowRecord for TypeSpecRaw {
    const TABLE: TableId = TableId::TypeSpec;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(TypeSpecRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            signature: row.value(0)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::{MetadataTable, TableInfo};

    #[test]
    fn crafted_short() {
        let data = vec![
            0x01, 0x01, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::TypeSpec, 1)], false, false, false));
        let table = MetadataTable::new(&data, TableId::TypeSpec, 1, sizes).unwrap();

        let eval = |row: TypeSpecRaw| {
            assert_eq!(row.rid, 1);
            assert_eq!(row.token.value(), 0x1B000001);
            assert_eq!(row.signature, 0x0101);
        };

        eval(TypeSpecRaw::from_row(&table.get(1).unwrap()).unwrap());
    }
}
