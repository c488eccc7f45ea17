//! # `EncLog` Raw Implementation
//!
//! Table 0x1E. The Edit and Continue log: one token and function code per edit.
use crate::{
    metadata::{
        tables::{expect_table, FuncCode, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `EncLog` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncLogRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// the token of the element the edit applies to
    pub token_value: Token,
    /// the operation applied
    pub func_code: FuncCode,
}

impl RowRecord for EncLogRaw {
    const TABLE: TableId = TableId::EncLog;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(EncLogRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            token_value: Token::new(row.value(0)?),
            func_code: FuncCode::from(row.value(1)?),
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
            0x10, 0x00, 0x00, 0x06, // token_value
            0x01, 0x00, 0x00, 0x00, // func_code
            0x01, 0x00, 0x00, 0x02, // token_value
            0x00, 0x00, 0x00, 0x00, // func_code
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::EncLog, 2)], false, false, false));
        let table = MetadataTable::new(&data, TableId::EncLog, 2, sizes).unwrap();

        let eval = |row: EncLogRaw| {
            assert_eq!(row.rid, 1);
            assert_eq!(row.token.value(), 0x1E000001);
            assert_eq!(row.token_value.value(), 0x06000010);
            assert_eq!(row.func_code, FuncCode::AddMethod);
        };

        eval(EncLogRaw::from_row(&table.get(1).unwrap()).unwrap());

        let second = EncLogRaw::from_row(&table.get(2).unwrap()).unwrap();
        assert_eq!(second.token_value.value(), 0x02000001);
        assert_eq!(second.func_code, FuncCode::Default);
    }
}
