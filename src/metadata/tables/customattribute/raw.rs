//! # `CustomAttribute` Raw Implementation
//!
//! Table 0x0C. Custom attributes, keyed by their parent coded index.
use crate::{
    metadata::{
        tables::{expect_table, CodedIndex, CodedIndexType, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `CustomAttribute` table row
#[derive(Clone, Debug, PartialEq)]
pub struct CustomAttributeRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// the owner of the attribute; a `HasCustomAttribute` coded index
    pub parent: CodedIndex,
    /// the attribute constructor, `MethodDef` or `MemberRef`; a `CustomAttributeType` coded index
    pub constructor: CodedIndex,
    /// an index into the Blob heap
    pub value: u32,
}

impl RowRecord for CustomAttributeRaw {
    const TABLE: TableId = TableId::CustomAttribute;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(CustomAttributeRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            parent: CodedIndexType::HasCustomAttribute.decode(row.value(0)?)?,
            constructor: CodedIndexType::CustomAttributeType.decode(row.value(1)?)?,
            value: row.value(2)?,
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
            0x2E, 0x00, // parent
            0x0B, 0x00, // type
            0x03, 0x03, // value
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::CustomAttribute, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::new(&data, TableId::CustomAttribute, 1, sizes).unwrap();

        let eval = |row: CustomAttributeRaw| {
            assert_eq!(row.rid, 1);
            assert_eq!(row.token.value(), 0x0C000001);
            assert_eq!(row.parent, CodedIndex::new(TableId::Assembly, 1));
            assert_eq!(row.constructor, CodedIndex::new(TableId::MemberRef, 1));
            assert_eq!(row.value, 0x0303);
        };

        eval(CustomAttributeRaw::from_row(&table.get(1).unwrap()).unwrap());
    }

    #[test]
    fn unused_constructor_tag() {
        let row = RawRow {
            table: TableId::CustomAttribute,
            rid: 1,
            offset: 0,
            values: vec![0x2E, 0x09, 1],
        };
        assert!(CustomAttributeRaw::from_row(&row).is_err());
    }
}
