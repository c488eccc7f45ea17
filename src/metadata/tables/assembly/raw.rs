//! # `Assembly` Raw Implementation
//!
//! Table 0x20. The single `Assembly` row: hash algorithm, version, flags, public key, name and culture.
use crate::{
    metadata::{
        tables::{expect_table, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `Assembly` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a 4-byte constant of type `AssemblyHashAlgorithm`, §II.23.1.1
    pub hash_alg_id: u32,
    /// a 2-byte constant
    pub major_version: u16,
    /// a 2-byte constant
    pub minor_version: u16,
    /// a 2-byte constant
    pub build_number: u16,
    /// a 2-byte constant
    pub revision_number: u16,
    /// a 4-byte bitmask of type `AssemblyFlags`, §II.23.1.2
    pub flags: u32,
    /// an index into the Blob heap
    pub public_key: u32,
    /// an index into the String heap
    pub name: u32,
    /// an index into the String heap
    pub culture: u32,
}

impl RowRecord for AssemblyRaw {
    const TABLE: TableId = TableId::Assembly;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(AssemblyRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            hash_alg_id: row.value(0)?,
            major_version: row.value_u16(1)?,
            minor_version: row.value_u16(2)?,
            build_number: row.value_u16(3)?,
            revision_number: row.value_u16(4)?,
            flags: row.value(5)?,
            public_key: row.value(6)?,
            name: row.value(7)?,
            culture: row.value(8)?,
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
            0x04, 0x80, 0x00, 0x00, // hash_alg_id
            0x02, 0x02, // major_version
            0x03, 0x03, // minor_version
            0x04, 0x04, // build_number
            0x05, 0x05, // revision_number
            0x06, 0x06, 0x06, 0x06, // flags
            0x07, 0x07, // public_key
            0x08, 0x08, // name
            0x09, 0x09, // culture
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Assembly, 1)], false, false, false));
        let table = MetadataTable::new(&data, TableId::Assembly, 1, sizes).unwrap();

        let eval = |row: AssemblyRaw| {
            assert_eq!(row.rid, 1);
            assert_eq!(row.token.value(), 0x20000001);
            assert_eq!(row.hash_alg_id, 0x8004);
            assert_eq!(row.major_version, 0x0202);
            assert_eq!(row.minor_version, 0x0303);
            assert_eq!(row.build_number, 0x0404);
            assert_eq!(row.revision_number, 0x0505);
            assert_eq!(row.flags, 0x06060606);
            assert_eq!(row.public_key, 0x0707);
            assert_eq!(row.name, 0x0808);
            assert_eq!(row.culture, 0x0909);
        };

        eval(AssemblyRaw::from_row(&table.get(1).unwrap()).unwrap());
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x01, 0x01, 0x01, 0x01, // hash_alg_id
            0x02, 0x02, // major_version
            0x03, 0x03, // minor_version
            0x04, 0x04, // build_number
            0x05, 0x05, // revision_number
            0x06, 0x06, 0x06, 0x06, // flags
            0x07, 0x07, 0x07, 0x07, // public_key
            0x08, 0x08, 0x08, 0x08, // name
            0x09, 0x09, 0x09, 0x09, // culture
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Assembly, 1)], true, true, true));
        let table = MetadataTable::new(&data, TableId::Assembly, 1, sizes).unwrap();

        let eval = |row: AssemblyRaw| {
            assert_eq!(row.hash_alg_id, 0x01010101);
            assert_eq!(row.public_key, 0x07070707);
            assert_eq!(row.name, 0x08080808);
            assert_eq!(row.culture, 0x09090909);
        };

        eval(AssemblyRaw::from_row(&table.get(1).unwrap()).unwrap());
    }
}
