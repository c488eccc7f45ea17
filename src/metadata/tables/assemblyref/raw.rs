//! # `AssemblyRef` Raw Implementation
//!
//! Table 0x23. References to other assemblies, with their version and public key or token.
use crate::{
    metadata::{
        tables::{expect_table, AssemblyFlags, RawRow, RowRecord, TableId},
        token::Token,
    },
    Result,
};

/// The `AssemblyRef` table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyRefRaw {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// Offset
    pub offset: usize,
    /// a 2-byte value specifying the Major version number
    pub major_version: u16,
    /// a 2-byte value specifying the Minor version number
    pub minor_version: u16,
    /// a 2-byte value specifying the Build number
    pub build_number: u16,
    /// a 2-byte value specifying the Revision number
    pub revision_number: u16,
    /// a 4-byte bitmask of type `AssemblyFlags`, §II.23.1.2
    pub flags: u32,
    /// an index into the Blob heap
    pub public_key_or_token: u32,
    /// an index into the String heap
    pub name: u32,
    /// an index into the String heap
    pub culture: u32,
    /// an index into the Blob heap
    pub hash_value: u32,
}

impl AssemblyRefRaw {
    /// `true` if `public_key_or_token` holds a full public key
    #[must_use]
    pub fn has_public_key(&self) -> bool {
        AssemblyFlags::from_bits_truncate(self.flags).contains(AssemblyFlags::PUBLIC_KEY)
    }
}

impl RowRecord for AssemblyRefRaw {
    const TABLE: TableId = TableId::AssemblyRef;

    fn from_row(row: &RawRow) -> Result<Self> {
        expect_table::<Self>(row)?;

        Ok(AssemblyRefRaw {
            rid: row.rid,
            token: row.token(),
            offset: row.offset,
            major_version: row.value_u16(0)?,
            minor_version: row.value_u16(1)?,
            build_number: row.value_u16(2)?,
            revision_number: row.value_u16(3)?,
            flags: row.value(4)?,
            public_key_or_token: row.value(5)?,
            name: row.value(6)?,
            culture: row.value(7)?,
            hash_value: row.value(8)?,
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
            0x01, 0x01, // major_version
            0x02, 0x02, // minor_version
            0x03, 0x03, // build_number
            0x04, 0x04, // revision_number
            0x01, 0x00, 0x00, 0x00, // flags
            0x06, 0x06, // public_key_or_token
            0x07, 0x07, // name
            0x08, 0x08, // culture
            0x09, 0x09, // hash_value
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::AssemblyRef, 1)], false, false, false));
        let table = MetadataTable::new(&data, TableId::AssemblyRef, 1, sizes).unwrap();

        let eval = |row: AssemblyRefRaw| {
            assert_eq!(row.rid, 1);
            assert_eq!(row.token.value(), 0x23000001);
            assert_eq!(row.major_version, 0x0101);
            assert_eq!(row.minor_version, 0x0202);
            assert_eq!(row.build_number, 0x0303);
            assert_eq!(row.revision_number, 0x0404);
            assert_eq!(row.flags, 0x01);
            assert!(row.has_public_key());
            assert_eq!(row.public_key_or_token, 0x0606);
            assert_eq!(row.name, 0x0707);
            assert_eq!(row.culture, 0x0808);
            assert_eq!(row.hash_value, 0x0909);
        };

        eval(AssemblyRefRaw::from_row(&table.get(1).unwrap()).unwrap());
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x01, 0x01, // major_version
            0x02, 0x02, // minor_version
            0x03, 0x03, // build_number
            0x04, 0x04, // revision_number
            0x00, 0x01, 0x00, 0x00, // flags
            0x06, 0x06, 0x06, 0x06, // public_key_or_token
            0x07, 0x07, 0x07, 0x07, // name
            0x08, 0x08, 0x08, 0x08, // culture
            0x09, 0x09, 0x09, 0x09, // hash_value
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::AssemblyRef, 1)], true, true, true));
        let table = MetadataTable::new(&data, TableId::AssemblyRef, 1, sizes).unwrap();

        let eval = |row: AssemblyRefRaw| {
            assert_eq!(row.flags, 0x0100);
            assert!(!row.has_public_key());
            assert_eq!(row.public_key_or_token, 0x06060606);
            assert_eq!(row.name, 0x07070707);
            assert_eq!(row.culture, 0x08080808);
            assert_eq!(row.hash_value, 0x09090909);
        };

        eval(AssemblyRefRaw::from_row(&table.get(1).unwrap()).unwrap());
    }
}
