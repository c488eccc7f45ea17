use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::{
    file::io::read_le,
    metadata::tables::{
        MetadataTable, TableId, TableInfo, TableInfoRef, HEAP_DELTA_ONLY, HEAP_EXTRA_DATA,
        HEAP_HAS_DELETE,
    },
    Error::OutOfBounds,
    Result,
};

/// The header of the tables stream (`#~` or `#-`), ECMA-335 II.24.2.6.
///
/// Gives access to every present table as a [`MetadataTable`] without copying row data.
///
/// ```rust,no_run
/// use dotdump::metadata::{streams::TablesHeader, tables::TableId};
///
/// # fn example(data: &[u8]) -> dotdump::Result<()> {
/// let header = TablesHeader::from(data, false)?;
/// if let Some(assembly_refs) = header.table(TableId::AssemblyRef) {
///     for row in assembly_refs.iter() {
///         println!("{}", row?.token());
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct TablesHeader<'a> {
    /// Major version of the table schema, 2
    pub major_version: u8,
    /// Minor version of the table schema, 0
    pub minor_version: u8,
    /// The `HeapSizes` byte
    pub heap_sizes: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and column widths
    pub info: TableInfoRef,
    /// Offset of the first table row, relative to the stream start
    pub tables_offset: usize,
    tables: Vec<Option<MetadataTable<'a>>>,
}

impl<'a> TablesHeader<'a> {
    /// Parse the tables stream in `data`
    ///
    /// # Arguments
    /// * `data`          - The complete tables stream
    /// * `minimal_delta` - `true` if the image carries a `#JTD` stream
    ///
    /// # Errors
    /// Returns an error if the header is truncated, has no tables, or a table leaves the stream
    pub fn from(data: &'a [u8], minimal_delta: bool) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let valid_bitvec = read_le::<u64>(&data[8..])?;
        if valid_bitvec == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let heap_sizes = read_le::<u8>(&data[6..])?;
        let mut tables_offset = 24 + valid_bitvec.count_ones() as usize * 4;
        if heap_sizes & HEAP_EXTRA_DATA != 0 {
            tables_offset += 4;
        }

        let mut tables_header = TablesHeader {
            major_version: read_le::<u8>(&data[4..])?,
            minor_version: read_le::<u8>(&data[5..])?,
            heap_sizes,
            valid: valid_bitvec,
            sorted: read_le::<u64>(&data[16..])?,
            info: Arc::new(TableInfo::new(data, valid_bitvec, minimal_delta)?),
            tables_offset,
            tables: Vec::new(),
        };

        tables_header.tables.resize_with(64, || None);

        let mut current_offset = tables_offset;
        for table_id in TableId::iter() {
            let row_count = tables_header.info.rows(table_id);
            if row_count == 0 {
                continue;
            }

            if current_offset > data.len() {
                return Err(OutOfBounds);
            }

            let table = MetadataTable::new(
                &data[current_offset..],
                table_id,
                row_count,
                tables_header.info.clone(),
            )?;

            current_offset += usize::try_from(table.size())
                .map_err(|_| malformed_error!("Table {} is too large", table_id))?;
            tables_header.tables[table_id.index() as usize] = Some(table);
        }

        Ok(tables_header)
    }

    /// Number of tables marked present
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// `true` if `table` has rows
    #[must_use]
    pub fn has_table(&self, table: TableId) -> bool {
        self.tables[table.index() as usize].is_some()
    }

    /// Row access for `table`, `None` if the table has no rows
    #[must_use]
    pub fn table(&self, table: TableId) -> Option<&MetadataTable<'a>> {
        self.tables[table.index() as usize].as_ref()
    }

    /// Row count of `table`
    #[must_use]
    pub fn rows(&self, table: TableId) -> u32 {
        self.info.rows(table)
    }

    /// All tables with rows, in table id order
    pub fn present(&self) -> impl Iterator<Item = (TableId, u32)> + '_ {
        TableId::iter()
            .filter(|table| self.has_table(*table))
            .map(|table| (table, self.rows(table)))
    }

    /// The stream only holds rows of a delta
    #[must_use]
    pub fn is_delta_only(&self) -> bool {
        self.heap_sizes & HEAP_DELTA_ONLY != 0
    }

    /// The stream may contain deleted rows
    #[must_use]
    pub fn has_delete(&self) -> bool {
        self.heap_sizes & HEAP_HAS_DELETE != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x00, 0x00, 0x00,                             // reserved
            0x02, 0x00,                                         // version
            0x00,                                               // heap sizes
            0x01,                                               // reserved
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,     // valid: Module
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,     // sorted
            0x01, 0x00, 0x00, 0x00,                             // Module rows
            0x00, 0x00,                                         // Generation
            0x01, 0x00,                                         // Name
            0x01, 0x00,                                         // Mvid
            0x00, 0x00,                                         // EncId
            0x00, 0x00,                                         // EncBaseId
        ];

        let header = TablesHeader::from(&data, false).unwrap();
        assert_eq!(header.major_version, 2);
        assert_eq!(header.minor_version, 0);
        assert_eq!(header.table_count(), 1);
        assert_eq!(header.tables_offset, 28);
        assert!(header.has_table(TableId::Module));
        assert!(!header.has_table(TableId::TypeDef));
        assert!(!header.is_delta_only());

        let module = header.table(TableId::Module).unwrap();
        assert_eq!(module.row_count(), 1);
        assert_eq!(module.get(1).unwrap().values, vec![0, 1, 1, 0, 0]);

        let present: Vec<(TableId, u32)> = header.present().collect();
        assert_eq!(present, vec![(TableId::Module, 1)]);
    }

    #[test]
    fn extra_data() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x00, 0x00, 0x00,
            0x02, 0x00,
            0xE0,                                               // delta only, extra data, has delete
            0x01,
            0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00,     // valid: EncLog
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,                             // EncLog rows
            0xAA, 0xBB, 0xCC, 0xDD,                             // extra data
            0x01, 0x00, 0x00, 0x06,                             // Token
            0x01, 0x00, 0x00, 0x00,                             // FuncCode
        ];

        let header = TablesHeader::from(&data, false).unwrap();
        assert!(header.is_delta_only());
        assert!(header.has_delete());
        assert_eq!(header.tables_offset, 32);

        let row = header.table(TableId::EncLog).unwrap().get(1).unwrap();
        assert_eq!(row.values, vec![0x0600_0001, 1]);
    }

    #[test]
    fn invalid() {
        assert!(TablesHeader::from(&[0u8; 23], false).is_err());
        assert!(TablesHeader::from(&[0u8; 32], false).is_err());

        #[rustfmt::skip]
        let truncated = [
            0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x01,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,                             // 2 Module rows, no data
            0x00, 0x00,
        ];
        assert!(TablesHeader::from(&truncated, false).is_err());
    }
}
