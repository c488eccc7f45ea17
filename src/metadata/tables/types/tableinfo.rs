use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::{read_le, read_le_at},
    metadata::tables::{ColumnKind, CodedIndexType, TableId},
    Error::OutOfBounds,
    Result,
};

/// `HeapSizes` bit for 4 byte `#Strings` indexes
pub const HEAP_LARGE_STRINGS: u8 = 0x01;
/// `HeapSizes` bit for 4 byte `#GUID` indexes
pub const HEAP_LARGE_GUID: u8 = 0x02;
/// `HeapSizes` bit for 4 byte `#Blob` indexes
pub const HEAP_LARGE_BLOB: u8 = 0x04;
/// `HeapSizes` bit marking an image that only carries EnC deltas
pub const HEAP_DELTA_ONLY: u8 = 0x20;
/// `HeapSizes` bit announcing 4 extra bytes after the row counts
pub const HEAP_EXTRA_DATA: u8 = 0x40;
/// `HeapSizes` bit marking an image that may contain deleted rows
pub const HEAP_HAS_DELETE: u8 = 0x80;

/// Number of table slots addressable by the `valid` bit vector
const TABLE_SLOTS: usize = 64;

/// Row count related information of one table
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Bits needed to address every row
    pub bits: u8,
    /// `true` if simple indexes into this table need 4 bytes
    pub is_large: bool,
}

impl TableRowInfo {
    /// Derive size information from a row count
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Row counts and index widths of one metadata image.
///
/// Every column width in the tables stream follows from this: heap index widths from the
/// `HeapSizes` byte, simple index widths from the target table's row count, coded index widths
/// from the largest of the candidate tables (ECMA-335 II.24.2.6). In a minimal EnC delta (`#JTD`
/// stream present) all table and coded indexes are 4 bytes wide regardless of row counts.
#[derive(Clone, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    heap_sizes: u8,
    minimal_delta: bool,
}

/// Shared reference to a [`TableInfo`]
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Read the row counts following the fixed tables stream header
    ///
    /// # Arguments
    /// * `data`          - The tables stream, starting at its header
    /// * `valid_bitvec`  - The `valid` bit vector of the header
    /// * `minimal_delta` - `true` if the image carries a `#JTD` stream
    ///
    /// # Errors
    /// Returns an error if the row counts are truncated, or an unknown table has rows
    pub fn new(data: &[u8], valid_bitvec: u64, minimal_delta: bool) -> Result<Self> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let mut rows = Vec::new();
        let mut next_row_offset = 24;

        for slot in 0..TABLE_SLOTS {
            if (valid_bitvec & (1 << slot)) == 0 {
                continue;
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            #[allow(clippy::cast_possible_truncation)]
            let index = slot as u8;
            match TableId::from_index(index) {
                Some(table) => rows.push((table, row_count)),
                None if row_count == 0 => {}
                None => {
                    return Err(malformed_error!(
                        "Unknown table {:#04x} has {} rows",
                        slot,
                        row_count
                    ))
                }
            }
        }

        Ok(Self::from_rows(&rows, read_le::<u8>(&data[6..])?, minimal_delta))
    }

    /// Build from explicit row counts and a `HeapSizes` byte
    #[must_use]
    pub fn from_rows(rows: &[(TableId, u32)], heap_sizes: u8, minimal_delta: bool) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TABLE_SLOTS],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            heap_sizes,
            minimal_delta,
        };

        for (table, count) in rows {
            table_info.rows[table.index() as usize] = TableRowInfo::new(*count);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Layout for the given row counts and heap widths
    #[cfg(test)]
    pub(crate) fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut heap_sizes = 0;
        if large_str {
            heap_sizes |= HEAP_LARGE_STRINGS;
        }
        if large_blob {
            heap_sizes |= HEAP_LARGE_BLOB;
        }
        if large_guid {
            heap_sizes |= HEAP_LARGE_GUID;
        }

        Self::from_rows(valid_tables, heap_sizes, false)
    }

    /// Row count of `table`
    #[must_use]
    pub fn rows(&self, table: TableId) -> u32 {
        self.rows[table.index() as usize].rows
    }

    /// The raw `HeapSizes` byte
    #[must_use]
    pub fn heap_sizes(&self) -> u8 {
        self.heap_sizes
    }

    /// `true` if this image is a minimal EnC delta
    #[must_use]
    pub fn is_minimal_delta(&self) -> bool {
        self.minimal_delta
    }

    /// `true` if simple indexes into `table` are 4 bytes wide
    #[must_use]
    pub fn is_large(&self, table: TableId) -> bool {
        self.minimal_delta || self.rows[table.index() as usize].is_large
    }

    /// `true` if `#Strings` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.heap_sizes & HEAP_LARGE_STRINGS != 0
    }

    /// `true` if `#GUID` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.heap_sizes & HEAP_LARGE_GUID != 0
    }

    /// `true` if `#Blob` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.heap_sizes & HEAP_LARGE_BLOB != 0
    }

    /// `true` if coded indexes of kind `coded_index_type` are 4 bytes wide
    #[must_use]
    pub fn is_large_coded(&self, coded_index_type: CodedIndexType) -> bool {
        self.minimal_delta || self.coded_indexes[coded_index_type as usize] > 16
    }

    /// Width of a column of kind `kind` in bytes
    #[must_use]
    pub fn column_bytes(&self, kind: ColumnKind) -> u8 {
        let is_large = match kind {
            ColumnKind::U8 => return 1,
            ColumnKind::U16 => return 2,
            ColumnKind::U32 => return 4,
            ColumnKind::Str => self.is_large_str(),
            ColumnKind::Blob => self.is_large_blob(),
            ColumnKind::Guid => self.is_large_guid(),
            ColumnKind::Table(table) => self.is_large(table),
            ColumnKind::Coded(coded) => self.is_large_coded(coded),
        };

        if is_large {
            4
        } else {
            2
        }
    }

    /// Size of one row of `table` in bytes
    #[must_use]
    pub fn row_size(&self, table: TableId) -> u32 {
        table
            .columns()
            .iter()
            .map(|column| u32::from(self.column_bytes(column.kind)))
            .sum()
    }

    fn calculate_coded_index_size(&self, coded_index_type: CodedIndexType) -> u8 {
        let max_bits = coded_index_type
            .tables()
            .iter()
            .flatten()
            .map(|table| self.rows[table.index() as usize].bits)
            .max()
            .unwrap_or(1);

        max_bits + coded_index_type.tag_bits()
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let size = self.calculate_coded_index_size(coded_index);
            self.coded_indexes[coded_index as usize] = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small() {
        let info = TableInfo::new_test(&[(TableId::TypeDef, 10), (TableId::Field, 100)], false, false, false);

        assert_eq!(info.rows(TableId::TypeDef), 10);
        assert_eq!(info.rows(TableId::MethodDef), 0);
        assert!(!info.is_large(TableId::TypeDef));
        assert_eq!(info.column_bytes(ColumnKind::Str), 2);
        assert_eq!(info.column_bytes(ColumnKind::Coded(CodedIndexType::TypeDefOrRef)), 2);
        // Flags + Name + Namespace + Extends + FieldList + MethodList
        assert_eq!(info.row_size(TableId::TypeDef), 4 + 2 + 2 + 2 + 2 + 2);
    }

    #[test]
    fn heap_flags() {
        let info = TableInfo::new_test(&[], true, false, true);
        assert!(info.is_large_str());
        assert!(!info.is_large_blob());
        assert!(info.is_large_guid());
        assert_eq!(info.row_size(TableId::Module), 2 + 4 + 4 + 4 + 4);
    }

    #[test]
    fn table_index_threshold() {
        let info = TableInfo::new_test(&[(TableId::Field, 0xFFFF)], false, false, false);
        assert_eq!(info.column_bytes(ColumnKind::Table(TableId::Field)), 2);

        let info = TableInfo::new_test(&[(TableId::Field, 0x1_0000)], false, false, false);
        assert_eq!(info.column_bytes(ColumnKind::Table(TableId::Field)), 4);
    }

    #[test]
    fn coded_index_threshold() {
        // TypeDefOrRef has 2 tag bits, 4 byte indexes start at 2^14 rows
        let info = TableInfo::new_test(&[(TableId::TypeRef, 0x3FFF)], false, false, false);
        assert_eq!(info.column_bytes(ColumnKind::Coded(CodedIndexType::TypeDefOrRef)), 2);

        let info = TableInfo::new_test(&[(TableId::TypeRef, 0x4000)], false, false, false);
        assert_eq!(info.column_bytes(ColumnKind::Coded(CodedIndexType::TypeDefOrRef)), 4);
        assert_eq!(info.column_bytes(ColumnKind::Coded(CodedIndexType::HasConstant)), 2);

        // HasCustomAttribute has 5 tag bits, 4 byte indexes start at 2^11 rows
        let info = TableInfo::new_test(&[(TableId::MethodSpec, 0x800)], false, false, false);
        assert_eq!(info.column_bytes(ColumnKind::Coded(CodedIndexType::HasCustomAttribute)), 4);
    }

    #[test]
    fn minimal_delta() {
        let info = TableInfo::from_rows(&[(TableId::MethodDef, 1)], 0, true);
        assert!(info.is_minimal_delta());
        assert_eq!(info.column_bytes(ColumnKind::Table(TableId::Param)), 4);
        assert_eq!(info.column_bytes(ColumnKind::Coded(CodedIndexType::TypeDefOrRef)), 4);
        assert_eq!(info.column_bytes(ColumnKind::Str), 2);
    }

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x00, 0x00, 0x00,                         // reserved
            0x02, 0x00,                                     // major, minor
            0x05,                                           // heap sizes
            0x01,                                           // reserved
            0x41, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // valid: Module, MethodDef
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sorted
            0x01, 0x00, 0x00, 0x00,                         // Module rows
            0x00, 0x00, 0x01, 0x00,                         // MethodDef rows
        ];

        let info = TableInfo::new(&data, 0x41, false).unwrap();
        assert_eq!(info.rows(TableId::Module), 1);
        assert_eq!(info.rows(TableId::MethodDef), 0x1_0000);
        assert!(info.is_large(TableId::MethodDef));
        assert!(info.is_large_str());
        assert!(info.is_large_blob());
        assert!(!info.is_large_guid());

        assert!(TableInfo::new(&data[..30], 0x41, false).is_err());
    }

    #[test]
    fn unknown_table_with_rows() {
        let mut data = vec![0u8; 28];
        data[24] = 1;
        assert!(TableInfo::new(&data, 1 << 0x2D, false).is_err());

        data[24] = 0;
        assert!(TableInfo::new(&data, 1 << 0x2D, false).is_ok());
    }
}
