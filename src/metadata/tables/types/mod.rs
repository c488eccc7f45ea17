//! Generic table infrastructure shared by every metadata table.
//!
//! Rows are read from the tables stream into [`RawRow`]s, one `u32` per column as described by
//! the table's [`Column`] layout. Typed records implement [`RowRecord`] on top of that.

mod codedindex;
mod schema;
mod tableid;
mod tableinfo;

pub use codedindex::{CodedIndex, CodedIndexType, CodedIndexTypeIter};
pub use schema::{Column, ColumnKind};
pub use tableid::TableId;
pub use tableinfo::{
    TableInfo, TableInfoRef, TableRowInfo, HEAP_DELTA_ONLY, HEAP_EXTRA_DATA, HEAP_HAS_DELETE,
    HEAP_LARGE_BLOB, HEAP_LARGE_GUID, HEAP_LARGE_STRINGS,
};

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::token::Token,
    Error::OutOfBounds,
    Result,
};

/// One row of any table, with every column widened to `u32`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// The table this row belongs to
    pub table: TableId,
    /// The 1-based row id
    pub rid: u32,
    /// Offset of the row within the image it was read from
    pub offset: usize,
    /// Column values in storage order
    pub values: Vec<u32>,
}

impl RawRow {
    /// Read one row of `table` at `offset`, advancing `offset` past it
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated
    pub fn read(
        data: &[u8],
        offset: &mut usize,
        table: TableId,
        rid: u32,
        sizes: &TableInfoRef,
    ) -> Result<Self> {
        let start = *offset;
        let mut values = Vec::with_capacity(table.columns().len());
        for column in table.columns() {
            let value = match sizes.column_bytes(column.kind) {
                1 => u32::from(read_le_at::<u8>(data, offset)?),
                bytes => read_le_at_dyn(data, offset, bytes == 4)?,
            };
            values.push(value);
        }

        Ok(RawRow {
            table,
            rid,
            offset: start,
            values,
        })
    }

    /// The token identifying this row
    #[must_use]
    pub fn token(&self) -> Token {
        Token::new(self.table.token(self.rid))
    }

    /// Value of column `index`
    ///
    /// # Errors
    /// Returns an error if the row has fewer columns
    pub fn value(&self, index: usize) -> Result<u32> {
        self.values.get(index).copied().ok_or_else(|| {
            malformed_error!(
                "{} row {} has no column {}",
                self.table,
                self.rid,
                index
            )
        })
    }

    /// Value of column `index`, narrowed to `u16`
    ///
    /// # Errors
    /// Returns an error if the column is missing or does not fit
    pub fn value_u16(&self, index: usize) -> Result<u16> {
        let value = self.value(index)?;
        u16::try_from(value).map_err(|_| {
            malformed_error!(
                "{} row {} column {} does not fit 16 bits - {:#x}",
                self.table,
                self.rid,
                index,
                value
            )
        })
    }

    /// Copy of this row under a different row id
    #[must_use]
    pub fn with_rid(&self, rid: u32) -> Self {
        RawRow {
            rid,
            ..self.clone()
        }
    }
}

/// A typed view over a [`RawRow`] of one specific table
pub trait RowRecord: Sized {
    /// The table this record describes
    const TABLE: TableId;

    /// Build the record from a generic row
    ///
    /// # Errors
    /// Returns an error if the row belongs to a different table or misses columns
    fn from_row(row: &RawRow) -> Result<Self>;
}

/// Check that `row` belongs to `R::TABLE`
///
/// # Errors
/// Returns an error naming both tables on a mismatch
pub(crate) fn expect_table<R: RowRecord>(row: &RawRow) -> Result<()> {
    if row.table == R::TABLE {
        Ok(())
    } else {
        Err(malformed_error!(
            "Expected a {} row, got {} row {}",
            R::TABLE,
            row.table,
            row.rid
        ))
    }
}

/// A view over the rows of one table inside a tables stream
pub struct MetadataTable<'a> {
    data: &'a [u8],
    table: TableId,
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
}

impl<'a> MetadataTable<'a> {
    /// Create a view over `row_count` rows of `table` starting at `data`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is too short for all rows
    pub fn new(data: &'a [u8], table: TableId, row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = sizes.row_size(table);
        if u64::from(row_count) * u64::from(row_size) > data.len() as u64 {
            return Err(OutOfBounds);
        }

        Ok(MetadataTable {
            data,
            table,
            row_count,
            row_size,
            sizes,
        })
    }

    /// Size of the table in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Size of one row in bytes
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Read row `rid` (1-based)
    ///
    /// # Errors
    /// Returns [`crate::Error::RowIndex`] if `rid` is 0 or past the last row
    pub fn get(&self, rid: u32) -> Result<RawRow> {
        if rid == 0 || rid > self.row_count {
            return Err(crate::Error::RowIndex {
                table: self.table,
                rid,
            });
        }

        RawRow::read(
            self.data,
            &mut ((rid as usize - 1) * self.row_size as usize),
            self.table,
            rid,
            &self.sizes,
        )
    }

    /// Iterate over all rows in storage order
    pub fn iter(&self) -> impl Iterator<Item = Result<RawRow>> + '_ {
        (1..=self.row_count).map(move |rid| self.get(rid))
    }
}
