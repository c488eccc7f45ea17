//! A parsed metadata image: the `BSJB` root, its tables stream and its heaps.
//!
//! Full images and EnC delta images share this layout. Nothing is copied here; the
//! [`crate::metadata::store::RowStore`] takes what it needs.

use log::{debug, warn};

use crate::{
    metadata::{
        root::Root,
        streams::TablesHeader,
        tables::{RawRow, TableId},
    },
    Result,
};

/// Borrowed view over one metadata image
pub struct MetadataImage<'a> {
    /// The metadata root with its stream directory
    pub root: Root,
    /// The tables stream
    pub tables: TablesHeader<'a>,
    /// The `#Strings` heap, if present
    pub strings: Option<&'a [u8]>,
    /// The `#Blob` heap, if present
    pub blob: Option<&'a [u8]>,
    /// The `#GUID` heap, if present
    pub guid: Option<&'a [u8]>,
}

impl<'a> MetadataImage<'a> {
    /// Parse the metadata image in `data`, which starts at the `BSJB` signature
    ///
    /// # Errors
    /// Returns an error if the root, the stream directory or the tables stream are malformed
    pub fn parse(data: &'a [u8]) -> Result<MetadataImage<'a>> {
        let root = Root::read(data)?;
        debug!(
            "metadata root {} with {} streams",
            root.version, root.stream_number
        );

        let Some(tables_stream) = root.tables_stream() else {
            return Err(malformed_error!("No tables stream present"));
        };

        let Some(tables_data) = root.stream_data(data, &tables_stream.name) else {
            return Err(malformed_error!("Tables stream leaves the metadata"));
        };

        let minimal_delta = root.is_minimal_delta();
        let tables = TablesHeader::from(tables_data, minimal_delta)?;
        debug!(
            "{} stream: {} tables, heap sizes {:#04x}, minimal delta {}",
            tables_stream.name,
            tables.table_count(),
            tables.heap_sizes,
            minimal_delta
        );

        let strings = root.stream_data(data, "#Strings");
        if let Some(strings) = strings {
            if !tables.is_delta_only() && strings.first().is_some_and(|first| *first != 0) {
                warn!("#Strings heap does not start with an empty string");
            }
        }

        Ok(MetadataImage {
            strings,
            blob: root.stream_data(data, "#Blob"),
            guid: root.stream_data(data, "#GUID"),
            tables,
            root,
        })
    }

    /// `true` if the image carries a `#JTD` stream
    #[must_use]
    pub fn is_minimal_delta(&self) -> bool {
        self.root.is_minimal_delta()
    }

    /// Row count of `table`
    #[must_use]
    pub fn row_count(&self, table: TableId) -> u32 {
        self.tables.rows(table)
    }

    /// All rows of `table`, empty if the table is absent
    ///
    /// # Errors
    /// Returns an error if a row is truncated
    pub fn rows(&self, table: TableId) -> Result<Vec<RawRow>> {
        match self.tables.table(table) {
            Some(rows) => rows.iter().collect(),
            None => Ok(Vec::new()),
        }
    }
}
