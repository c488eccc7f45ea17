//! Text rendering of metadata tables.
//!
//! [`TableRenderer`] writes one table of a [`MetadataStore`] as a header line followed by one
//! block per row, in row order. The layout is fixed:
//!
//! ```text
//! ModuleRef Table (1..2)
//! Row:           1
//! Name:          native.dll
//!
//! Row:           2
//! Name:          kernel32.dll
//!
//! ```
//!
//! - Field labels are left aligned in a 14 column field followed by one space.
//! - Flags are zero padded lowercase hex; counts and version components are decimal.
//! - Tokens, coded indexes and simple row indexes print as `0x%08x (<TableName> <row>)`.
//! - Blobs print their heap index, then either a zero size marker or a hex dump.
//! - `Module` and `Assembly` hold at most one row and print no `Row:` line.
//!
//! Tables without a typed row model fail with [`Error::UnimplementedTable`] before anything is
//! written. An unresolvable heap or row index fails the table with [`Error::Row`]; rows written
//! before it stay written.

mod hexdump;
mod tables;

pub use hexdump::hexdump;

use std::io::Write;

use log::debug;

use crate::{
    metadata::{
        heaps::HeapResolver,
        store::MetadataStore,
        tables::{TableId, TableRow},
    },
    Error, Result,
};

/// Letter case of the bytes in hex dumps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HexCase {
    /// `AB CD`
    #[default]
    Upper,
    /// `ab cd`
    Lower,
}

/// Options of a [`TableRenderer`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Letter case of hex dump bytes
    pub hex_case: HexCase,
}

/// Renders tables of a [`MetadataStore`] as text
///
/// ```rust
/// use dotdump::{metadata::{store::RowStore, tables::TableId}, render::TableRenderer};
///
/// let store = RowStore::new();
/// let mut out = Vec::new();
/// TableRenderer::default().render(TableId::ModuleRef, &store, &mut out)?;
/// assert_eq!(out, b"ModuleRef Table\n");
/// # Ok::<(), dotdump::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TableRenderer {
    hex_case: HexCase,
}

impl TableRenderer {
    /// A renderer configured by `options`
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        TableRenderer {
            hex_case: options.hex_case,
        }
    }

    /// The hex case of this renderer
    #[must_use]
    pub fn hex_case(&self) -> HexCase {
        self.hex_case
    }

    /// `true` if `table` can be rendered
    #[must_use]
    pub fn supports(table: TableId) -> bool {
        TableRow::is_typed(table)
    }

    /// Render all rows of `table` into `sink`
    ///
    /// # Errors
    /// Returns [`Error::UnimplementedTable`] for tables without rendering support,
    /// [`Error::Row`] if a row references a missing heap entry or row, or
    /// [`Error::FileError`] if `sink` fails
    pub fn render<S, W>(&self, table: TableId, store: &S, sink: &mut W) -> Result<()>
    where
        S: MetadataStore + ?Sized,
        W: Write + ?Sized,
    {
        if !Self::supports(table) {
            return Err(Error::UnimplementedTable(table));
        }

        let count = store.row_count(table);
        let single_row = is_single_row(table);
        if single_row || count == 0 {
            writeln!(sink, "{} Table", table.name())?;
        } else {
            writeln!(sink, "{} Table (1..{})", table.name(), count)?;
        }

        let mut rows = tables::RowWriter {
            sink,
            heaps: HeapResolver::new(store),
            hex_case: self.hex_case,
        };

        for rid in 1..=count {
            let result = store.row(table, rid).and_then(|row| {
                if !single_row {
                    rows.field("Row", rid)?;
                }
                rows.row(&row)
            });

            result.map_err(|error| match error {
                Error::FileError(_) => error,
                source => Error::Row {
                    table,
                    rid,
                    source: Box::new(source),
                },
            })?;
        }

        debug!("rendered {} rows of {}", count, table);
        Ok(())
    }
}

fn is_single_row(table: TableId) -> bool {
    matches!(table, TableId::Module | TableId::Assembly)
}
