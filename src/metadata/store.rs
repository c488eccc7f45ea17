//! The row store: every table of an image as owned rows, plus its heaps.
//!
//! [`RowStore`] is built once from a metadata image (and optionally merged with an EnC delta by
//! [`crate::metadata::delta::merge`]) and is read-only afterwards. Rendering only sees it through
//! the [`MetadataStore`] trait.

use std::collections::BTreeSet;

use log::debug;
use strum::IntoEnumIterator;

use crate::{
    metadata::{
        heaps::HeapChain,
        image::MetadataImage,
        method::MethodBody,
        tables::{RawRow, TableId, TableRow},
    },
    Error, HeapKind, Result,
};

/// Number of table slots, indexed by the token table byte
const TABLE_SLOTS: usize = 64;

/// Random access to the rows and heaps of a metadata image
pub trait MetadataStore: Send + Sync {
    /// Number of rows in `table`, 0 if absent
    fn row_count(&self, table: TableId) -> u32;

    /// Row `rid` (1-based) of `table`
    ///
    /// # Errors
    /// Returns [`Error::RowIndex`] for a row that does not exist, or an error if the row can not
    /// be typed
    fn row(&self, table: TableId, rid: u32) -> Result<TableRow>;

    /// The string at `index` of the `#Strings` heap
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] if `index` is out of range
    fn string(&self, index: u32) -> Result<&str>;

    /// The blob at `index` of the `#Blob` heap
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] if `index` is out of range
    fn blob(&self, index: u32) -> Result<&[u8]>;

    /// The GUID at `index` of the `#GUID` heap
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] if `index` is out of range
    fn guid(&self, index: u32) -> Result<uguid::Guid>;
}

/// Owned rows and heaps of one image, or of a base image with a delta applied
#[derive(Clone)]
pub struct RowStore {
    pub(crate) tables: Vec<Vec<RawRow>>,
    pub(crate) strings: HeapChain,
    pub(crate) blobs: HeapChain,
    pub(crate) guids: HeapChain,
    pub(crate) generation: u32,
    pub(crate) delta_il: Option<Vec<u8>>,
    pub(crate) delta_methods: BTreeSet<u32>,
}

impl RowStore {
    /// An empty store
    #[must_use]
    pub fn new() -> Self {
        RowStore {
            tables: vec![Vec::new(); TABLE_SLOTS],
            strings: HeapChain::new(HeapKind::Strings),
            blobs: HeapChain::new(HeapKind::Blob),
            guids: HeapChain::new(HeapKind::Guid),
            generation: 0,
            delta_il: None,
            delta_methods: BTreeSet::new(),
        }
    }

    /// Read all rows and heaps of the metadata image in `data`
    ///
    /// # Errors
    /// Returns an error if the image is malformed
    pub fn from_image(data: &[u8]) -> Result<Self> {
        let image = MetadataImage::parse(data)?;
        Self::from_parsed(&image)
    }

    pub(crate) fn from_parsed(image: &MetadataImage) -> Result<Self> {
        let mut store = RowStore::new();

        for (table, count) in image.tables.present() {
            store.tables[table.index() as usize] = image.rows(table)?;
            debug!("read {} rows of {}", count, table);
        }

        if let Some(strings) = image.strings {
            store.strings.push(strings)?;
        }
        if let Some(blob) = image.blob {
            store.blobs.push(blob)?;
        }
        if let Some(guid) = image.guid {
            store.guids.push(guid)?;
        }

        Ok(store)
    }

    /// All rows of `table` in row order
    #[must_use]
    pub fn rows(&self, table: TableId) -> &[RawRow] {
        &self.tables[table.index() as usize]
    }

    /// The untyped row `rid` of `table`
    ///
    /// # Errors
    /// Returns [`Error::RowIndex`] if the row does not exist
    pub fn raw(&self, table: TableId, rid: u32) -> Result<&RawRow> {
        if rid == 0 {
            return Err(Error::RowIndex { table, rid });
        }

        self.rows(table)
            .get(rid as usize - 1)
            .ok_or(Error::RowIndex { table, rid })
    }

    /// Tables with at least one row, with their row counts
    #[must_use]
    pub fn tables(&self) -> Vec<(TableId, u32)> {
        TableId::iter()
            .map(|table| (table, self.row_count(table)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Number of deltas applied on top of the base image
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// The IL stream of the applied delta
    #[must_use]
    pub fn delta_il(&self) -> Option<&[u8]> {
        self.delta_il.as_deref()
    }

    /// The method body of `MethodDef` row `rid`, if the applied delta supplied it
    ///
    /// Bodies of the base image live in its PE sections and are not kept.
    ///
    /// # Errors
    /// Returns an error if the row does not exist or its body is malformed
    pub fn method_body(&self, rid: u32) -> Result<Option<(MethodBody, &[u8])>> {
        let row = self.raw(TableId::MethodDef, rid)?;
        if !self.delta_methods.contains(&rid) {
            return Ok(None);
        }

        let Some(il) = self.delta_il() else {
            return Ok(None);
        };

        let rva = row.value(0)? as usize;
        if rva == 0 {
            return Ok(None);
        }

        let Some(data) = il.get(rva..) else {
            return Err(Error::OutOfBounds);
        };

        let body = MethodBody::from(data)?;
        let code = body.code(data);
        Ok(Some((body, code)))
    }
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataStore for RowStore {
    fn row_count(&self, table: TableId) -> u32 {
        u32::try_from(self.rows(table).len()).unwrap_or(u32::MAX)
    }

    fn row(&self, table: TableId, rid: u32) -> Result<TableRow> {
        TableRow::from_raw(self.raw(table, rid)?.clone())
    }

    fn string(&self, index: u32) -> Result<&str> {
        self.strings.string(index)
    }

    fn blob(&self, index: u32) -> Result<&[u8]> {
        self.blobs.blob(index)
    }

    fn guid(&self, index: u32) -> Result<uguid::Guid> {
        self.guids.guid(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::builders::MetadataBuilder;

    #[test]
    fn from_image() {
        let mut builder = MetadataBuilder::new();
        let name = builder.string("App.dll");
        let mvid = builder.guid([0xAA; 16]);
        builder.row(TableId::Module, &[0, name, mvid, 0, 0]);
        let system = builder.string("System");
        let object = builder.string("Object");
        builder.row(TableId::TypeRef, &[0x06, object, system]);
        builder.row(TableId::TypeRef, &[0x06, system, object]);

        let store = RowStore::from_image(&builder.build()).unwrap();

        assert_eq!(store.row_count(TableId::Module), 1);
        assert_eq!(store.row_count(TableId::TypeRef), 2);
        assert_eq!(store.row_count(TableId::Assembly), 0);
        assert_eq!(
            store.tables(),
            vec![(TableId::Module, 1), (TableId::TypeRef, 2)]
        );
        assert_eq!(store.generation(), 0);

        match store.row(TableId::Module, 1).unwrap() {
            TableRow::Module(module) => {
                assert_eq!(store.string(module.name).unwrap(), "App.dll");
                assert_eq!(
                    store.guid(module.mvid).unwrap(),
                    uguid::Guid::from_bytes([0xAA; 16])
                );
            }
            other => panic!("unexpected row {other:?}"),
        }

        match store.row(TableId::TypeRef, 2).unwrap() {
            TableRow::TypeRef(typeref) => {
                assert_eq!(typeref.rid, 2);
                assert_eq!(store.string(typeref.type_name).unwrap(), "System");
                assert_eq!(store.string(typeref.type_namespace).unwrap(), "Object");
            }
            other => panic!("unexpected row {other:?}"),
        }

        assert!(matches!(
            store.row(TableId::TypeRef, 3),
            Err(Error::RowIndex {
                table: TableId::TypeRef,
                rid: 3
            })
        ));
        assert!(store.row(TableId::TypeRef, 0).is_err());
        assert!(matches!(
            store.string(0x1000),
            Err(Error::HeapIndex {
                heap: HeapKind::Strings,
                ..
            })
        ));
    }

    #[test]
    fn opaque_rows() {
        let mut builder = MetadataBuilder::new();
        builder.row(TableId::ClassLayout, &[8, 0x20, 1]);

        let store = RowStore::from_image(&builder.build()).unwrap();
        match store.row(TableId::ClassLayout, 1).unwrap() {
            TableRow::Opaque(row) => assert_eq!(row.values, vec![8, 0x20, 1]),
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn no_delta_bodies() {
        let mut builder = MetadataBuilder::new();
        builder.row(TableId::MethodDef, &[0x2050, 0, 0x96, 0, 0, 1]);

        let store = RowStore::from_image(&builder.build()).unwrap();
        assert!(store.delta_il().is_none());
        assert!(store.method_body(1).unwrap().is_none());
        assert!(store.method_body(2).is_err());
    }
}
