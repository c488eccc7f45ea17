//! The dump driver.
//!
//! A [`Session`] is opened once, from a path or a buffer and optionally with an EnC delta, and
//! then renders any number of tables. Opening reads every table and heap into an owned
//! [`RowStore`], so input files are unmapped before [`Session::open`] returns.

use std::{io::Write, path::Path};

use log::{debug, info};
use rayon::prelude::*;

use crate::{
    file::File,
    metadata::{
        delta,
        store::{MetadataStore, RowStore},
        tables::TableId,
    },
    render::{RenderOptions, TableRenderer},
    Result,
};

/// An EnC delta: the delta metadata image (`.dmeta`) and the delta IL (`.dil`)
#[derive(Clone, Debug, Default)]
pub struct Delta {
    /// The delta metadata, starting at the `BSJB` signature
    pub metadata: Vec<u8>,
    /// The delta IL that delta method RVAs point into
    pub il: Vec<u8>,
}

impl Delta {
    /// A delta from buffers
    #[must_use]
    pub fn new(metadata: Vec<u8>, il: Vec<u8>) -> Self {
        Delta { metadata, il }
    }

    /// Read a delta from its two files
    ///
    /// # Errors
    /// Returns an error if either file can not be read, or the metadata file holds no metadata
    pub fn from_files(metadata: &Path, il: &Path) -> Result<Self> {
        let file = File::from_file(metadata)?;
        Ok(Delta {
            metadata: file.metadata()?.to_vec(),
            il: std::fs::read(il)?,
        })
    }
}

/// An opened module, ready to render tables
///
/// ```rust,no_run
/// use std::path::Path;
/// use dotdump::{metadata::tables::TableId, Session};
///
/// let session = Session::open(Path::new("App.dll"))?;
/// session.dump(TableId::Assembly, &mut std::io::stdout())?;
/// session.dump(TableId::AssemblyRef, &mut std::io::stdout())?;
/// # Ok::<(), dotdump::Error>(())
/// ```
pub struct Session {
    store: RowStore,
    renderer: TableRenderer,
}

impl Session {
    /// Open the module at `path`
    ///
    /// # Errors
    /// Returns an error if the file can not be read or its metadata is malformed
    pub fn open(path: &Path) -> Result<Session> {
        info!("opening {}", path.display());
        Self::load(&File::from_file(path)?, None)
    }

    /// Open the module at `path` and apply the delta in `delta_metadata` and `delta_il`
    ///
    /// # Errors
    /// Returns an error if a file can not be read, metadata is malformed, or the delta does not
    /// apply to the module
    pub fn open_with_delta(path: &Path, delta_metadata: &Path, delta_il: &Path) -> Result<Session> {
        info!(
            "opening {} with delta {} / {}",
            path.display(),
            delta_metadata.display(),
            delta_il.display()
        );
        let delta = Delta::from_files(delta_metadata, delta_il)?;
        Self::load(&File::from_file(path)?, Some(&delta))
    }

    /// Open a module held in memory, a PE image or a bare metadata image
    ///
    /// # Errors
    /// Returns an error if the metadata is malformed or the delta does not apply to the module
    pub fn from_mem(data: Vec<u8>, delta: Option<Delta>) -> Result<Session> {
        Self::load(&File::from_mem(data)?, delta.as_ref())
    }

    fn load(file: &File, delta: Option<&Delta>) -> Result<Session> {
        let base = RowStore::from_image(file.metadata()?)?;
        debug!("base module has {} tables", base.tables().len());

        let store = match delta {
            Some(delta) => delta::merge(&base, &delta.metadata, &delta.il)?,
            None => base,
        };

        Ok(Session {
            store,
            renderer: TableRenderer::default(),
        })
    }

    /// Use `options` for all following dumps
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.renderer = TableRenderer::new(options);
        self
    }

    /// The rows and heaps of the module
    #[must_use]
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Tables with rows, with their row counts
    #[must_use]
    pub fn tables(&self) -> Vec<(TableId, u32)> {
        self.store.tables()
    }

    /// Row count of `table`
    #[must_use]
    pub fn row_count(&self, table: TableId) -> u32 {
        self.store.row_count(table)
    }

    /// Render `table` into `sink`
    ///
    /// # Errors
    /// See [`TableRenderer::render`]
    pub fn dump<W: Write + ?Sized>(&self, table: TableId, sink: &mut W) -> Result<()> {
        self.renderer.render(table, &self.store, sink)
    }

    /// Render each of `tables` into its own buffer, in parallel
    ///
    /// The results keep the order of `tables`. A failing table does not affect the others, and
    /// keeps whatever it wrote before failing.
    #[must_use]
    pub fn dump_many(&self, tables: &[TableId]) -> Vec<TableDump> {
        tables
            .par_iter()
            .map(|table| {
                let mut output = Vec::new();
                let result = self.dump(*table, &mut output);
                TableDump {
                    table: *table,
                    output,
                    result,
                }
            })
            .collect()
    }
}

/// The rendering of one table by [`Session::dump_many`]
#[derive(Debug)]
pub struct TableDump {
    /// The rendered table
    pub table: TableId,
    /// Everything written, complete if `result` is `Ok`
    pub output: Vec<u8>,
    /// The outcome of rendering
    pub result: Result<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render::HexCase,
        test::{base_module, delta_module},
        Error,
    };

    fn dump(session: &Session, table: TableId) -> String {
        let mut out = Vec::new();
        session.dump(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn repeated_dumps() {
        let session = Session::from_mem(base_module().build(), None).unwrap();

        let first = dump(&session, TableId::ModuleRef);
        let second = dump(&session, TableId::ModuleRef);
        assert_eq!(first, second);
        assert_eq!(
            first,
            "ModuleRef Table (1..1)\n\
             Row:           1\n\
             Name:          native.dll\n\
             \n"
        );

        assert_eq!(session.row_count(TableId::TypeDef), 2);
        assert_eq!(
            session.tables().first().copied(),
            Some((TableId::Module, 1))
        );
    }

    #[test]
    fn unimplemented_tables_do_not_stop_others() {
        let session = Session::from_mem(base_module().build(), None).unwrap();
        let results =
            session.dump_many(&[TableId::Module, TableId::ClassLayout, TableId::ModuleRef]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].table, TableId::Module);
        assert!(results[0].result.is_ok());
        assert!(matches!(
            results[1].result,
            Err(Error::UnimplementedTable(TableId::ClassLayout))
        ));
        assert!(results[1].output.is_empty());
        assert!(results[2].result.is_ok());
        assert_eq!(
            String::from_utf8_lossy(&results[2].output),
            dump(&session, TableId::ModuleRef)
        );
    }

    #[test]
    fn with_delta() {
        let base = base_module();
        let mut delta = delta_module(&base, 1, 2);
        let renamed = delta.string("renamed.dll");
        delta.row(TableId::ModuleRef, &[renamed]);
        delta.row(TableId::EncLog, &[TableId::ModuleRef.token(1), 0]);
        delta.row(TableId::EncMap, &[TableId::ModuleRef.token(1)]);

        let session = Session::from_mem(
            base.build(),
            Some(Delta::new(delta.build(), Vec::new())),
        )
        .unwrap();

        assert_eq!(session.store().generation(), 1);
        assert!(dump(&session, TableId::ModuleRef).contains("Name:          renamed.dll\n"));
        assert!(dump(&session, TableId::Module).contains("Generation:    1\n"));
        assert_eq!(
            dump(&session, TableId::EncLog),
            "EncLog Table (1..1)\n\
             Row:           1\n\
             Token:         0x1a000001 (ModuleRef 1)\n\
             FuncCode:      Default (0)\n\
             \n"
        );
    }

    #[test]
    fn with_uncompressed_minimal_delta() {
        let base = base_module();
        let mut delta = delta_module(&base, 1, 2);
        let renamed = delta.string("r.dll");
        delta.row(TableId::ModuleRef, &[renamed]);
        delta.row(TableId::EncLog, &[TableId::ModuleRef.token(1), 0]);
        delta.row(TableId::EncMap, &[TableId::ModuleRef.token(1)]);
        delta
            .minimal_delta()
            .delta_only()
            .extra_data()
            .uncompressed();

        let session = Session::from_mem(
            base.build(),
            Some(Delta::new(delta.build(), Vec::new())),
        )
        .unwrap();

        assert_eq!(session.store().generation(), 1);
        assert_eq!(session.row_count(TableId::ModuleRef), 1);
        assert!(dump(&session, TableId::ModuleRef).contains("Name:          r.dll\n"));
        assert!(dump(&session, TableId::EncMap).contains("Token:         0x1a000001 (ModuleRef 1)\n"));
    }

    #[test]
    fn empty_delta_is_no_delta() {
        let base = base_module().build();
        let plain = Session::from_mem(base.clone(), None).unwrap();
        let merged = Session::from_mem(base, Some(Delta::default())).unwrap();

        for (table, _) in plain.tables() {
            if TableRenderer::supports(table) {
                assert_eq!(dump(&plain, table), dump(&merged, table));
            }
        }
        assert_eq!(merged.store().generation(), 0);
    }

    #[test]
    fn inconsistent_delta_fails_open() {
        let base = base_module();
        let mut delta = delta_module(&base, 1, 2);
        delta.row(TableId::EncLog, &[TableId::MethodDef.token(9), 0]);

        let result = Session::from_mem(base.build(), Some(Delta::new(delta.build(), Vec::new())));
        assert!(matches!(result, Err(Error::InconsistentDelta(_))));
    }

    #[test]
    fn hex_case_option() {
        let session = Session::from_mem(base_module().build(), None)
            .unwrap()
            .with_options(RenderOptions {
                hex_case: HexCase::Lower,
            });
        assert!(dump(&session, TableId::MethodDef).contains("0x00000000: 00 01 01 1d 0e \n"));
    }

    #[test]
    fn invalid_input() {
        assert!(matches!(
            Session::from_mem(Vec::new(), None),
            Err(Error::Empty)
        ));
        assert!(Session::from_mem(vec![0xCC; 64], None).is_err());
        assert!(Session::open(Path::new("/nonexistent/App.dll")).is_err());
    }
}
