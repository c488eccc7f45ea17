//! # dotdump Prelude
//!
//! The types needed to open a module and dump its tables.
//!
//! ```rust,no_run
//! use dotdump::prelude::*;
//!
//! let session = Session::open(std::path::Path::new("App.dll"))?
//!     .with_options(RenderOptions { hex_case: HexCase::Lower });
//! session.dump(TableId::MethodDef, &mut std::io::stdout())?;
//! # Ok::<(), dotdump::Error>(())
//! ```

pub use crate::{Delta, Error, HeapKind, Result, Session, TableDump};

pub use crate::File;

pub use crate::metadata::{
    store::{MetadataStore, RowStore},
    tables::{TableId, TableRow},
    token::{decode as decode_token, Token},
};

pub use crate::render::{HexCase, RenderOptions, TableRenderer};
