// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # dotdump
//!
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/dotdump/blob/main/LICENSE-APACHE)
//!
//! A dumper for the ECMA-335 metadata tables of .NET modules. `dotdump` reads the tables and
//! heaps of a module, optionally applies an Edit and Continue (EnC) delta on top of it, and
//! renders selected tables as plain text with strings, blobs, GUIDs and tokens resolved.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotdump::prelude::*;
//! use std::path::Path;
//!
//! let session = Session::open(Path::new("App.dll"))?;
//! for (table, rows) in session.tables() {
//!     println!("{table}: {rows} rows");
//! }
//! session.dump(TableId::TypeDef, &mut std::io::stdout())?;
//! # Ok::<(), dotdump::Error>(())
//! ```
//!
//! ### Applying a delta
//!
//! EnC deltas come as a pair of files, the delta metadata (`.dmeta`) and the delta IL (`.dil`).
//! The merged tables show the module as it is after the edit, with `EncLog` and `EncMap` taken
//! from the delta:
//!
//! ```rust,no_run
//! use dotdump::{metadata::tables::TableId, Session};
//! use std::path::Path;
//!
//! let session = Session::open_with_delta(
//!     Path::new("App.dll"),
//!     Path::new("App.1.dmeta"),
//!     Path::new("App.1.dil"),
//! )?;
//! session.dump(TableId::EncLog, &mut std::io::stdout())?;
//! # Ok::<(), dotdump::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`file`] - Loading PE images and bare metadata images
//! - [`metadata`] - Streams, tables, heap chains, the row store and delta merging
//! - [`render`] - The text renderer and hex dumps
//! - [`Session`] - Opening a module once and dumping tables from it
//! - [`Error`] and [`Result`] - Error handling
//!
//! Tables without a renderer fail with [`Error::UnimplementedTable`] and leave other tables
//! unaffected.

#[macro_use]
pub(crate) mod error;

pub mod file;
pub mod metadata;
pub mod prelude;
pub mod render;

mod session;

#[cfg(test)]
mod test;

/// `dotdump` Result type
pub type Result<T> = std::result::Result<T, Error>;

pub use error::{Error, HeapKind};
pub use file::{parser::Parser, File};
pub use session::{Delta, Session, TableDump};
