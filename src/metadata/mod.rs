//! Metadata parsing and the row store for .NET modules.
//!
//! This module reads the ECMA-335 metadata of a module into an owned [`store::RowStore`] and
//! applies Edit and Continue deltas on top of it.
//!
//! # Key Components
//!
//! - [`root`] - The `BSJB` metadata root and its stream directory
//! - [`streams`] - The tables stream and the `#Strings`, `#Blob` and `#GUID` heaps
//! - [`tables`] - Table identifiers, column layouts and typed rows
//! - [`image`] - One parsed metadata image, base or delta
//! - [`store`] - The [`store::MetadataStore`] trait and the owned [`store::RowStore`]
//! - [`heaps`] - Chained heap segments and the [`heaps::HeapResolver`]
//! - [`delta`] - EnC delta application
//! - [`token`] - Metadata tokens and their `"<TableName> <row>"` form
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotdump::metadata::{store::{MetadataStore, RowStore}, tables::TableId};
//!
//! let data = std::fs::read("App.dmeta")?;
//! let store = RowStore::from_image(&data)?;
//! println!("EncLog rows: {}", store.row_count(TableId::EncLog));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Implementation of the Header of CIL
pub mod cor20header;
/// EnC delta application
pub mod delta;
/// Chained heaps and heap index resolution
pub mod heaps;
/// Strong name identities and public key tokens
pub mod identity;
/// A parsed metadata image
pub mod image;
/// Implementation of the MethodHeader of CIL
pub mod method;
/// Implementation of the root metadata structure
pub mod root;
/// The row store
pub mod store;
/// Implementation of all metadata streams (tables, heaps, etc.)
pub mod streams;
/// Implementation of the .NET metadata tables
pub mod tables;
/// Commonly used metadata token type
pub mod token;
