//! The `AssemblyRef` table (0x23), ECMA-335 II.22.5.
//!
//! `public_key_or_token` holds the full public key when [`crate::metadata::tables::AssemblyFlags::PUBLIC_KEY`]
//! is set, otherwise the 8-byte public key token.

mod raw;

pub use raw::*;
