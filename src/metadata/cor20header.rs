//! The CLR runtime header (`IMAGE_COR20_HEADER`, ECMA-335 II.25.3.3).
//!
//! Only the leading fields are decoded: the metadata directory is all a dump needs, the remaining
//! directories (resources, strong name, vtable fixups) are skipped.

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// The leading part of the CLR runtime header
pub struct Cor20Header {
    /// Size of the header in bytes, always 72
    pub cb: u32,
    /// Minimum major runtime version required
    pub major_runtime_version: u16,
    /// Minor portion of the runtime version
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata in bytes
    pub meta_data_size: u32,
    /// Runtime image flags
    pub flags: u32,
    /// Entry point token, or native entry point RVA
    pub entry_point_token: u32,
}

impl Cor20Header {
    /// Parse the header from the start of `data`
    ///
    /// # Errors
    /// Returns an error if `data` is too short, `cb` is not 72, or the metadata
    /// directory is empty
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        if data.len() < 72 {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb != 72 {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;

        let meta_data_rva = parser.read_le::<u32>()?;
        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_rva == 0 || meta_data_size == 0 {
            return Err(malformed_error!(
                "Metadata directory is empty - rva {:#x}, size {}",
                meta_data_rva,
                meta_data_size
            ));
        }

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags: parser.read_le::<u32>()?,
            entry_point_token: parser.read_le::<u32>()?,
        })
    }
}
