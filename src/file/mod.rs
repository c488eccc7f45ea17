//! Input file handling.
//!
//! A [`File`] owns the raw bytes of an input, either memory mapped from disk or handed over as a
//! buffer, and knows where the CLI metadata inside those bytes lives. Two shapes are accepted:
//!
//! - a PE image with a CLR runtime header (data directory 14), parsed with `goblin`
//! - a bare metadata image starting with the `BSJB` signature, which is the form an
//!   Edit-and-Continue `.dmeta` delta takes
//!
//! The reads in [`io`] and the cursor in [`parser`] are shared by all metadata parsers.

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    metadata::{cor20header::Cor20Header, root::CIL_HEADER_MAGIC},
    Error::{Empty, GoblinErr, NotSupported},
    Result,
};
use goblin::pe::PE;
use io::read_le;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Storage a [`File`] reads from
pub trait Backend: Send + Sync {
    /// Get a bounds-checked slice of the data
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range leaves the data
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// All of the data
    fn data(&self) -> &[u8];

    /// Length of the data
    fn len(&self) -> usize;
}

/// A loaded input file
#[self_referencing]
pub struct File {
    data: Box<dyn Backend>,
    #[borrows(data)]
    #[not_covariant]
    pe: Option<PE<'this>>,
}

impl File {
    /// Memory map and load the file at `file`
    ///
    /// # Errors
    /// Returns an error if the file can not be opened, or is neither a managed PE nor a
    /// bare metadata image
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Load from an owned buffer
    ///
    /// # Errors
    /// Returns an error if the buffer is neither a managed PE nor a bare metadata image
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| {
            let data = data.as_ref();
            if matches!(read_le::<u32>(data.data()), Ok(CIL_HEADER_MAGIC)) {
                return Ok(None);
            }

            match PE::parse(data.data()) {
                Ok(pe) => match pe.header.optional_header {
                    Some(optional_header) => {
                        if optional_header
                            .data_directories
                            .get_clr_runtime_header()
                            .is_none()
                        {
                            Err(NotSupported)
                        } else {
                            Ok(Some(pe))
                        }
                    }
                    None => Err(malformed_error!("File does not have an OptionalHeader")),
                },
                Err(error) => Err(GoblinErr(error)),
            }
        })
    }

    /// Size of the loaded data
    #[must_use]
    pub fn len(&self) -> usize {
        self.with_data(|data| data.len())
    }

    /// `true` if no data is loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if the input was a PE image rather than a bare metadata image
    #[must_use]
    pub fn is_pe(&self) -> bool {
        self.with_pe(|pe| pe.is_some())
    }

    /// RVA and size of the CLR runtime header, for PE inputs
    #[must_use]
    pub fn clr(&self) -> Option<(usize, usize)> {
        self.with_pe(|pe| {
            let optional_header = pe.as_ref()?.header.optional_header?;
            optional_header
                .data_directories
                .get_clr_runtime_header()
                .map(|dir| (dir.virtual_address as usize, dir.size as usize))
        })
    }

    /// All loaded bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// A bounds-checked slice of the loaded bytes
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range leaves the data
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// Translate a relative virtual address into a file offset
    ///
    /// # Errors
    /// Returns an error if no section contains `rva`, or the input is not a PE image
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        self.with_pe(|pe| {
            let Some(pe) = pe else {
                return Err(malformed_error!(
                    "RVA {:#x} can not be translated without a PE image",
                    rva
                ));
            };

            let rva_u32 =
                u32::try_from(rva).map_err(|_| malformed_error!("RVA too large - {}", rva))?;

            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }

    /// The CLI metadata (starting at the `BSJB` root) contained in this file
    ///
    /// # Errors
    /// Returns an error if the CLR header or the metadata directory point outside the file
    pub fn metadata(&self) -> Result<&[u8]> {
        let Some((clr_rva, clr_size)) = self.clr() else {
            return Ok(self.data());
        };

        let clr_offset = self.rva_to_offset(clr_rva)?;
        let header = Cor20Header::read(self.data_slice(clr_offset, clr_size)?)?;

        let meta_offset = self.rva_to_offset(header.meta_data_rva as usize)?;
        log::debug!(
            "metadata at rva {:#x}, file offset {:#x}, {} bytes",
            header.meta_data_rva,
            meta_offset,
            header.meta_data_size
        );

        self.data_slice(meta_offset, header.meta_data_size as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_metadata() {
        let data = vec![0x42, 0x53, 0x4A, 0x42, 0x01, 0x00, 0x01, 0x00];
        let file = File::from_mem(data.clone()).unwrap();

        assert!(!file.is_pe());
        assert!(file.clr().is_none());
        assert_eq!(file.len(), 8);
        assert_eq!(file.metadata().unwrap(), data.as_slice());
        assert!(file.rva_to_offset(0x2000).is_err());
    }

    #[test]
    fn empty() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Empty)));
    }

    #[test]
    fn garbage() {
        assert!(File::from_mem(vec![0xCC; 128]).is_err());
    }
}
