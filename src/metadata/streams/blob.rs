//! Blob heap (`#Blob`), ECMA-335 II.24.2.4.
//!
//! Each entry is a compressed length (1, 2 or 4 bytes) followed by that many bytes. A zero
//! length entry is valid and distinct from the absent index 0.

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// View over one `#Blob` heap segment
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Create a view over `data`
    ///
    /// # Errors
    /// Returns an error if `data` is empty
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if data.is_empty() {
            return Err(malformed_error!("Provided #Blob heap is empty"));
        }

        Ok(Blob { data })
    }

    /// Size of the segment in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the segment holds no bytes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The blob whose length prefix starts at byte offset `index`
    ///
    /// # Errors
    /// Returns an error if `index` or the blob's extent leave the segment
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(&self.data[index..]);
        let len = parser.read_compressed_uint()? as usize;
        let skip = parser.pos();

        let Some(data_start) = index.checked_add(skip) else {
            return Err(OutOfBounds);
        };

        let Some(data_end) = data_start.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if data_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[data_start..data_end])
    }
}
