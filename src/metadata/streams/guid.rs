//! GUID heap (`#GUID`), ECMA-335 II.24.2.5.
//!
//! A packed array of 16-byte GUIDs addressed by 1-based index; index 0 means "no GUID".

use crate::{Error::OutOfBounds, Result};

/// View over one `#GUID` heap segment
pub struct Guid<'a> {
    data: &'a [u8],
}

impl<'a> Guid<'a> {
    /// Create a view over `data`
    ///
    /// # Errors
    /// Returns an error if `data` is not a whole number of GUIDs
    pub fn from(data: &'a [u8]) -> Result<Guid<'a>> {
        if data.len() % 16 != 0 {
            return Err(malformed_error!(
                "#GUID heap size {} is not a multiple of 16",
                data.len()
            ));
        }

        Ok(Guid { data })
    }

    /// Number of GUIDs in the segment
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.len() / 16
    }

    /// The GUID at 1-based `index`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for index 0 or past the last GUID
    pub fn get(&self, index: usize) -> Result<uguid::Guid> {
        if index < 1 || index > self.count() {
            return Err(OutOfBounds);
        }

        let offset_start = (index - 1) * 16;

        let mut buffer = [0u8; 16];
        buffer.copy_from_slice(&self.data[offset_start..offset_start + 16]);

        Ok(uguid::Guid::from_bytes(buffer))
    }
}
