//! String heap (`#Strings`), ECMA-335 II.24.2.3.
//!
//! NUL-terminated UTF-8 strings addressed by byte offset. In a full image the heap starts with a
//! single NUL byte so that offset 0 is the empty string. Heap segments of an EnC delta continue
//! the base heap and carry no such byte.

use std::{ffi::CStr, str};

use crate::{Error::OutOfBounds, Result};

/// View over one `#Strings` heap segment
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Create a view over `data`
    ///
    /// # Errors
    /// Returns an error if `data` is empty
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if data.is_empty() {
            return Err(malformed_error!("Provided #Strings heap is empty"));
        }

        Ok(Strings { data })
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

    /// The string starting at byte offset `index`
    ///
    /// # Errors
    /// Returns an error if `index` is out of range, the string is not terminated, or not UTF-8
    pub fn get(&self, index: usize) -> Result<&'a str> {
        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        match CStr::from_bytes_until_nul(&self.data[index..]) {
            Ok(result) => match result.to_str() {
                Ok(result) => Ok(result),
                Err(_) => Err(malformed_error!("Invalid UTF-8 string at index - {}", index)),
            },
            Err(_) => Err(malformed_error!("Unterminated string at index - {}", index)),
        }
    }
}
