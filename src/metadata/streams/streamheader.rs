use crate::{file::io::read_le, Error::OutOfBounds, Result};

/// Stream names accepted in the metadata root.
///
/// `#-` is the uncompressed tables stream used by EnC-capable images, `#JTD` marks a minimal
/// delta and `#Pdb` appears in portable PDB images.
pub const STREAM_NAMES: [&str; 8] = [
    "#~", "#-", "#Strings", "#US", "#Blob", "#GUID", "#JTD", "#Pdb",
];

/// A stream header of the metadata root, ECMA-335 II.24.2.2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    /// Offset of the stream relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Name of the stream
    pub name: String,
}

impl StreamHeader {
    /// Parse a stream header at the start of `data`
    ///
    /// # Errors
    /// Returns an error if `data` is too short or the name is not a known stream
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        if data.len() < 9 {
            return Err(OutOfBounds);
        }

        let name_bytes = &data[8..std::cmp::min(data.len(), 8 + 32)];
        let Some(name_len) = name_bytes.iter().position(|byte| *byte == 0) else {
            return Err(malformed_error!("Unterminated stream header name"));
        };

        let name = String::from_utf8_lossy(&name_bytes[..name_len]).into_owned();
        if !STREAM_NAMES.contains(&name.as_str()) {
            return Err(malformed_error!("Invalid stream header name - {}", name));
        }

        Ok(StreamHeader {
            offset: read_le::<u32>(data)?,
            size: read_le::<u32>(&data[4..])?,
            name,
        })
    }

    /// Bytes this header occupies in the root, the name padded to 4
    #[must_use]
    pub fn header_size(&self) -> usize {
        8 + ((self.name.len() + 1 + 3) & !3)
    }
}
