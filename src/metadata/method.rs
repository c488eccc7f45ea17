//! Method body headers, ECMA-335 II.25.4.
//!
//! Only the header is decoded: enough to know where the IL of a body starts and ends. EnC deltas
//! ship new bodies in the delta IL stream and point at them through `MethodDef.RVA`.

use bitflags::bitflags;

use crate::{file::io::read_le, Error::OutOfBounds, Result};

bitflags! {
    #[derive(PartialEq, Eq)]
    /// Flags of a method body header
    pub struct MethodBodyFlags: u16 {
        /// Tiny method header format
        const TINY_FORMAT = 0x2;
        /// Fat method header format
        const FAT_FORMAT = 0x3;
        /// Flag of the fat method header, showing that there are more data sections appended to the header
        const MORE_SECTS = 0x8;
        /// Flag to indicate that this method should call the default constructor on all local variables
        const INIT_LOCALS = 0x10;
    }
}

/// A parsed method body header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBody {
    /// Size of the IL code in bytes
    pub size_code: usize,
    /// Size of the header in bytes
    pub size_header: usize,
    /// `StandAloneSig` token of the local variables, 0 if there are none
    pub local_var_sig_token: u32,
    /// Maximum evaluation stack depth
    pub max_stack: usize,
    /// `true` for the fat header format
    pub is_fat: bool,
    /// `true` if locals are zero initialized
    pub is_init_local: bool,
    /// `true` if extra data sections follow the code
    pub has_sections: bool,
}

impl MethodBody {
    /// Parse the header at the start of `data` and check the code fits
    ///
    /// # Errors
    /// Returns an error if `data` is empty, the header format is unknown, or the code is truncated
    pub fn from(data: &[u8]) -> Result<MethodBody> {
        if data.is_empty() {
            return Err(malformed_error!("Provided data for body parsing is empty"));
        }

        let first_byte = read_le::<u8>(data)?;
        match MethodBodyFlags::from_bits_truncate(u16::from(first_byte & 0b_00000011_u8)) {
            MethodBodyFlags::TINY_FORMAT => {
                let size_code = (first_byte >> 2) as usize;
                if size_code + 1 > data.len() {
                    return Err(OutOfBounds);
                }

                Ok(MethodBody {
                    size_code,
                    size_header: 1,
                    local_var_sig_token: 0,
                    max_stack: 8,
                    is_fat: false,
                    is_init_local: false,
                    has_sections: false,
                })
            }
            MethodBodyFlags::FAT_FORMAT => {
                if data.len() < 12 {
                    return Err(OutOfBounds);
                }

                let first_duo = read_le::<u16>(data)?;

                let size_header = (first_duo >> 12) as usize * 4;
                if size_header < 12 {
                    return Err(malformed_error!(
                        "Fat method header is too small - {}",
                        size_header
                    ));
                }

                let size_code = read_le::<u32>(&data[4..])? as usize;
                match size_code.checked_add(size_header) {
                    Some(size) if size <= data.len() => {}
                    _ => return Err(OutOfBounds),
                }

                let flags_header =
                    MethodBodyFlags::from_bits_truncate(first_duo & 0b_0000111111111111_u16);

                Ok(MethodBody {
                    size_code,
                    size_header,
                    local_var_sig_token: read_le::<u32>(&data[8..])?,
                    max_stack: read_le::<u16>(&data[2..])? as usize,
                    is_fat: true,
                    is_init_local: flags_header.contains(MethodBodyFlags::INIT_LOCALS),
                    has_sections: flags_header.contains(MethodBodyFlags::MORE_SECTS),
                })
            }
            _ => Err(malformed_error!(
                "MethodHeader is neither FAT nor TINY - {}",
                first_byte
            )),
        }
    }

    /// Size of header and code
    #[must_use]
    pub fn size(&self) -> usize {
        self.size_code + self.size_header
    }

    /// The IL code of this body within `data`, the slice the header was parsed from
    #[must_use]
    pub fn code<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.size_header..self.size()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny() {
        // ldstr, call, ret
        let data = [0x2E, 0x72, 0x01, 0x00, 0x00, 0x70, 0x28, 0x01, 0x00, 0x00, 0x0A, 0x2A];

        let method_header = MethodBody::from(&data).unwrap();

        assert!(!method_header.is_fat);
        assert!(!method_header.has_sections);
        assert_eq!(method_header.size_code, 11);
        assert_eq!(method_header.size_header, 1);
        assert_eq!(method_header.size(), 12);
        assert_eq!(method_header.max_stack, 8);
        assert_eq!(method_header.code(&data), &data[1..]);
    }

    #[test]
    fn fat() {
        #[rustfmt::skip]
        let data = [
            0x1B, 0x30,                 // flags + size
            0x02, 0x00,                 // max stack
            0x02, 0x00, 0x00, 0x00,     // code size
            0x01, 0x00, 0x00, 0x11,     // local var sig token
            0x00, 0x2A,
        ];

        let method_header = MethodBody::from(&data).unwrap();

        assert!(method_header.is_fat);
        assert!(method_header.is_init_local);
        assert!(method_header.has_sections);
        assert_eq!(method_header.size_header, 12);
        assert_eq!(method_header.size_code, 2);
        assert_eq!(method_header.max_stack, 2);
        assert_eq!(method_header.local_var_sig_token, 0x11000001);
        assert_eq!(method_header.code(&data), &[0x00, 0x2A]);
    }

    #[test]
    fn invalid() {
        assert!(MethodBody::from(&[]).is_err());
        // neither tiny nor fat
        assert!(MethodBody::from(&[0x00, 0x2A]).is_err());
        // tiny, code runs past the end
        assert!(MethodBody::from(&[0x0E, 0x00]).is_err());
        // fat, code runs past the end
        assert!(MethodBody::from(&[
            0x13, 0x30, 0x02, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2A
        ])
        .is_err());
    }
}
