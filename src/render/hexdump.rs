use std::io::Write;

use crate::render::HexCase;

/// Write `bytes` as rows of 16, each row prefixed by a newline and its offset within `bytes`.
///
/// ```text
///
/// 0x00000000: 00 24 00 00 04 80 00 00 94 00 00 00 06 02 00 00
/// 0x00000010: 00 24 00 00
/// ```
///
/// Every byte is followed by a single space, including the last one of a row. Offsets are always
/// lowercase, the byte case follows `case`.
///
/// # Errors
/// Returns the error of the underlying writer
pub fn hexdump<W: Write + ?Sized>(sink: &mut W, bytes: &[u8], case: HexCase) -> std::io::Result<()> {
    for (offset, byte) in bytes.iter().enumerate() {
        if offset % 16 == 0 {
            write!(sink, "\n0x{offset:08x}: ")?;
        }

        match case {
            HexCase::Upper => write!(sink, "{byte:02X} ")?,
            HexCase::Lower => write!(sink, "{byte:02x} ")?,
        }
    }

    Ok(())
}
