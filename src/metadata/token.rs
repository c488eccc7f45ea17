//! Metadata tokens and their human readable form.
//!
//! A token is a 32-bit value whose high byte selects a table and whose low 24 bits hold a
//! 1-based row index (ECMA-335 II.22). [`decode`] turns any 32-bit value into the
//! `"<TableName> <row>"` form used throughout the dump output. It never fails: table bytes that
//! do not name a table are printed as hex.

use std::fmt;

use crate::metadata::tables::TableId;

/// A metadata token
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// Wrap a raw token value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// The raw value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The table index byte
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The table, if the index byte names one
    #[must_use]
    pub fn table_id(&self) -> Option<TableId> {
        TableId::from_index(self.table())
    }

    /// The 1-based row index
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// `true` for the null token
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// The `"<TableName> <row>"` form of this token
    #[must_use]
    pub fn decode(&self) -> String {
        decode(self.0)
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Render `token` as `"<TableName> <row>"`.
///
/// Total over all inputs: an index byte without a table is rendered as `0x<HH>`.
///
/// ```rust
/// use dotdump::metadata::token::decode;
///
/// assert_eq!(decode(0x2300_0005), "AssemblyRef 5");
/// assert_eq!(decode(0x0600_0010), "Method 16");
/// assert_eq!(decode(0x2D00_0001), "0x2D 1");
/// ```
#[must_use]
pub fn decode(token: u32) -> String {
    let token = Token(token);
    match token.table_id() {
        Some(table) => format!("{} {}", table.name(), token.row()),
        None => format!("0x{:02X} {}", token.table(), token.row()),
    }
}
