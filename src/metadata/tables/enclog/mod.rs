//! The `EncLog` table (0x1E), the Edit and Continue log.
//!
//! One row per edit of an EnC generation: the token touched and the operation applied to it.

mod raw;

pub use raw::*;

use std::fmt;

/// The operation an `EncLog` row records
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FuncCode {
    /// The row was created or updated in place
    Default,
    /// A method was added to the type named by the token
    AddMethod,
    /// A field was added to the type named by the token
    AddField,
    /// A parameter was added to the method named by the token
    AddParameter,
    /// A property was added to the property map named by the token
    AddProperty,
    /// An event was added to the event map named by the token
    AddEvent,
    /// A value this crate does not know
    Unknown(u32),
}

impl FuncCode {
    /// The raw value
    #[must_use]
    pub fn value(&self) -> u32 {
        match self {
            FuncCode::Default => 0,
            FuncCode::AddMethod => 1,
            FuncCode::AddField => 2,
            FuncCode::AddParameter => 3,
            FuncCode::AddProperty => 4,
            FuncCode::AddEvent => 5,
            FuncCode::Unknown(value) => *value,
        }
    }
}

impl From<u32> for FuncCode {
    fn from(value: u32) -> Self {
        match value {
            0 => FuncCode::Default,
            1 => FuncCode::AddMethod,
            2 => FuncCode::AddField,
            3 => FuncCode::AddParameter,
            4 => FuncCode::AddProperty,
            5 => FuncCode::AddEvent,
            other => FuncCode::Unknown(other),
        }
    }
}

impl fmt::Display for FuncCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuncCode::Unknown(_) => write!(f, "Unknown ({})", self.value()),
            known => write!(f, "{:?} ({})", known, known.value()),
        }
    }
}
