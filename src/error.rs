use thiserror::Error;

use crate::metadata::tables::TableId;

/// Helper macro for creating `Malformed` errors with the current source location.
///
/// ```rust,ignore
/// return Err(malformed_error!("Invalid stream count - {}", count));
/// ```
macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// Helper macro for creating `InconsistentDelta` errors.
macro_rules! delta_error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        crate::Error::InconsistentDelta(format!($fmt $(, $arg)*))
    };
}

/// The heap an index points into, used for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapKind {
    /// `#Strings`
    Strings,
    /// `#Blob`
    Blob,
    /// `#GUID`
    Guid,
}

impl std::fmt::Display for HeapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeapKind::Strings => write!(f, "#Strings"),
            HeapKind::Blob => write!(f, "#Blob"),
            HeapKind::Guid => write!(f, "#GUID"),
        }
    }
}

/// The generic Error type, which provides coverage for all errors this library can return
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Other errors that don't fit other categories
    #[error("{0}")]
    Error(String),

    /// Error from the goblin crate during PE parsing
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// The selected table has no rendering support
    #[error("Table {0} is not implemented")]
    UnimplementedTable(TableId),

    /// A non-zero heap index points past the end of its heap
    #[error("Index 0x{index:08x} is out of range for the {heap} heap")]
    HeapIndex {
        /// The heap that was accessed
        heap: HeapKind,
        /// The offending index
        index: u32,
    },

    /// A row index points past the end of its table
    #[error("Row {rid} is out of range for table {table}")]
    RowIndex {
        /// The table that was accessed
        table: TableId,
        /// The offending row
        rid: u32,
    },

    /// A failure while rendering a specific row
    #[error("{table} row {rid}: {source}")]
    Row {
        /// The table being rendered
        table: TableId,
        /// The row being rendered
        rid: u32,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// The EnC delta does not line up with the base module
    #[error("Inconsistent delta - {0}")]
    InconsistentDelta(String),
}
