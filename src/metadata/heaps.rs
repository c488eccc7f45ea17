//! Heap chains and the heap resolver.
//!
//! A [`HeapChain`] owns the segments of one heap kind: the base image's heap, followed by the
//! heap of every applied EnC delta. A delta segment continues the index space where the previous
//! segment ends, by byte offset for `#Strings` and `#Blob` and by entry count for `#GUID`.
//!
//! [`HeapResolver`] is the view the renderer uses. It maps index 0 to an absent value and
//! forwards every other index to the store.

use std::fmt;

use crate::{
    metadata::{
        store::MetadataStore,
        streams::{Blob, Guid, Strings},
    },
    Error, HeapKind, Result,
};

#[derive(Clone)]
struct HeapSegment {
    start: usize,
    data: Vec<u8>,
}

/// The chained segments of one heap
#[derive(Clone)]
pub struct HeapChain {
    kind: HeapKind,
    segments: Vec<HeapSegment>,
}

impl HeapChain {
    /// An empty chain for heaps of `kind`
    #[must_use]
    pub fn new(kind: HeapKind) -> Self {
        HeapChain {
            kind,
            segments: Vec::new(),
        }
    }

    /// The heap kind of this chain
    #[must_use]
    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    /// First index past the chain: bytes for `#Strings` and `#Blob`, entries for `#GUID`
    #[must_use]
    pub fn end(&self) -> usize {
        self.segments
            .last()
            .map_or(0, |segment| segment.start + self.extent(&segment.data))
    }

    /// Number of segments
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Append a segment that continues at [`HeapChain::end`]
    ///
    /// # Errors
    /// Returns an error if a `#GUID` segment is not a whole number of entries
    pub fn push(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        if self.kind == HeapKind::Guid {
            Guid::from(data)?;
        }

        self.segments.push(HeapSegment {
            start: self.end(),
            data: data.to_vec(),
        });
        Ok(())
    }

    fn extent(&self, data: &[u8]) -> usize {
        match self.kind {
            HeapKind::Guid => data.len() / 16,
            HeapKind::Strings | HeapKind::Blob => data.len(),
        }
    }

    fn locate(&self, index: u32) -> Result<(&[u8], usize)> {
        let position = index as usize;
        for segment in &self.segments {
            let local = match self.kind {
                // 1-based within each segment
                HeapKind::Guid if position > segment.start => position - segment.start,
                HeapKind::Strings | HeapKind::Blob if position >= segment.start => {
                    position - segment.start
                }
                _ => continue,
            };

            let in_range = match self.kind {
                HeapKind::Guid => local <= self.extent(&segment.data),
                HeapKind::Strings | HeapKind::Blob => local < segment.data.len(),
            };
            if in_range {
                return Ok((&segment.data, local));
            }
        }

        Err(Error::HeapIndex {
            heap: self.kind,
            index,
        })
    }

    /// The string at `index`
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] if no segment holds `index`, or an error if the string is malformed
    pub fn string(&self, index: u32) -> Result<&str> {
        let (data, local) = self.locate(index)?;
        Strings::from(data)?.get(local)
    }

    /// The blob at `index`
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] if no segment holds `index`, or an error if the blob is truncated
    pub fn blob(&self, index: u32) -> Result<&[u8]> {
        let (data, local) = self.locate(index)?;
        Blob::from(data)?.get(local)
    }

    /// The GUID at 1-based `index`
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] if no segment holds `index`
    pub fn guid(&self, index: u32) -> Result<uguid::Guid> {
        let (data, local) = self.locate(index)?;
        Guid::from(data)?.get(local)
    }
}

/// A resolved GUID heap reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidValue {
    /// Index 0, no GUID
    None,
    /// A GUID from the heap, possibly all zero
    Some(uguid::Guid),
}

impl fmt::Display for GuidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidValue::None => write!(f, "none"),
            GuidValue::Some(guid) => write!(f, "{guid}"),
        }
    }
}

/// Resolves heap indexes of a [`MetadataStore`]
pub struct HeapResolver<'a, S: MetadataStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: MetadataStore + ?Sized> HeapResolver<'a, S> {
    /// A resolver over `store`
    pub fn new(store: &'a S) -> Self {
        HeapResolver { store }
    }

    /// The string at `index`, empty for index 0
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] for an out of range index
    pub fn resolve_string(&self, index: u32) -> Result<&'a str> {
        if index == 0 {
            return Ok("");
        }

        self.store.string(index)
    }

    /// The blob at `index`, empty for index 0
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] for an out of range index
    pub fn resolve_blob(&self, index: u32) -> Result<&'a [u8]> {
        if index == 0 {
            return Ok(&[]);
        }

        self.store.blob(index)
    }

    /// The GUID at `index`, [`GuidValue::None`] for index 0
    ///
    /// # Errors
    /// Returns [`Error::HeapIndex`] for an out of range index
    pub fn resolve_guid(&self, index: u32) -> Result<GuidValue> {
        if index == 0 {
            return Ok(GuidValue::None);
        }

        Ok(GuidValue::Some(self.store.guid(index)?))
    }
}
