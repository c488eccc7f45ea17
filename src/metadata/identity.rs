//! Strong name identities of assemblies.
//!
//! An `AssemblyRef` carries either the full public key of the referenced assembly or its 8-byte
//! public key token. The token is the last 8 bytes of the key's hash, in reverse order.

use md5::{Digest, Md5};
use sha1::Sha1;

use crate::{file::io::read_le, metadata::tables::AssemblyHashAlgorithm, Error, Result};

/// Identity of an assembly, either a full public key or its token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// A full public key
    PubKey(Vec<u8>),
    /// A public key token, read big-endian so `{:016x}` prints the bytes in stored order
    Token(u64),
}

impl Identity {
    /// Build an identity from a `PublicKeyOrToken` blob
    ///
    /// # Errors
    /// Returns an error if `is_pub` is false and `data` is shorter than 8 bytes
    pub fn from(data: &[u8], is_pub: bool) -> Result<Self> {
        Ok(if is_pub {
            Identity::PubKey(data.to_vec())
        } else {
            let Some(bytes) = data.get(..8).and_then(|bytes| <[u8; 8]>::try_from(bytes).ok())
            else {
                return Err(Error::OutOfBounds);
            };
            Identity::Token(u64::from_be_bytes(bytes))
        })
    }

    /// The public key token, hashing a full key with `algo`
    ///
    /// # Errors
    /// Returns [`Error::NotSupported`] for hash algorithms other than MD5 and SHA1
    pub fn to_token(&self, algo: u32) -> Result<u64> {
        match &self {
            Identity::PubKey(data) => match algo {
                AssemblyHashAlgorithm::MD5 => {
                    let mut hasher = Md5::new();
                    hasher.update(data);
                    let result = hasher.finalize();

                    read_le::<u64>(&result[result.len() - 8..])
                }
                AssemblyHashAlgorithm::SHA1 => {
                    let mut hasher = Sha1::new();
                    hasher.update(data);
                    let result = hasher.finalize();

                    read_le::<u64>(&result[result.len() - 8..])
                }
                _ => Err(Error::NotSupported),
            },
            Identity::Token(token) => Ok(*token),
        }
    }
}
