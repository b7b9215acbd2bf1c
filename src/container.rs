//! The persisted container.
//!
//! ```text
//! offset  size  field
//! 0       3     magic "HUF"
//! 3       1     format version
//! 4       1     symbol alphabet tag
//! 5       8     symbol count, u64 big-endian
//! 13      var   tree description, byte-aligned
//! ..      rest  packed payload
//! ```

use std::io::{Cursor, Read};
use std::marker::PhantomData;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;
use crate::tree::HuffmanTree;

pub const MAGIC: &[u8; 3] = b"HUF";
pub const FORMAT_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 13;

/// Tree description, symbol count and packed payload of one compressed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<S> {
    symbol_count: u64,
    tree: Vec<u8>,
    payload: Vec<u8>,
    _symbol: PhantomData<S>,
}

impl<S: Symbol> Container<S> {
    pub(crate) fn new(symbol_count: u64, tree: Vec<u8>, payload: Vec<u8>) -> Self {
        Container {
            symbol_count,
            tree,
            payload,
            _symbol: PhantomData,
        }
    }

    pub fn symbol_count(&self) -> u64 {
        self.symbol_count
    }

    pub fn tree_description(&self) -> &[u8] {
        &self.tree
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_bits(&self) -> u64 {
        self.payload.len() as u64 * 8
    }

    /// Size of the persisted form in bytes.
    pub fn byte_len(&self) -> usize {
        HEADER_LEN + self.tree.len() + self.payload.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        bytes.extend_from_slice(MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.push(S::TAG);
        bytes.extend_from_slice(&self.symbol_count.to_be_bytes());
        bytes.extend_from_slice(&self.tree);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let tag = Self::peek_symbol_tag(bytes)?;
        if tag != S::TAG {
            return Err(HuffmanError::invalid_header(format!(
                "container holds alphabet {}, expected {}",
                tag,
                S::TAG
            )));
        }

        let mut cursor = Cursor::new(bytes);
        cursor.set_position(5);
        let mut count_bytes = [0u8; 8];
        cursor
            .read_exact(&mut count_bytes)
            .map_err(|_| HuffmanError::invalid_header("missing symbol count"))?;
        let symbol_count = u64::from_be_bytes(count_bytes);

        // The description is self-delimiting: parse it to find where it ends.
        let body = &bytes[HEADER_LEN..];
        let mut reader = BitReader::endian(Cursor::new(body), BigEndian);
        HuffmanTree::<S>::read_from(&mut reader)?;
        reader.byte_align();
        let tree_len = reader.into_reader().position() as usize;

        Ok(Container::new(
            symbol_count,
            body[..tree_len].to_vec(),
            body[tree_len..].to_vec(),
        ))
    }

    /// Reads the alphabet tag without decoding anything else.
    pub fn peek_symbol_tag(bytes: &[u8]) -> Result<u8> {
        if bytes.len() < HEADER_LEN {
            return Err(HuffmanError::invalid_header(format!(
                "{} bytes is shorter than the {} byte header",
                bytes.len(),
                HEADER_LEN
            )));
        }
        if &bytes[..3] != MAGIC {
            return Err(HuffmanError::invalid_header("bad magic"));
        }
        if bytes[3] != FORMAT_VERSION {
            return Err(HuffmanError::invalid_header(format!(
                "unsupported format version {}",
                bytes[3]
            )));
        }
        Ok(bytes[4])
    }
}
