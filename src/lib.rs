//! # huffpack
//!
//! Huffman compression of fully buffered inputs into a self-describing
//! container.
//!
//! ```rust
//! let input = b"AAAAABBC";
//! let container = huffpack::compress(input)?;
//! let bytes = container.to_bytes();
//!
//! let restored = huffpack::Container::<u8>::from_bytes(&bytes)?;
//! assert_eq!(huffpack::decompress(&restored)?, input.to_vec());
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! Symbols are bytes (`u8`) or Unicode scalar values (`char`); see [`Symbol`].

pub mod bits;
pub mod cli;
pub mod code_table;
pub mod codec;
pub mod container;
pub mod error;
pub mod file;
pub mod frequency;
pub mod stats;
pub mod symbol;
pub mod tree;

pub use code_table::{Code, CodeTable, build_code_table, is_prefix_free};
pub use codec::{HuffmanCodec, compress, decode, decompress};
pub use container::Container;
pub use error::{HuffmanError, Result};
pub use file::{FileError, FileReport, SymbolMode, compress_file, decompress_file};
pub use frequency::{FreqTable, count_frequencies, entropy_from_freq, merge_frequencies};
pub use stats::CompressionStats;
pub use symbol::Symbol;
pub use tree::{HuffmanTree, Node};
