//! Reading inputs from disk and writing containers back, and the reverse.
//!
//! This layer owns file I/O, error translation and logging; the pipeline it
//! drives never touches the filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info, trace};
use thiserror::Error;

use crate::codec::{HuffmanCodec, decompress};
use crate::container::Container;
use crate::error::HuffmanError;
use crate::frequency::count_frequencies;
use crate::stats::CompressionStats;
use crate::symbol::Symbol;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: not valid UTF-8, use --symbols=bytes", .path.display())]
    NotUtf8 { path: PathBuf },

    #[error("unknown symbol alphabet {tag} in container header")]
    UnknownAlphabet { tag: u8 },

    #[error(transparent)]
    Codec(#[from] HuffmanError),
}

/// Alphabet a file is read as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SymbolMode {
    #[default]
    Bytes,
    /// Unicode scalar values of a UTF-8 file.
    Chars,
}

impl SymbolMode {
    pub fn tag(self) -> u8 {
        match self {
            SymbolMode::Bytes => <u8 as Symbol>::TAG,
            SymbolMode::Chars => <char as Symbol>::TAG,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        [SymbolMode::Bytes, SymbolMode::Chars]
            .into_iter()
            .find(|mode| mode.tag() == tag)
    }
}

impl FromStr for SymbolMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bytes" => Ok(SymbolMode::Bytes),
            "chars" => Ok(SymbolMode::Chars),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub symbols: SymbolMode,
    /// Only set when compressing.
    pub stats: Option<CompressionStats>,
    /// (symbol, code) pairs in symbol order. Only set when compressing.
    pub code_table: Vec<(String, String)>,
}

fn read(path: &Path) -> Result<Vec<u8>, FileError> {
    fs::read(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    fs::write(path, bytes).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn compress_file(
    input: &Path,
    output: &Path,
    mode: SymbolMode,
) -> Result<FileReport, FileError> {
    info!("Reading input file: {}", input.display());
    let raw = read(input)?;
    debug!("Input size: {} bytes, alphabet: {:?}", raw.len(), mode);

    let (container, stats, code_table) = match mode {
        SymbolMode::Bytes => compress_symbols(&raw)?,
        SymbolMode::Chars => {
            let text = std::str::from_utf8(&raw).map_err(|_| FileError::NotUtf8 {
                path: input.to_path_buf(),
            })?;
            let symbols: Vec<char> = text.chars().collect();
            compress_symbols(&symbols)?
        }
    };

    info!("Writing container to: {}", output.display());
    write(output, &container)?;

    Ok(FileReport {
        input_bytes: raw.len() as u64,
        output_bytes: container.len() as u64,
        symbols: mode,
        stats: Some(stats),
        code_table,
    })
}

fn compress_symbols<S: Symbol>(
    symbols: &[S],
) -> Result<(Vec<u8>, CompressionStats, Vec<(String, String)>), HuffmanError> {
    let start_time = Instant::now();

    let freq = count_frequencies(symbols);
    debug!("Unique symbols: {}", freq.len());

    let codec = HuffmanCodec::from_frequencies(&freq)?;
    debug!("Tree built, longest code: {} bits", codec.tree().depth());
    for (symbol, code) in codec.code_table() {
        trace!("Code for {:?}: '{}'", symbol, code);
    }

    let container = codec.encode(symbols)?;
    let stats = CompressionStats::measure(&freq, codec.code_table(), &container);
    debug!(
        "Encoded {} symbols into {} bits in {:.2?}",
        stats.symbols,
        stats.encoded_bits,
        start_time.elapsed()
    );

    let code_table = codec
        .code_table()
        .iter()
        .map(|(symbol, code)| (format!("{:?}", symbol), code.to_string()))
        .collect();

    Ok((container.to_bytes(), stats, code_table))
}

pub fn decompress_file(input: &Path, output: &Path) -> Result<FileReport, FileError> {
    info!("Reading container: {}", input.display());
    let raw = read(input)?;

    let tag = Container::<u8>::peek_symbol_tag(&raw)?;
    let mode = SymbolMode::from_tag(tag).ok_or(FileError::UnknownAlphabet { tag })?;
    debug!("Container size: {} bytes, alphabet: {:?}", raw.len(), mode);

    let start_time = Instant::now();
    let decoded = match mode {
        SymbolMode::Bytes => decompress(&Container::<u8>::from_bytes(&raw)?)?,
        SymbolMode::Chars => decompress(&Container::<char>::from_bytes(&raw)?)?
            .into_iter()
            .collect::<String>()
            .into_bytes(),
    };
    debug!("Decoded {} bytes in {:.2?}", decoded.len(), start_time.elapsed());

    info!("Writing decoded output to: {}", output.display());
    write(output, &decoded)?;

    Ok(FileReport {
        input_bytes: raw.len() as u64,
        output_bytes: decoded.len() as u64,
        symbols: mode,
        stats: None,
        code_table: Vec::new(),
    })
}
