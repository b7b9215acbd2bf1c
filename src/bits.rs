//! Packing codewords into bytes and unpacking them again, MSB first.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code_table::Code;
use crate::error::{HuffmanError, Result};

pub struct BitPacker {
    writer: BitWriter<Vec<u8>, BigEndian>,
    bit_count: u64,
}

impl BitPacker {
    pub fn new() -> Self {
        BitPacker {
            writer: BitWriter::endian(Vec::new(), BigEndian),
            bit_count: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) -> Result<()> {
        self.writer.write_bit(bit)?;
        self.bit_count += 1;
        Ok(())
    }

    pub fn push_code(&mut self, code: &Code) -> Result<()> {
        for &bit in code.bits() {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Zero-pads the final partial byte and returns the packed bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.writer.byte_align()?;
        Ok(self.writer.into_writer())
    }
}

impl Default for BitPacker {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BitUnpacker<'a> {
    reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
    bits_read: u64,
}

impl<'a> BitUnpacker<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitUnpacker {
            reader: BitReader::endian(Cursor::new(bytes), BigEndian),
            bits_read: 0,
        }
    }

    /// Next bit, or `None` once every byte has been consumed.
    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = self.reader.read_bit().ok()?;
        self.bits_read += 1;
        Some(bit)
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }
}

/// Renders bits as a string of '0' and '1'.
pub fn to_bit_string(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}

pub fn parse_bit_string(text: &str) -> Result<Vec<bool>> {
    text.chars()
        .enumerate()
        .map(|(position, character)| match character {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(HuffmanError::InvalidBit {
                character,
                position,
            }),
        })
        .collect()
}
