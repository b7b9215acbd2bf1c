use crate::code_table::CodeTable;
use crate::container::Container;
use crate::frequency::{FreqTable, entropy_from_freq};
use crate::symbol::Symbol;

/// Size and efficiency figures for one compressed input.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionStats {
    pub symbols: u64,
    pub distinct_symbols: usize,
    /// Sum of code lengths over the input, pad bits excluded.
    pub encoded_bits: u64,
    /// Size of the whole persisted container.
    pub container_bytes: usize,
    /// Bytes the input takes at `Symbol::BITS` bits per symbol.
    pub raw_bytes: u64,
    /// Bits per symbol.
    pub entropy: f64,
    /// Bits per symbol.
    pub average_code_length: f64,
}

impl CompressionStats {
    pub fn measure<S: Symbol>(
        frequencies: &FreqTable<S>,
        table: &CodeTable<S>,
        container: &Container<S>,
    ) -> Self {
        let symbols: u64 = frequencies.values().sum();
        let encoded_bits: u64 = frequencies
            .iter()
            .map(|(symbol, &count)| count * table.get(symbol).map_or(0, |code| code.len() as u64))
            .sum();
        let average_code_length = if symbols > 0 {
            encoded_bits as f64 / symbols as f64
        } else {
            0.0
        };

        CompressionStats {
            symbols,
            distinct_symbols: frequencies.len(),
            encoded_bits,
            container_bytes: container.byte_len(),
            raw_bytes: (symbols * S::BITS as u64).div_ceil(8),
            entropy: entropy_from_freq(frequencies),
            average_code_length,
        }
    }

    /// Space saved by the container relative to the raw input, in percent.
    pub fn ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        100.0 * (1.0 - self.container_bytes as f64 / self.raw_bytes as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::HuffmanCodec;
    use crate::frequency::count_frequencies;

    #[test]
    fn test_measure_skewed() {
        let input = b"AAAAABBC";
        let codec = HuffmanCodec::fit(input).unwrap();
        let container = codec.encode(input).unwrap();
        let stats =
            CompressionStats::measure(&count_frequencies(input), codec.code_table(), &container);

        assert_eq!(stats.symbols, 8);
        assert_eq!(stats.distinct_symbols, 3);
        assert_eq!(stats.encoded_bits, 11);
        assert_eq!(stats.raw_bytes, 8);
        assert_eq!(stats.container_bytes, container.to_bytes().len());
        assert!((stats.average_code_length - 11.0 / 8.0).abs() < 1e-9);
        assert!(stats.entropy <= stats.average_code_length);
    }

    #[test]
    fn test_ratio_on_repetitive_input() {
        let input = vec![b'x'; 4096];
        let codec = HuffmanCodec::fit(&input).unwrap();
        let container = codec.encode(&input).unwrap();
        let stats =
            CompressionStats::measure(&count_frequencies(&input), codec.code_table(), &container);
        assert!(stats.ratio() > 80.0);
    }
}
