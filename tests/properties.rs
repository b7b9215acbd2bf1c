//! Property-based checks of the coding laws.

use proptest::prelude::*;

use huffpack::{
    Container, HuffmanCodec, HuffmanTree, build_code_table, compress, count_frequencies,
    decompress, is_prefix_free, merge_frequencies,
};

/// Short alphabets so that repeated symbols and skewed counts are common.
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![4 => Just(b'a'), 2 => Just(b'b'), 1 => any::<u8>()], 1..512)
}

proptest! {
    #[test]
    fn prop_round_trip_bytes(input in prop::collection::vec(any::<u8>(), 1..2048)) {
        let bytes = compress(&input).unwrap().to_bytes();
        let container = Container::<u8>::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decompress(&container).unwrap(), input);
    }

    #[test]
    fn prop_round_trip_skewed(input in skewed_bytes()) {
        prop_assert_eq!(decompress(&compress(&input).unwrap()).unwrap(), input);
    }

    #[test]
    fn prop_round_trip_chars(text in "\\PC{1,200}") {
        let input: Vec<char> = text.chars().collect();
        prop_assert_eq!(decompress(&compress(&input).unwrap()).unwrap(), input);
    }

    #[test]
    fn prop_codes_are_prefix_free(input in prop::collection::vec(any::<u8>(), 1..1024)) {
        let codec = HuffmanCodec::fit(&input).unwrap();
        let table = codec.code_table();
        prop_assert!(is_prefix_free(table));
        prop_assert_eq!(table.len(), count_frequencies(&input).len());
        prop_assert!(table.values().all(|code| !code.is_empty()));
    }

    #[test]
    fn prop_payload_matches_code_lengths(input in skewed_bytes()) {
        let codec = HuffmanCodec::fit(&input).unwrap();
        let bits = codec.encoded_bit_len(&input).unwrap();
        let container = codec.encode(&input).unwrap();
        prop_assert_eq!(container.payload().len() as u64, bits.div_ceil(8));
        prop_assert!(bits <= 8 * input.len() as u64);
    }

    #[test]
    fn prop_deterministic(input in prop::collection::vec(any::<u8>(), 1..512)) {
        prop_assert_eq!(compress(&input).unwrap(), compress(&input).unwrap());
    }

    #[test]
    fn prop_tree_description_round_trip(input in prop::collection::vec(any::<u8>(), 1..512)) {
        let tree = HuffmanTree::from_symbols(&input).unwrap();
        let rebuilt = HuffmanTree::<u8>::from_bytes(&tree.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(build_code_table(&tree), build_code_table(&rebuilt));
    }

    #[test]
    fn prop_sharded_counts_merge(input in prop::collection::vec(any::<u8>(), 0..512), split in 0usize..512) {
        let split = split.min(input.len());
        let (left, right) = input.split_at(split);
        let mut merged = count_frequencies(left);
        merge_frequencies(&mut merged, &count_frequencies(right));
        prop_assert_eq!(merged, count_frequencies(&input));
    }

    #[test]
    fn prop_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(container) = Container::<u8>::from_bytes(&bytes) {
            let _ = decompress(&container);
        }
    }
}
