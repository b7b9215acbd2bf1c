//! Prefix tree construction and the tree description format.
//!
//! A description is the pre-order walk of the tree written MSB-first: a `1`
//! bit followed by a `Symbol::BITS` wide code point for a leaf, a `0` bit
//! followed by the left and then the right subtree for an internal node. The
//! single-symbol tree is written as its lone leaf.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::{HuffmanError, Result};
use crate::frequency::{FreqTable, count_frequencies};
use crate::symbol::Symbol;

/// Deepest leaf a tree description may contain.
pub const MAX_CODE_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    /// `right` is `None` only at the root of a single-symbol tree.
    Internal {
        weight: u64,
        left: Box<Node<S>>,
        right: Option<Box<Node<S>>>,
    },
}

impl<S> Node<S> {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    fn merge(left: Node<S>, right: Node<S>) -> Node<S> {
        Node::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    fn single(leaf: Node<S>) -> Node<S> {
        Node::Internal {
            weight: leaf.weight(),
            left: Box::new(leaf),
            right: None,
        }
    }
}

/// Priority queue entry. Ordered so that `BinaryHeap` pops the lowest weight
/// first and, among equal weights, the entry inserted first.
struct HeapNode<S> {
    weight: u64,
    seq: u64,
    node: Node<S>,
}

impl<S> Ord for HeapNode<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for HeapNode<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> PartialEq for HeapNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<S> Eq for HeapNode<S> {}

/// A prefix tree whose root is always an internal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    pub fn from_symbols(input: &[S]) -> Result<Self> {
        Self::from_frequencies(&count_frequencies(input))
    }

    /// Builds the minimum-redundancy tree for `frequencies`.
    ///
    /// Leaves enter the queue in ascending symbol order and every merged node
    /// takes the next sequence number, so equal weights always resolve the
    /// same way. The first node popped becomes the left child.
    pub fn from_frequencies(frequencies: &FreqTable<S>) -> Result<Self> {
        if frequencies.len() == 1 {
            if let Some((&symbol, &weight)) = frequencies.iter().next() {
                return Ok(HuffmanTree {
                    root: Node::single(Node::Leaf { symbol, weight }),
                });
            }
        }

        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        let mut seq = 0u64;
        for (&symbol, &weight) in frequencies {
            heap.push(HeapNode {
                weight,
                seq,
                node: Node::Leaf { symbol, weight },
            });
            seq += 1;
        }

        let root = loop {
            let Some(left) = heap.pop() else {
                return Err(HuffmanError::EmptyInput);
            };
            let Some(right) = heap.pop() else {
                break left.node;
            };

            let node = Node::merge(left.node, right.node);
            heap.push(HeapNode {
                weight: node.weight(),
                seq,
                node,
            });
            seq += 1;
        };

        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        fn walk<S>(node: &Node<S>) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => {
                    let right = right.as_deref().map_or(0, walk);
                    1 + walk(left).max(right)
                }
            }
        }
        walk(&self.root)
    }

    /// Leaf symbols in left-to-right order.
    pub fn symbols(&self) -> Vec<S> {
        fn walk<S: Copy>(node: &Node<S>, out: &mut Vec<S>) {
            match node {
                Node::Leaf { symbol, .. } => out.push(*symbol),
                Node::Internal { left, right, .. } => {
                    walk(left, out);
                    if let Some(right) = right {
                        walk(right, out);
                    }
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.symbols().len()
    }

    pub fn write_to<W: BitWrite>(&self, writer: &mut W) -> Result<()> {
        match &self.root {
            Node::Internal { left, right: None, .. } => write_node(left, writer),
            root => write_node(root, writer),
        }
    }

    /// Reads one description, leaving `reader` just past its last bit.
    pub fn read_from<R: BitRead>(reader: &mut R) -> Result<Self> {
        let mut seen = HashSet::new();
        let root = match read_node(reader, 0, &mut seen)? {
            leaf @ Node::Leaf { .. } => Node::single(leaf),
            internal => internal,
        };
        Ok(HuffmanTree { root })
    }

    /// Serializes the tree on its own, padded to a whole byte.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = BitWriter::endian(Vec::new(), BigEndian);
        self.write_to(&mut writer)?;
        writer.byte_align()?;
        Ok(writer.into_writer())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
        let tree = Self::read_from(&mut reader)?;
        reader.byte_align();

        let consumed = reader.into_reader().position() as usize;
        if consumed != bytes.len() {
            return Err(HuffmanError::corrupt_tree(format!(
                "{} trailing bytes after tree description",
                bytes.len() - consumed
            )));
        }
        Ok(tree)
    }
}

fn write_node<S: Symbol, W: BitWrite>(node: &Node<S>, writer: &mut W) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            writer.write_bit(true)?;
            writer.write(S::BITS, symbol.to_code_point())?;
        }
        Node::Internal { left, right, .. } => {
            writer.write_bit(false)?;
            write_node(left, writer)?;
            if let Some(right) = right {
                write_node(right, writer)?;
            }
        }
    }
    Ok(())
}

fn read_node<S: Symbol, R: BitRead>(
    reader: &mut R,
    depth: usize,
    seen: &mut HashSet<S>,
) -> Result<Node<S>> {
    if depth > MAX_CODE_LEN {
        return Err(HuffmanError::corrupt_tree(format!(
            "tree is deeper than {} levels",
            MAX_CODE_LEN
        )));
    }

    let is_leaf = reader
        .read_bit()
        .map_err(|_| HuffmanError::corrupt_tree("description ends before the tree is complete"))?;

    if is_leaf {
        let value = reader
            .read::<u32>(S::BITS)
            .map_err(|_| HuffmanError::corrupt_tree("description ends inside a leaf symbol"))?;
        let symbol = S::from_code_point(value).ok_or_else(|| {
            HuffmanError::corrupt_tree(format!("code point {:#x} is not a valid symbol", value))
        })?;
        if !seen.insert(symbol) {
            return Err(HuffmanError::corrupt_tree(format!(
                "symbol {:?} appears more than once",
                symbol
            )));
        }
        return Ok(Node::Leaf { symbol, weight: 0 });
    }

    let left = read_node(reader, depth + 1, seen)?;
    let right = read_node(reader, depth + 1, seen)?;
    Ok(Node::Internal {
        weight: 0,
        left: Box::new(left),
        right: Some(Box::new(right)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_table::build_code_table;

    #[test]
    fn test_empty_frequencies() {
        let freq = FreqTable::<u8>::new();
        assert_eq!(
            HuffmanTree::from_frequencies(&freq),
            Err(HuffmanError::EmptyInput)
        );
    }

    #[test]
    fn test_weights_sum_up() {
        let tree = HuffmanTree::from_symbols(b"AAAAABBC").unwrap();
        assert_eq!(tree.root().weight(), 8);
        match tree.root() {
            Node::Internal {
                left,
                right: Some(right),
                ..
            } => {
                assert_eq!(left.weight(), 3);
                assert_eq!(right.weight(), 5);
            }
            other => panic!("unexpected root: {other:?}"),
        }
    }

    #[test]
    fn test_single_symbol_tree() {
        let tree = HuffmanTree::from_symbols(b"AAAA").unwrap();
        match tree.root() {
            Node::Internal {
                weight: 4,
                left,
                right: None,
            } => assert_eq!(**left, Node::Leaf { symbol: b'A', weight: 4 }),
            other => panic!("unexpected root: {other:?}"),
        }
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_equal_weights_follow_insertion_order() {
        // a..h all weigh 1; leaves pair up in symbol order.
        let tree = HuffmanTree::from_symbols(b"abcdefgh").unwrap();
        assert_eq!(tree.symbols(), b"abcdefgh".to_vec());
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_description_layout() {
        let tree = HuffmanTree::from_symbols(b"AAAAABBC").unwrap();
        // 0 0 1'C' 1'B' 1'A' = 2 + 3 * 9 bits = 29 bits -> 4 bytes
        let bytes = tree.to_bytes().unwrap();
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes[0] >> 6, 0b00);
    }

    #[test]
    fn test_description_round_trip() {
        let tree = HuffmanTree::from_symbols(&"hello huffman".chars().collect::<Vec<_>>()).unwrap();
        let rebuilt = HuffmanTree::<char>::from_bytes(&tree.to_bytes().unwrap()).unwrap();
        assert_eq!(build_code_table(&tree), build_code_table(&rebuilt));
        assert_eq!(rebuilt.root().weight(), 0);
    }

    #[test]
    fn test_single_symbol_description() {
        let tree = HuffmanTree::from_symbols(b"zz").unwrap();
        let bytes = tree.to_bytes().unwrap();
        assert_eq!(bytes, vec![0b1011_1101, 0b0000_0000]);
        let rebuilt = HuffmanTree::<u8>::from_bytes(&bytes).unwrap();
        assert_eq!(build_code_table(&rebuilt), build_code_table(&tree));
    }

    #[test]
    fn test_incomplete_description() {
        // internal node, then a leaf cut off after six of its eight bits
        let err = HuffmanTree::<u8>::from_bytes(&[0b0101_0000]).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptTree { reason } if reason.contains("inside a leaf")));
    }

    #[test]
    fn test_duplicate_leaf() {
        let mut writer = BitWriter::endian(Vec::new(), BigEndian);
        writer.write_bit(false).unwrap();
        for _ in 0..2 {
            writer.write_bit(true).unwrap();
            writer.write(8, b'A' as u32).unwrap();
        }
        writer.byte_align().unwrap();
        let err = HuffmanTree::<u8>::from_bytes(&writer.into_writer()).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptTree { reason } if reason.contains("more than once")));
    }

    #[test]
    fn test_invalid_char_code_point() {
        let mut writer = BitWriter::endian(Vec::new(), BigEndian);
        writer.write_bit(true).unwrap();
        writer.write(21, 0xD800u32).unwrap();
        writer.byte_align().unwrap();
        let err = HuffmanTree::<char>::from_bytes(&writer.into_writer()).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptTree { .. }));
    }

    #[test]
    fn test_too_deep() {
        let bytes = vec![0u8; MAX_CODE_LEN / 8 + 2];
        let err = HuffmanTree::<u8>::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptTree { reason } if reason.contains("deeper")));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = HuffmanTree::from_symbols(b"ab").unwrap().to_bytes().unwrap();
        bytes.push(0xFF);
        assert!(HuffmanTree::<u8>::from_bytes(&bytes).is_err());
    }
}
