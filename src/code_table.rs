use std::collections::BTreeMap;
use std::fmt;

use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// A codeword: the root-to-leaf path of a symbol, `false` = left, `true` = right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Code { bits: Vec::new() }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Code { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns a copy of this code extended by one bit.
    fn with(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }

    /// True when `self` is a (not necessarily proper) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

pub type CodeTable<S> = BTreeMap<S, Code>;

/// Assigns every leaf of `tree` the bits of its root-to-leaf path.
pub fn build_code_table<S: Symbol>(tree: &HuffmanTree<S>) -> CodeTable<S> {
    let mut table = CodeTable::new();
    assign_codes(tree.root(), Code::new(), &mut table);
    table
}

fn assign_codes<S: Symbol>(node: &Node<S>, prefix: Code, table: &mut CodeTable<S>) {
    match node {
        Node::Leaf { symbol, .. } => {
            table.insert(*symbol, prefix);
        }
        Node::Internal { left, right, .. } => {
            assign_codes(left, prefix.with(false), table);
            if let Some(right) = right {
                assign_codes(right, prefix.with(true), table);
            }
        }
    }
}

/// Checks that no code in `table` is a prefix of another.
pub fn is_prefix_free<S: Symbol>(table: &CodeTable<S>) -> bool {
    // In lexicographic order a prefix sorts directly before the codes it prefixes.
    let mut codes: Vec<&Code> = table.values().collect();
    codes.sort_by(|a, b| a.bits.cmp(&b.bits));
    codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
}
