use crate::bits::{BitPacker, BitUnpacker, parse_bit_string, to_bit_string};
use crate::code_table::{Code, CodeTable, build_code_table};
use crate::container::Container;
use crate::error::{HuffmanError, Result};
use crate::frequency::FreqTable;
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// A trained model: a prefix tree and the code table derived from it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec<S> {
    tree: HuffmanTree<S>,
    table: CodeTable<S>,
}

impl<S: Symbol> HuffmanCodec<S> {
    /// Trains a model on `input`.
    pub fn fit(input: &[S]) -> Result<Self> {
        Ok(Self::from_tree(HuffmanTree::from_symbols(input)?))
    }

    pub fn from_frequencies(frequencies: &FreqTable<S>) -> Result<Self> {
        Ok(Self::from_tree(HuffmanTree::from_frequencies(frequencies)?))
    }

    pub fn from_tree(tree: HuffmanTree<S>) -> Self {
        let table = build_code_table(&tree);
        HuffmanCodec { tree, table }
    }

    pub fn tree(&self) -> &HuffmanTree<S> {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable<S> {
        &self.table
    }

    pub fn code(&self, symbol: S) -> Result<&Code> {
        self.table
            .get(&symbol)
            .ok_or_else(|| HuffmanError::unknown_symbol(symbol))
    }

    /// Sum of the code lengths of `input`.
    pub fn encoded_bit_len(&self, input: &[S]) -> Result<u64> {
        input.iter().try_fold(0u64, |total, &symbol| {
            Ok(total + self.code(symbol)?.len() as u64)
        })
    }

    pub fn encode(&self, input: &[S]) -> Result<Container<S>> {
        if input.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut packer = BitPacker::new();
        for &symbol in input {
            packer.push_code(self.code(symbol)?)?;
        }
        let payload = packer.finish()?;

        Ok(Container::new(
            input.len() as u64,
            self.tree.to_bytes()?,
            payload,
        ))
    }

    pub fn encode_to_bit_string(&self, input: &[S]) -> Result<String> {
        let mut text = String::new();
        for &symbol in input {
            text.push_str(&to_bit_string(self.code(symbol)?.bits()));
        }
        Ok(text)
    }

    /// Decodes a string of '0'/'1' with this model's tree.
    ///
    /// The string must end on a code boundary.
    pub fn decode_bit_string(&self, text: &str) -> Result<Vec<S>> {
        let bits = parse_bit_string(text)?;
        let mut walk = TreeWalk::new(&self.tree);
        let mut output = Vec::new();

        for (offset, bit) in bits.into_iter().enumerate() {
            if let Some(symbol) = walk.step(bit, offset as u64)? {
                output.push(symbol);
            }
        }

        if !walk.at_root() {
            let decoded = output.len() as u64;
            return Err(HuffmanError::TruncatedStream {
                expected: decoded + 1,
                decoded,
            });
        }
        Ok(output)
    }
}

/// Rebuilds the tree stored in `container` and walks the payload with it.
///
/// Stops after exactly `symbol_count` symbols; pad bits are never read.
pub fn decode<S: Symbol>(container: &Container<S>) -> Result<Vec<S>> {
    let tree = HuffmanTree::<S>::from_bytes(container.tree_description())?;
    let expected = container.symbol_count();

    // Every symbol costs at least one bit.
    let capacity = expected.min(container.payload_bits()) as usize;
    let mut output = Vec::with_capacity(capacity);

    let mut bits = BitUnpacker::new(container.payload());
    let mut walk = TreeWalk::new(&tree);
    while (output.len() as u64) < expected {
        let Some(bit) = bits.next_bit() else {
            return Err(HuffmanError::TruncatedStream {
                expected,
                decoded: output.len() as u64,
            });
        };
        if let Some(symbol) = walk.step(bit, bits.bits_read() - 1)? {
            output.push(symbol);
        }
    }
    Ok(output)
}

pub fn compress<S: Symbol>(input: &[S]) -> Result<Container<S>> {
    HuffmanCodec::fit(input)?.encode(input)
}

pub fn decompress<S: Symbol>(container: &Container<S>) -> Result<Vec<S>> {
    decode(container)
}

/// Cursor over a tree that returns to the root after every leaf.
struct TreeWalk<'t, S> {
    root: &'t Node<S>,
    node: &'t Node<S>,
}

impl<'t, S: Symbol> TreeWalk<'t, S> {
    fn new(tree: &'t HuffmanTree<S>) -> Self {
        TreeWalk {
            root: tree.root(),
            node: tree.root(),
        }
    }

    fn at_root(&self) -> bool {
        std::ptr::eq(self.root, self.node)
    }

    fn step(&mut self, bit: bool, bit_offset: u64) -> Result<Option<S>> {
        let node: &'t Node<S> = self.node;
        let next = match node {
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                        .as_deref()
                        .ok_or(HuffmanError::UnassignedCode { bit_offset })?
                } else {
                    &**left
                }
            }
            Node::Leaf { .. } => {
                return Err(HuffmanError::corrupt_tree("tree root is a leaf"));
            }
        };

        match next {
            Node::Leaf { symbol, .. } => {
                self.node = self.root;
                Ok(Some(*symbol))
            }
            Node::Internal { .. } => {
                self.node = next;
                Ok(None)
            }
        }
    }
}
