use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::symbols::{FreqTable, Symbol};

/// Symbol -> code made of '0' and '1' characters.
pub type CodeTable = HashMap<Symbol, String>;

/// Code handed to the sole symbol of a one-leaf tree.
pub const SINGLE_SYMBOL_CODE: &str = "0";

#[derive(Debug, Eq, PartialEq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }
}

pub type HuffmanTree = Node;

#[derive(Eq, PartialEq)]
struct HeapNode {
    freq: u64,
    seq: u64,
    node: Box<Node>,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lightest node; older nodes win ties.
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Greedy Huffman construction.
///
/// Leaves enter the queue in ascending symbol order, so the same table
/// always yields the same tree. The first node popped in a merge becomes the
/// left child.
pub fn build_huffman_tree(frequencies: &FreqTable) -> Result<Box<HuffmanTree>> {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );

    let mut freq_vec: Vec<_> = frequencies.iter().collect();
    freq_vec.sort_by(|a, b| a.0.cmp(b.0));

    let mut heap = BinaryHeap::with_capacity(freq_vec.len());
    let mut seq = 0u64;

    for (symbol, &freq) in freq_vec {
        heap.push(HeapNode {
            freq,
            seq,
            node: Box::new(Node::Leaf {
                symbol: symbol.clone(),
                freq,
            }),
        });
        seq += 1;
    }
    trace!("Initial heap size: {}", heap.len());

    loop {
        let Some(left) = heap.pop() else {
            return Err(HuffmanError::EmptyInput);
        };
        let Some(right) = heap.pop() else {
            debug!("Tree construction complete, root weight {}.", left.freq);
            return Ok(left.node);
        };

        let freq = left.freq + right.freq;
        heap.push(HeapNode {
            freq,
            seq,
            node: Box::new(Node::Internal {
                freq,
                left: left.node,
                right: right.node,
            }),
        });
        seq += 1;
    }
}

/// Walks the tree depth-first, '0' to the left and '1' to the right.
pub fn build_code_table(root: &Node) -> CodeTable {
    let mut table = CodeTable::new();

    if let Node::Leaf { symbol, .. } = root {
        debug!("Tree has a single leaf, assigning code '{}'.", SINGLE_SYMBOL_CODE);
        table.insert(symbol.clone(), SINGLE_SYMBOL_CODE.to_string());
        return table;
    }

    let mut stack: Vec<(&Node, String)> = vec![(root, String::new())];
    while let Some((node, prefix)) = stack.pop() {
        match node {
            Node::Leaf { symbol, .. } => {
                trace!(
                    "Assigning code to symbol {} ('{}') : '{}'",
                    hex::encode(symbol),
                    String::from_utf8_lossy(symbol).escape_debug(),
                    prefix
                );
                table.insert(symbol.clone(), prefix);
            }
            Node::Internal { left, right, .. } => {
                stack.push((right.as_ref(), format!("{}1", prefix)));
                stack.push((left.as_ref(), format!("{}0", prefix)));
            }
        }
    }

    debug!("Code table built with {} entries.", table.len());
    table
}

/// True when no code is a prefix of another. Codes are compared after
/// sorting, where a prefix always sits right before one of its extensions.
pub fn is_prefix_free<'a, I>(codes: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let mut sorted: Vec<&String> = codes.into_iter().collect();
    sorted.sort();
    sorted.windows(2).all(|pair| !pair[1].starts_with(pair[0].as_str()))
}
