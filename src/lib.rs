//! Huffman compression for character data.
//!
//! [`compress`] turns raw bytes into a bit-packed payload plus the code table
//! needed to read it back; [`decompress`] reverses it. The [`files`] module
//! wraps both with the on-disk layout used by the `encode` and `decode`
//! binaries.

pub mod codebook;
pub mod codec;
pub mod error;
pub mod files;
pub mod huffman;
pub mod symbols;

use log::info;

pub use crate::codebook::CodeBook;
pub use crate::error::{HuffmanError, Result};
pub use crate::huffman::CodeTable;
pub use crate::symbols::{FreqTable, Symbol};

use crate::codec::{decode_data, encode_data};
use crate::huffman::{build_code_table, build_huffman_tree};
use crate::symbols::{count_frequencies, split_symbols};

/// Output of [`compress`]. The two halves only make sense together.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub payload: Vec<u8>,
    pub code_book: CodeBook,
    pub frequencies: FreqTable,
}

pub fn compress(input: &[u8]) -> Result<Compressed> {
    if input.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }

    let symbols = split_symbols(input);
    let frequencies = count_frequencies(&symbols);
    let tree = build_huffman_tree(&frequencies)?;
    let table = build_code_table(&tree);
    let payload = encode_data(&symbols, &table)?;

    info!(
        "Compressed {} bytes ({} symbols) into {} bytes.",
        input.len(),
        symbols.len(),
        payload.len()
    );
    Ok(Compressed {
        payload,
        code_book: CodeBook::new(table, symbols.len() as u64),
        frequencies,
    })
}

pub fn decompress(payload: &[u8], code_book: &CodeBook) -> Result<Vec<u8>> {
    let output = decode_data(payload, code_book)?;
    info!(
        "Decompressed {} bytes into {} bytes.",
        payload.len(),
        output.len()
    );
    Ok(output)
}
