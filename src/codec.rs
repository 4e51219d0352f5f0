//! Bit packing of Huffman codes.
//!
//! Payload layout: the first 8 bits hold the number of zero bits appended at
//! the end, followed by the codes of every symbol in input order, then the
//! padding. Bits are packed most significant first.

use std::time::Instant;

use log::{debug, trace};

use crate::codebook::CodeBook;
use crate::error::{HuffmanError, Result};
use crate::huffman::CodeTable;

pub fn encode_data(symbols: &[&[u8]], code_table: &CodeTable) -> Result<Vec<u8>> {
    debug!("Starting data encoding...");
    let mut bits: Vec<u8> = Vec::with_capacity(symbols.len() * 8);

    for &symbol in symbols {
        let Some(code) = code_table.get(symbol) else {
            return Err(HuffmanError::Encoding(format!(
                "symbol {} has no code",
                hex::encode(symbol)
            )));
        };
        bits.extend(code.bytes().map(|c| c - b'0'));
    }

    let padding = (8 - bits.len() % 8) % 8;
    trace!("Encoded {} data bits, padding {}.", bits.len(), padding);
    bits.resize(bits.len() + padding, 0);

    let mut bytes = Vec::with_capacity(1 + bits.len() / 8);
    bytes.push(padding as u8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for &bit in chunk {
            byte = (byte << 1) | bit;
        }
        bytes.push(byte);
    }

    debug!("Payload size: {} bytes.", bytes.len());
    Ok(bytes)
}

/// Reverses [`encode_data`].
///
/// A header of 8 is read as a trailing byte made only of padding.
pub fn decode_data(encoded: &[u8], code_book: &CodeBook) -> Result<Vec<u8>> {
    debug!("Starting bitstream decoding...");
    let start_time = Instant::now();

    let Some((&padding, body)) = encoded.split_first() else {
        return Err(HuffmanError::Decoding("payload is empty".into()));
    };
    let padding = padding as usize;
    let total_bits = body.len() * 8;
    if padding > 8 {
        return Err(HuffmanError::Decoding(format!(
            "padding header {} is out of range",
            padding
        )));
    }
    if padding > total_bits {
        return Err(HuffmanError::Decoding(format!(
            "padding header {} exceeds the {} data bits present",
            padding, total_bits
        )));
    }

    let mut bits = Vec::with_capacity(total_bits);
    for &byte in body {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    trace!("Expanded {} bytes into {} bits.", body.len(), bits.len());

    let data_len = total_bits - padding;
    if bits[data_len..].iter().any(|&bit| bit != 0) {
        return Err(HuffmanError::Decoding("padding bits are not zero".into()));
    }
    if data_len == 0 {
        return Err(HuffmanError::Decoding("payload holds no symbols".into()));
    }

    let reverse_table = code_book.inverse();
    let max_code_len = code_book.max_code_len();
    debug!(
        "Reverse lookup table created. Entries: {}",
        reverse_table.len()
    );

    let mut result = Vec::new();
    let mut decoded_symbols = 0u64;
    let mut current_code = String::with_capacity(max_code_len);

    for &bit in &bits[..data_len] {
        current_code.push(if bit == 1 { '1' } else { '0' });
        if let Some(symbol) = reverse_table.get(current_code.as_str()) {
            result.extend_from_slice(symbol);
            decoded_symbols += 1;
            current_code.clear();
        } else if current_code.len() >= max_code_len {
            return Err(HuffmanError::Decoding(format!(
                "bit sequence '{}' matches no code",
                current_code
            )));
        }
    }

    if !current_code.is_empty() {
        return Err(HuffmanError::Decoding(format!(
            "stream ends inside a code ('{}' left over)",
            current_code
        )));
    }
    if let Some(expected) = code_book.symbol_count {
        if expected != decoded_symbols {
            return Err(HuffmanError::Decoding(format!(
                "expected {} symbols, payload holds {}",
                expected, decoded_symbols
            )));
        }
    }

    debug!(
        "Bitstream decoding finished in {:.2?}.",
        start_time.elapsed()
    );
    debug!("Final decoded data size: {} bytes.", result.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(pairs: &[(&str, &str)], count: Option<u64>) -> CodeBook {
        let entries = pairs
            .iter()
            .map(|(symbol, code)| (symbol.as_bytes().to_vec(), code.to_string()))
            .collect();
        CodeBook {
            entries,
            symbol_count: count,
        }
    }

    fn abracadabra(count: Option<u64>) -> CodeBook {
        book(
            &[("a", "0"), ("b", "110"), ("r", "111"), ("c", "100"), ("d", "101")],
            count,
        )
    }

    fn symbols(text: &str) -> Vec<&[u8]> {
        crate::symbols::split_symbols(text.as_bytes())
    }

    #[test]
    fn packs_abracadabra_msb_first() {
        let payload = encode_data(&symbols("abracadabra"), &abracadabra(None).entries).unwrap();
        // 23 data bits: 01101110 10001010 1101110 + one pad bit.
        assert_eq!(payload, vec![0x01, 0x6E, 0x8A, 0xDC]);
    }

    #[test]
    fn decodes_abracadabra() {
        let decoded = decode_data(&[0x01, 0x6E, 0x8A, 0xDC], &abracadabra(Some(11))).unwrap();
        assert_eq!(decoded, b"abracadabra");
    }

    #[test]
    fn byte_aligned_stream_has_zero_padding() {
        let table = book(&[("a", "0"), ("b", "1")], None);
        let payload = encode_data(&symbols("abababab"), &table.entries).unwrap();
        assert_eq!(payload, vec![0x00, 0x55]);
        assert_eq!(decode_data(&payload, &table).unwrap(), b"abababab");
    }

    #[test]
    fn header_of_eight_drops_a_whole_byte() {
        let table = book(&[("a", "0"), ("b", "1")], None);
        let decoded = decode_data(&[0x08, 0x55, 0x00], &table).unwrap();
        assert_eq!(decoded, b"abababab");
    }

    #[test]
    fn missing_symbol_is_an_encoding_error() {
        let table = book(&[("a", "0")], None);
        let result = encode_data(&symbols("ab"), &table.entries);
        assert!(matches!(result, Err(HuffmanError::Encoding(_))));
    }

    #[test]
    fn truncated_payload_is_rejected_by_symbol_count() {
        // Cutting the last byte leaves "abracad", which ends on a code boundary.
        let result = decode_data(&[0x01, 0x6E, 0x8A], &abracadabra(Some(11)));
        assert!(matches!(result, Err(HuffmanError::Decoding(_))));
    }

    #[test]
    fn stream_ending_inside_a_code_is_rejected() {
        // Data bits 11101: 'r', 'a', then a dangling '1'.
        let result = decode_data(&[0x03, 0b1110_1000], &abracadabra(None));
        assert!(matches!(result, Err(HuffmanError::Decoding(_))));
    }

    #[test]
    fn malformed_headers_are_rejected() {
        let table = abracadabra(None);
        for payload in [&[][..], &[0x09, 0x00][..], &[0x04][..], &[0x00][..]] {
            let result = decode_data(payload, &table);
            assert!(
                matches!(result, Err(HuffmanError::Decoding(_))),
                "accepted {:?}",
                payload
            );
        }
    }

    #[test]
    fn non_zero_padding_is_rejected() {
        let result = decode_data(&[0x01, 0x6E, 0x8A, 0xDD], &abracadabra(None));
        assert!(matches!(result, Err(HuffmanError::Decoding(_))));
    }

    #[test]
    fn unknown_bit_sequence_is_rejected() {
        let table = book(&[("a", "00"), ("b", "01")], None);
        let result = decode_data(&[0x00, 0b1000_0000], &table);
        assert!(matches!(result, Err(HuffmanError::Decoding(_))));
    }
}
