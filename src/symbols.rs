use std::collections::HashMap;

use log::debug;

/// Byte-level encoding of a single character.
pub type Symbol = Vec<u8>;
pub type FreqTable = HashMap<Symbol, u64>;

/// Splits raw input into character symbols.
///
/// Valid UTF-8 is cut at scalar value boundaries. Bytes that do not belong to
/// a valid sequence become one-byte symbols of their own, so joining the
/// result always gives back `data`.
pub fn split_symbols(data: &[u8]) -> Vec<&[u8]> {
    let mut symbols = Vec::with_capacity(data.len());

    for chunk in data.utf8_chunks() {
        let valid = chunk.valid();
        for (start, c) in valid.char_indices() {
            symbols.push(&valid.as_bytes()[start..start + c.len_utf8()]);
        }
        for i in 0..chunk.invalid().len() {
            symbols.push(&chunk.invalid()[i..i + 1]);
        }
    }

    symbols
}

pub fn count_frequencies(symbols: &[&[u8]]) -> FreqTable {
    let mut freq = FreqTable::new();
    for &symbol in symbols {
        *freq.entry(symbol.to_vec()).or_insert(0) += 1;
    }
    debug!(
        "Counted {} symbols, {} distinct.",
        symbols.len(),
        freq.len()
    );
    freq
}

/// Shannon entropy of the table, in bits per symbol.
pub fn entropy_from_freq(freq: &FreqTable) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total
    );
    entropy
}
