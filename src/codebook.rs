//! Text form of the code table, stored next to the payload.
//!
//! Each entry is one line, `<hex symbol bytes>\t<code>`. A final
//! `#symbols\t<count>` record holds the number of symbols in the matching
//! payload, which lets the decoder notice a payload cut on a code boundary.
//! Files without the record are still accepted, so the format written here
//! is a stricter superset of plain `<hex>\t<code>` tables. Readers that
//! expect every line to be an entry will trip over the record.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::error::{HuffmanError, Result};
use crate::huffman::{CodeTable, is_prefix_free};
use crate::symbols::Symbol;

const SYMBOL_COUNT_RECORD: &str = "#symbols";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    pub entries: CodeTable,
    pub symbol_count: Option<u64>,
}

impl CodeBook {
    pub fn new(entries: CodeTable, symbol_count: u64) -> Self {
        CodeBook {
            entries,
            symbol_count: Some(symbol_count),
        }
    }

    pub fn to_text(&self) -> String {
        let mut sorted: Vec<(&Symbol, &String)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mut text = String::new();
        for (symbol, code) in sorted {
            text.push_str(&format!("{}\t{}\n", hex::encode(symbol), code));
        }
        if let Some(count) = self.symbol_count {
            text.push_str(&format!("{}\t{}\n", SYMBOL_COUNT_RECORD, count));
        }
        text
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = CodeTable::new();
        let mut seen_codes = HashSet::new();
        let mut symbol_count = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once('\t') else {
                return Err(malformed(line_no, "expected '<symbol>\\t<code>'"));
            };

            if key.starts_with('#') {
                if key != SYMBOL_COUNT_RECORD {
                    return Err(malformed(line_no, &format!("unknown record '{}'", key)));
                }
                let count = value
                    .parse::<u64>()
                    .map_err(|_| malformed(line_no, &format!("bad symbol count '{}'", value)))?;
                symbol_count = Some(count);
                continue;
            }

            let symbol = hex::decode(key)
                .map_err(|e| malformed(line_no, &format!("bad hex symbol '{}': {}", key, e)))?;
            if symbol.is_empty() {
                return Err(malformed(line_no, "empty symbol"));
            }
            if value.is_empty() || !value.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(malformed(line_no, &format!("bad code '{}'", value)));
            }
            if !seen_codes.insert(value.to_string()) {
                return Err(malformed(line_no, &format!("code '{}' used twice", value)));
            }
            if entries.insert(symbol, value.to_string()).is_some() {
                return Err(malformed(line_no, &format!("symbol '{}' listed twice", key)));
            }
        }

        if entries.is_empty() {
            return Err(HuffmanError::Decoding("code table has no entries".into()));
        }
        if !is_prefix_free(entries.values()) {
            return Err(HuffmanError::Decoding(
                "code table is not prefix-free".into(),
            ));
        }

        debug!(
            "Parsed code table: {} entries, symbol count {:?}.",
            entries.len(),
            symbol_count
        );
        Ok(CodeBook {
            entries,
            symbol_count,
        })
    }

    /// Code -> symbol lookup used while decoding.
    pub fn inverse(&self) -> HashMap<&str, &Symbol> {
        self.entries
            .iter()
            .map(|(symbol, code)| (code.as_str(), symbol))
            .collect()
    }

    pub fn max_code_len(&self) -> usize {
        self.entries.values().map(String::len).max().unwrap_or(0)
    }
}

fn malformed(line_no: usize, reason: &str) -> HuffmanError {
    HuffmanError::Decoding(format!("code table line {}: {}", line_no, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abracadabra_book() -> CodeBook {
        let mut entries = CodeTable::new();
        for (symbol, code) in [("a", "0"), ("b", "110"), ("r", "111"), ("c", "100"), ("d", "101")] {
            entries.insert(symbol.as_bytes().to_vec(), code.to_string());
        }
        CodeBook::new(entries, 11)
    }

    #[test]
    fn text_is_sorted_hex_lines_with_count_record() {
        let text = abracadabra_book().to_text();
        assert_eq!(
            text,
            "61\t0\n62\t110\n63\t100\n64\t101\n72\t111\n#symbols\t11\n"
        );
    }

    #[test]
    fn parses_its_own_output() {
        let book = abracadabra_book();
        assert_eq!(CodeBook::parse(&book.to_text()).unwrap(), book);
    }

    #[test]
    fn accepts_tables_without_count_and_with_crlf() {
        let book = CodeBook::parse("c582\t0\r\n0a\t1\r\n\r\n").unwrap();
        assert_eq!(book.symbol_count, None);
        assert_eq!(book.entries["ł".as_bytes()], "0");
        assert_eq!(book.entries[&b"\n".to_vec()], "1");
    }

    #[test]
    fn inverse_maps_codes_back() {
        let book = abracadabra_book();
        let inverse = book.inverse();
        assert_eq!(inverse["110"], &b"b".to_vec());
        assert_eq!(book.max_code_len(), 3);
    }

    #[test]
    fn rejects_malformed_tables() {
        let cases = [
            "",
            "61 0\n",
            "zz\t0\n",
            "\t0\n",
            "61\t\n",
            "61\t012\n",
            "61\t0\n62\t0\n",
            "61\t0\n61\t1\n",
            "61\t0\n62\t01\n",
            "61\t0\n#symbols\tmany\n",
            "61\t0\n#length\t3\n",
        ];
        for case in cases {
            let result = CodeBook::parse(case);
            assert!(
                matches!(result, Err(HuffmanError::Decoding(_))),
                "accepted {:?}",
                case
            );
        }
    }
}
