//! File-level compression: payload at the chosen path, code table beside it
//! with a `.codes` suffix.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::codebook::CodeBook;
use crate::error::{HuffmanError, Result};
use crate::symbols::entropy_from_freq;
use crate::{compress, decompress};

pub const CODES_SUFFIX: &str = ".codes";

/// Where the code table for `payload_path` lives.
pub fn codes_path(payload_path: &Path) -> PathBuf {
    let mut name = OsString::from(payload_path.as_os_str());
    name.push(CODES_SUFFIX);
    PathBuf::from(name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub codes_size: u64,
    pub distinct_symbols: usize,
    pub entropy: f64,
}

impl CompressionReport {
    /// Space saved by the payload, as a percentage of the original size.
    pub fn ratio(&self) -> f64 {
        saved_percent(self.original_size, self.compressed_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecompressionReport {
    pub compressed_size: u64,
    pub output_size: u64,
}

impl DecompressionReport {
    pub fn ratio(&self) -> f64 {
        saved_percent(self.output_size, self.compressed_size)
    }
}

fn saved_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - compressed as f64) / original as f64 * 100.0
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    Ok(())
}

fn discard_files(paths: &[&Path]) {
    for path in paths {
        if !path.is_file() {
            continue;
        }
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}

pub fn compress_file(input: &Path, output: &Path) -> Result<CompressionReport> {
    info!("Reading input file: {}", input.display());
    let data = fs::read(input)?;
    let compressed = compress(&data)?;

    let codes_text = compressed.code_book.to_text();
    let codes_file = codes_path(output);

    // Payload and code table only exist as a pair: when either write fails,
    // neither file is left behind.
    info!("Writing code table to {}", codes_file.display());
    let written = write_file(&codes_file, codes_text.as_bytes()).and_then(|()| {
        info!("Writing payload to {}", output.display());
        write_file(output, &compressed.payload)
    });
    if let Err(e) = written {
        discard_files(&[codes_file.as_path(), output]);
        return Err(e);
    }

    Ok(CompressionReport {
        original_size: data.len() as u64,
        compressed_size: compressed.payload.len() as u64,
        codes_size: codes_text.len() as u64,
        distinct_symbols: compressed.code_book.entries.len(),
        entropy: entropy_from_freq(&compressed.frequencies),
    })
}

pub fn decompress_file(input: &Path, output: &Path) -> Result<DecompressionReport> {
    let codes_file = codes_path(input);
    info!("Reading code table: {}", codes_file.display());
    let codes_text = String::from_utf8(fs::read(&codes_file)?)
        .map_err(|e| HuffmanError::Decoding(format!("code table is not UTF-8: {}", e)))?;
    let code_book = CodeBook::parse(&codes_text)?;

    info!("Reading encoded file: {}", input.display());
    let payload = fs::read(input)?;
    let decoded = decompress(&payload, &code_book)?;

    info!("Writing decoded output to file: {}", output.display());
    write_file(output, &decoded)?;

    Ok(DecompressionReport {
        compressed_size: payload.len() as u64,
        output_size: decoded.len() as u64,
    })
}
