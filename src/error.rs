//! Error type shared by every stage of the codec.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("nothing to compress: input is empty")]
    EmptyInput,

    /// A symbol reached the encoder without a code. Indicates a bug in tree
    /// construction or code derivation.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Payload or code table is malformed, truncated, or the two do not
    /// belong to the same compression run.
    #[error("decoding failed: {0} (payload and code table must come from the same compression run)")]
    Decoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
