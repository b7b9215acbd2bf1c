//! Error types for the compression pipeline.
//!
//! None of these are transient: every error aborts the current call and is
//! handed back to the caller as-is.

use thiserror::Error;

/// Errors produced by the core compression pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    /// There are no symbols to build a model from.
    #[error("empty input: no symbols to model")]
    EmptyInput,

    /// A symbol has no entry in the code table used to encode it.
    #[error("symbol {symbol} has no code in the code table")]
    UnknownSymbol {
        /// Debug rendering of the offending symbol
        symbol: String,
    },

    /// A tree description is structurally invalid.
    #[error("corrupt tree description: {reason}")]
    CorruptTree {
        /// What is wrong with the description
        reason: String,
    },

    /// The payload ran out of bits before all symbols were decoded.
    #[error("truncated stream: expected {expected} symbols, decoded {decoded}")]
    TruncatedStream {
        /// Symbol count recorded in the container
        expected: u64,
        /// Symbols decoded before the bits ran out
        decoded: u64,
    },

    /// A textual bit string holds something other than '0' or '1'.
    #[error("invalid bit {character:?} at position {position}")]
    InvalidBit {
        /// The offending character
        character: char,
        /// Character index in the bit string
        position: usize,
    },

    /// A bit path leads to a child the tree does not have.
    #[error("no symbol is assigned to the code ending at bit {bit_offset}")]
    UnassignedCode {
        /// Offset of the offending bit in the payload
        bit_offset: u64,
    },

    /// The container header is missing or malformed.
    #[error("invalid container header: {message}")]
    InvalidHeader {
        /// What is wrong with the header
        message: String,
    },

    /// The underlying bit writer failed.
    #[error("bit stream error: {message}")]
    BitStream {
        /// Message of the underlying I/O error
        message: String,
    },
}

impl From<std::io::Error> for HuffmanError {
    fn from(e: std::io::Error) -> Self {
        HuffmanError::BitStream {
            message: e.to_string(),
        }
    }
}

impl HuffmanError {
    /// Create an unknown symbol error from any debuggable symbol
    pub fn unknown_symbol<S: std::fmt::Debug>(symbol: S) -> Self {
        Self::UnknownSymbol {
            symbol: format!("{:?}", symbol),
        }
    }

    /// Create a corrupt tree error
    pub fn corrupt_tree<S: Into<String>>(reason: S) -> Self {
        Self::CorruptTree {
            reason: reason.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header<S: Into<String>>(message: S) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            HuffmanError::EmptyInput.to_string(),
            "empty input: no symbols to model"
        );
        assert_eq!(
            HuffmanError::unknown_symbol('z').to_string(),
            "symbol 'z' has no code in the code table"
        );
        assert_eq!(
            HuffmanError::TruncatedStream {
                expected: 8,
                decoded: 3
            }
            .to_string(),
            "truncated stream: expected 8 symbols, decoded 3"
        );
    }

    #[test]
    fn test_constructors() {
        match HuffmanError::corrupt_tree("duplicate symbol") {
            HuffmanError::CorruptTree { reason } => assert_eq!(reason, "duplicate symbol"),
            other => panic!("unexpected error: {other:?}"),
        }
        match HuffmanError::invalid_header("bad magic") {
            HuffmanError::InvalidHeader { message } => assert_eq!(message, "bad magic"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
