//! Command-line options for the `encode` and `decode` binaries.

use std::path::PathBuf;

use thiserror::Error;

use crate::file::SymbolMode;

pub const DEFAULT_OUTPUT: &str = "output.huff";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing required argument <{0}>")]
    MissingArgument(&'static str),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub symbols: SymbolMode,
    pub print_codes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Parses `<input> [output] [--symbols=bytes|chars] [--print-codes]`.
///
/// `args` excludes the program name.
pub fn parse_encode_args(args: &[String]) -> Result<EncodeOptions, UsageError> {
    let mut positional = Vec::new();
    let mut symbols = SymbolMode::default();
    let mut print_codes = false;

    for arg in args {
        if let Some(value) = arg.strip_prefix("--symbols=") {
            symbols = value.parse().map_err(|_| UsageError::InvalidValue {
                flag: "--symbols",
                value: value.to_string(),
            })?;
        } else if arg == "--print-codes" {
            print_codes = true;
        } else if arg.starts_with("--") {
            return Err(UsageError::UnknownFlag(arg.clone()));
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let input = positional
        .next()
        .ok_or(UsageError::MissingArgument("input_file"))?;
    let output = positional
        .next()
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from);
    if let Some(extra) = positional.next() {
        return Err(UsageError::UnexpectedArgument(extra.clone()));
    }

    Ok(EncodeOptions {
        input: PathBuf::from(input),
        output,
        symbols,
        print_codes,
    })
}

/// Parses `<input> <output>`.
pub fn parse_decode_args(args: &[String]) -> Result<DecodeOptions, UsageError> {
    match args {
        [] => Err(UsageError::MissingArgument("input_file")),
        [_] => Err(UsageError::MissingArgument("output_file")),
        [input, output] => Ok(DecodeOptions {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }),
        [_, _, extra, ..] => Err(UsageError::UnexpectedArgument(extra.clone())),
    }
}
