use core::num::TryFromIntError;
use nom::error::*;
use thiserror::Error;

/// The types of errors that may be returned by the parser.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum SevenZParserErrorKind {
    #[error("nom parser failed: {0:?}")]
    Nom(ErrorKind),
    #[error("truncated variable-length integer")]
    MalformedVarInt,
    #[error("bit vector of {expected_bits} bits does not fit into {available_bytes} bytes")]
    MalformedBoolVector {
        expected_bits: usize,
        available_bytes: usize,
    },
    #[error("unexpected property id {0:#04x}")]
    UnknownRequiredTag(u8),
    #[error("malformed folder: {0}")]
    MalformedFolder(&'static str),
    #[error("malformed files info: {0}")]
    MalformedFilesInfo(&'static str),
    #[error("CRC mismatch: stored {expected:#010x}, calculated {actual:#010x}")]
    Crc { expected: u32, actual: u32 },
    #[error("invalid boolean byte {0:#04x}")]
    InvalidBooleanByte(u8),
    #[error("data stored in an additional stream is not supported")]
    ExternalDataUnsupported,
    #[error("conversion failed: {0}")]
    ConversionFailure(SevenZConversionError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum SevenZConversionError {
    #[error("value does not fit into usize")]
    ToUsize(#[from] TryFromIntError),
    #[error("file name is not valid UTF-16")]
    ToString,
}

/// The error type returned by all parsers.
#[derive(Debug, Clone, PartialEq)]
pub struct SevenZParserError<I> {
    /// Where in the input the error occurred.
    pub input: I,
    /// What kind of error this is
    pub kind: SevenZParserErrorKind,
    /// All the context we have accumulated from previous errors.
    pub ctx: Vec<(I, &'static str)>,
}

impl<I> ParseError<I> for SevenZParserError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        return SevenZParserError::new(input, SevenZParserErrorKind::Nom(kind));
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I> SevenZParserError<I> {
    /// Creates a new error.
    pub fn new(input: I, kind: SevenZParserErrorKind) -> Self {
        return SevenZParserError {
            input,
            kind,
            ctx: Vec::new(),
        };
    }

    /// Shorthand for a recoverable `nom::Err::Error`.
    pub fn error(input: I, kind: SevenZParserErrorKind) -> nom::Err<Self> {
        return nom::Err::Error(SevenZParserError::new(input, kind));
    }

    /// Shorthand for a fatal `nom::Err::Failure`, which stops `opt`/`alt` from backtracking.
    pub fn failure(input: I, kind: SevenZParserErrorKind) -> nom::Err<Self> {
        return nom::Err::Failure(SevenZParserError::new(input, kind));
    }

    /// The innermost context label, if any.
    pub fn innermost_context(&self) -> Option<&'static str> {
        return self.ctx.first().map(|(_, c)| *c);
    }
}

impl<I> ContextError<I> for SevenZParserError<I> {
    fn add_context(input: I, ctx: &'static str, mut other: Self) -> Self {
        other.ctx.push((input, ctx));
        return other;
    }
}

/// Macro for converting from u64 to usize, or returning the correct error if conversion not possible
#[macro_export]
macro_rules! to_usize_or_err {
    ($input:expr, $x:expr) => {
        match usize::try_from($x) {
            Ok(res) => res,
            Err(e) => {
                return Err($crate::parser::err::SevenZParserError::failure(
                    $input,
                    $crate::parser::err::SevenZParserErrorKind::ConversionFailure(
                        $crate::parser::err::SevenZConversionError::ToUsize(e),
                    ),
                ))
            }
        }
    };
}
