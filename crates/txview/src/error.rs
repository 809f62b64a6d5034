use thiserror::Error;

/// Outcome of a query or render call that did not produce a value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    /// No document is loaded, or the root token index is outside the token
    /// array.
    #[error("no data")]
    NoData,
    /// A value token spans backwards (`start > end`) or past the end of the
    /// source buffer.
    #[error("unexpected buffer end")]
    UnexpectedBufferEnd,
    /// The subtree was exhausted without reaching the requested item.
    ///
    /// Inside the traversal this is the signal to try the next sibling. It
    /// only reaches a caller when the requested item index does not exist.
    #[error("query returned no results")]
    QueryNoResults,
    /// The requested page does not exist. `page_count` is the authoritative
    /// number of pages for the value, so callers can clamp and retry.
    #[error("display page {page_index} out of range ({page_count} pages)")]
    DisplayPageOutOfRange {
        /// The page that was asked for.
        page_index: usize,
        /// The number of pages the value renders to.
        page_count: usize,
    },
}

/// Structural error reported by the reference [`Tokenizer`](crate::Tokenizer).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// The input holds no JSON value.
    #[error("empty input")]
    Empty,
    /// A byte that cannot start or continue the expected production.
    #[error("invalid character {byte:#04x} at offset {offset}")]
    InvalidCharacter {
        /// Offending byte.
        byte: u8,
        /// Offset of `byte` in the source.
        offset: usize,
    },
    /// A backslash escape other than the ones JSON defines.
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape {
        /// Offset of the backslash.
        offset: usize,
    },
    /// A closing bracket that does not match the innermost open container.
    #[error("mismatched closing bracket at offset {offset}")]
    MismatchedBracket {
        /// Offset of the closing bracket.
        offset: usize,
    },
    /// Input ended inside a string or an open container.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// Non-whitespace input after the root value.
    #[error("trailing characters at offset {offset}")]
    TrailingCharacters {
        /// Offset of the first trailing byte.
        offset: usize,
    },
    /// The document needs more tokens than [`TokenizerLimits::max_tokens`](crate::TokenizerLimits).
    #[error("too many tokens (limit {limit})")]
    TooManyTokens {
        /// The configured limit.
        limit: usize,
    },
    /// Containers nest deeper than [`TokenizerLimits::max_nesting_depth`](crate::TokenizerLimits).
    #[error("nesting too deep (limit {limit})")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },
}
