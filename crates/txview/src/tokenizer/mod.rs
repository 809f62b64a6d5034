//! Reference tokenizer producing jsmn-layout token arrays.
//!
//! The query engine only walks tokens, so any tokenizer that emits the same
//! layout can feed it. This one exists so the crate is usable on its own: it
//! makes a single forward pass over the bytes with an explicit stack of open
//! containers (no recursion), and refuses documents that exceed
//! [`TokenizerLimits`].
//!
//! It checks structure, string escapes and literal spelling. It does not
//! check number grammar or UTF-8, and it never decodes escapes: string tokens
//! span the raw text between the quotes.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::SyntaxError,
    token::{Document, JsonTokens, Token, TokenKind},
};


/// Resource limits enforced while tokenizing.
///
/// # Default
///
/// 256 tokens and 32 levels of nesting, which is more than a signing request
/// needs and small enough for the token array to fit a device heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenizerLimits {
    /// Maximum number of tokens in the output.
    pub max_tokens: usize,
    /// Maximum number of simultaneously open objects and arrays.
    pub max_nesting_depth: usize,
}

impl Default for TokenizerLimits {
    fn default() -> Self {
        Self {
            max_tokens: 256,
            max_nesting_depth: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    /// Just after `{`: a key or `}`.
    BeforePropertyName,
    /// Just after `,` in an object: a key.
    PropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    /// Just after `[`: a value or `]`.
    BeforeArrayValue,
    /// Just after `,` in an array: a value.
    ArrayValue,
    AfterPropertyValue,
    AfterArrayValue,
    End,
}

/// Single-pass tokenizer over one JSON document.
#[derive(Debug)]
pub struct Tokenizer<'src> {
    src: &'src [u8],
    pos: usize,
    state: ParseState,
    tokens: Vec<Token>,
    /// Token indices of the open containers, innermost last.
    stack: Vec<usize>,
    limits: TokenizerLimits,
}

impl<'src> Tokenizer<'src> {
    /// Prepares to tokenize `src` under `limits`.
    pub fn new(src: &'src [u8], limits: TokenizerLimits) -> Self {
        Self {
            src,
            pos: 0,
            state: ParseState::Start,
            tokens: Vec::new(),
            stack: Vec::new(),
            limits,
        }
    }

    /// Runs to the end of the input and returns the tokens.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] on malformed structure, a bad escape, a
    /// misspelled literal, trailing input, or when a limit is exceeded.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        use ParseState::*;

        while let Some(&byte) = self.src.get(self.pos) {
            if matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
                self.pos += 1;
                continue;
            }

            match (self.state, byte) {
                (End, _) => {
                    return Err(SyntaxError::TrailingCharacters { offset: self.pos });
                }
                (Start | BeforePropertyValue | BeforeArrayValue | ArrayValue, b'{' | b'[') => {
                    self.open(byte)?;
                }
                (
                    BeforePropertyName | AfterPropertyValue | BeforeArrayValue | AfterArrayValue,
                    b'}' | b']',
                ) => {
                    self.close(byte)?;
                }
                (BeforePropertyName | PropertyName, b'"') => {
                    self.string()?;
                    self.state = AfterPropertyName;
                }
                (AfterPropertyName, b':') => {
                    self.pos += 1;
                    self.state = BeforePropertyValue;
                }
                (AfterPropertyValue, b',') => {
                    self.pos += 1;
                    self.state = PropertyName;
                }
                (AfterArrayValue, b',') => {
                    self.pos += 1;
                    self.state = ArrayValue;
                }
                (Start | BeforePropertyValue | BeforeArrayValue | ArrayValue, b'"') => {
                    self.string()?;
                    self.after_value();
                }
                (
                    Start | BeforePropertyValue | BeforeArrayValue | ArrayValue,
                    b'-' | b'0'..=b'9' | b't' | b'f' | b'n',
                ) => {
                    self.primitive()?;
                    self.after_value();
                }
                _ => {
                    return Err(SyntaxError::InvalidCharacter {
                        byte,
                        offset: self.pos,
                    });
                }
            }
        }

        match self.state {
            End => Ok(self.tokens),
            Start => Err(SyntaxError::Empty),
            _ => Err(SyntaxError::UnexpectedEndOfInput),
        }
    }

    fn push_token(&mut self, kind: TokenKind, start: usize, end: usize) -> Result<usize, SyntaxError> {
        if self.tokens.len() >= self.limits.max_tokens {
            return Err(SyntaxError::TooManyTokens {
                limit: self.limits.max_tokens,
            });
        }

        // Objects count their keys, arrays their elements.
        let is_key = matches!(
            self.state,
            ParseState::BeforePropertyName | ParseState::PropertyName
        );
        if let Some(parent) = self.stack.last().and_then(|&i| self.tokens.get_mut(i)) {
            if parent.kind == TokenKind::Array || is_key {
                parent.size += 1;
            }
        }

        self.tokens.push(Token {
            start,
            end,
            kind,
            size: 0,
        });
        Ok(self.tokens.len() - 1)
    }

    fn open(&mut self, byte: u8) -> Result<(), SyntaxError> {
        if self.stack.len() >= self.limits.max_nesting_depth {
            return Err(SyntaxError::NestingTooDeep {
                limit: self.limits.max_nesting_depth,
            });
        }

        let (kind, next) = if byte == b'{' {
            (TokenKind::Object, ParseState::BeforePropertyName)
        } else {
            (TokenKind::Array, ParseState::BeforeArrayValue)
        };
        // The end offset is patched when the container closes.
        let index = self.push_token(kind, self.pos, self.pos)?;
        self.stack.push(index);
        self.pos += 1;
        self.state = next;
        Ok(())
    }

    fn close(&mut self, byte: u8) -> Result<(), SyntaxError> {
        let expected = if byte == b'}' {
            TokenKind::Object
        } else {
            TokenKind::Array
        };
        let offset = self.pos;
        let container = self
            .stack
            .pop()
            .and_then(|i| self.tokens.get_mut(i))
            .filter(|t| t.kind == expected)
            .ok_or(SyntaxError::MismatchedBracket { offset })?;
        container.end = offset + 1;
        self.pos += 1;
        self.after_value();
        Ok(())
    }

    fn after_value(&mut self) {
        self.state = match self.stack.last().and_then(|&i| self.tokens.get(i)) {
            None => ParseState::End,
            Some(t) if t.kind == TokenKind::Object => ParseState::AfterPropertyValue,
            Some(_) => ParseState::AfterArrayValue,
        };
    }

    fn string(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos + 1;
        let mut i = start;
        loop {
            match self.src.get(i) {
                None => return Err(SyntaxError::UnexpectedEndOfInput),
                Some(b'"') => break,
                Some(b'\\') => i = self.escape(i)?,
                Some(&byte) if byte < 0x20 => {
                    return Err(SyntaxError::InvalidCharacter { byte, offset: i });
                }
                Some(_) => i += 1,
            }
        }

        self.push_token(TokenKind::String, start, i)?;
        self.pos = i + 1;
        Ok(())
    }

    /// Validates the escape whose backslash sits at `at` and returns the
    /// offset just past it.
    fn escape(&self, at: usize) -> Result<usize, SyntaxError> {
        match self.src.get(at + 1) {
            None => Err(SyntaxError::UnexpectedEndOfInput),
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(at + 2),
            Some(b'u') => {
                let digits = self
                    .src
                    .get(at + 2..at + 6)
                    .ok_or(SyntaxError::UnexpectedEndOfInput)?;
                if digits.iter().all(u8::is_ascii_hexdigit) {
                    Ok(at + 6)
                } else {
                    Err(SyntaxError::InvalidEscape { offset: at })
                }
            }
            Some(_) => Err(SyntaxError::InvalidEscape { offset: at }),
        }
    }

    fn primitive(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        let len = self.src[start..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
            .count();
        let end = start + len;
        let literal = &self.src[start..end];

        let misspelled = match literal.first() {
            Some(b't') => literal != b"true",
            Some(b'f') => literal != b"false",
            Some(b'n') => literal != b"null",
            _ => false,
        };
        if misspelled {
            return Err(SyntaxError::InvalidCharacter {
                byte: literal[0],
                offset: start,
            });
        }

        self.push_token(TokenKind::Primitive, start, end)?;
        self.pos = end;
        Ok(())
    }
}

/// A source buffer together with the tokens the reference tokenizer produced
/// for it.
#[derive(Debug, Clone)]
pub struct TokenizedJson<'src> {
    source: &'src [u8],
    tokens: Vec<Token>,
}

impl<'src> TokenizedJson<'src> {
    /// Tokenizes `source` under the default limits.
    ///
    /// # Errors
    ///
    /// See [`Tokenizer::tokenize`].
    pub fn parse(source: &'src [u8]) -> Result<Self, SyntaxError> {
        Self::parse_with_limits(source, TokenizerLimits::default())
    }

    /// Tokenizes `source` under `limits`.
    ///
    /// # Errors
    ///
    /// See [`Tokenizer::tokenize`].
    pub fn parse_with_limits(source: &'src [u8], limits: TokenizerLimits) -> Result<Self, SyntaxError> {
        let tokens = Tokenizer::new(source, limits).tokenize()?;
        Ok(Self { source, tokens })
    }

    /// Borrowed view of the same document.
    pub fn as_document(&self) -> Document<'_> {
        Document::new(self.source, &self.tokens)
    }
}

impl JsonTokens for TokenizedJson<'_> {
    fn source(&self) -> &[u8] {
        self.source
    }

    fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
