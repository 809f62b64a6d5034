//! Token records and the accessor trait the query engine walks.
//!
//! Tokens follow the jsmn layout: one flat array in document order, each entry
//! a byte span into the source plus a kind tag. An object's direct children
//! alternate key, value, key, value; an array's children are its elements.
//! Nothing here parses text. Whoever produced the array guarantees it is well
//! formed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Syntactic kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// String contents, quotes excluded. Object keys are strings too.
    String,
    /// Number, `true`, `false` or `null`, as written.
    Primitive,
}

/// One JSON element located in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
    /// Kind tag.
    pub kind: TokenKind,
    /// Direct children: key/value pairs for objects, elements for arrays,
    /// zero otherwise.
    pub size: usize,
}

impl Token {
    /// Returns `true` for strings and primitives.
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, TokenKind::String | TokenKind::Primitive)
    }
}

/// Read access to a tokenized document.
///
/// Implementors supply the source bytes and the token array; the child
/// accessors have span-based default implementations that work for any
/// jsmn-style array and can be overridden when the tokenizer records parent
/// links or subtree sizes.
pub trait JsonTokens {
    /// The document text the token spans point into.
    fn source(&self) -> &[u8];

    /// All tokens, in document order.
    fn tokens(&self) -> &[Token];

    /// The token at `index`, if any.
    fn token(&self, index: usize) -> Option<&Token> {
        self.tokens().get(index)
    }

    /// The source bytes a token spans, or `None` if the span is reversed or
    /// leaves the source.
    fn span(&self, index: usize) -> Option<&[u8]> {
        let token = self.token(index)?;
        self.source().get(token.start..token.end)
    }

    /// Number of elements of an array or key/value pairs of an object, as
    /// recorded in the container's [`Token::size`]. Scalars have none.
    fn element_count(&self, container: usize) -> usize {
        self.token(container)
            .filter(|t| !t.is_scalar())
            .map_or(0, |t| t.size)
    }

    /// Direct children of `container` in document order. For an object they
    /// alternate key, value.
    ///
    /// Each step skips the previous child's subtree, so one pass costs the
    /// container's token count.
    fn children(&self, container: usize) -> Children<'_> {
        children(self.tokens(), container)
    }

    /// Index of the key token of the `n`th pair of `object`.
    fn nth_key(&self, object: usize, n: usize) -> Option<usize> {
        self.token(object).filter(|t| t.kind == TokenKind::Object)?;
        self.children(object).nth(n.checked_mul(2)?)
    }

    /// Index of the value token of the `n`th pair of `object`.
    fn nth_value(&self, object: usize, n: usize) -> Option<usize> {
        self.token(object).filter(|t| t.kind == TokenKind::Object)?;
        self.children(object).nth(n.checked_mul(2)?.checked_add(1)?)
    }

    /// Index of the `n`th element of `array`.
    fn nth_element(&self, array: usize, n: usize) -> Option<usize> {
        self.token(array).filter(|t| t.kind == TokenKind::Array)?;
        self.children(array).nth(n)
    }
}

/// Index one past the last descendant of `index`.
///
/// Descendants are exactly the tokens that follow `index` and start before it
/// ends. Scalars end before the next token starts, so they have none.
pub(crate) fn subtree_end(tokens: &[Token], index: usize) -> usize {
    let Some(end) = tokens.get(index).map(|t| t.end) else {
        return index;
    };
    let mut next = index + 1;
    while tokens.get(next).is_some_and(|t| t.start < end) {
        next += 1;
    }
    next
}

/// Iterator over the direct children of a container token, returned by
/// [`JsonTokens::children`].
#[derive(Debug, Clone)]
pub struct Children<'a> {
    tokens: &'a [Token],
    next: usize,
    stop: usize,
}

pub(crate) fn children(tokens: &[Token], container: usize) -> Children<'_> {
    let stop = subtree_end(tokens, container);
    Children {
        tokens,
        next: container + 1,
        stop,
    }
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.stop {
            return None;
        }
        let child = self.next;
        self.next = subtree_end(self.tokens, child).max(child + 1);
        Some(child)
    }
}

/// A borrowed token array over a borrowed source buffer.
///
/// This is the shape an external tokenizer hands over: both halves are owned
/// elsewhere and must outlive every query against the document.
#[derive(Debug, Clone, Copy)]
pub struct Document<'src> {
    source: &'src [u8],
    tokens: &'src [Token],
}

impl<'src> Document<'src> {
    /// Pairs a source buffer with the tokens produced for it.
    pub fn new(source: &'src [u8], tokens: &'src [Token]) -> Self {
        Self { source, tokens }
    }
}

impl JsonTokens for Document<'_> {
    fn source(&self) -> &[u8] {
        self.source
    }

    fn tokens(&self) -> &[Token] {
        self.tokens
    }
}
